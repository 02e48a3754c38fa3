// ==========================================
// Mandi 供应链智能引擎 - 压力信号引擎
// ==========================================
// 职责: 检测价格 / 天气 / 需求 / 运输四类压力信号并计算风险分
// 输入: 参考目录 + 时段随机源 (每 3 小时刷新)
// 输出: RiskAssessment
// ==========================================
// 风险分 = min(100, 5 + Σ 严重程度权重)
// 检查顺序 (契约): 价格 → 天气 → 需求 → 运输
// ==========================================

use crate::domain::catalog::{Catalog, Crop};
use crate::domain::signal::{
    RiskAssessment, StressSignal, TransportTemplate, WeatherTemplate, ADVERSE_WEATHER_COUNT,
    FESTIVALS, TRANSPORT_TEMPLATES, WEATHER_TEMPLATES,
};
use crate::domain::types::{RiskLevel, Severity, SignalType};
use crate::engine::clock::Clock;
use crate::engine::numeric::round_whole;
use crate::engine::seed::{pick_index, sample_indices, SeedProvider};
use crate::i18n::{t_in, t_in_with_args, DEFAULT_LOCALE};
use rand::Rng;
use std::sync::Arc;
use tracing::instrument;

/// 常驻基线风险
pub const BASELINE_RISK: u32 = 5;

/// 风险分上限
pub const MAX_RISK_SCORE: u32 = 100;

/// 价格信号触发阈值 (|spike|)
pub const PRICE_SIGNAL_THRESHOLD: f64 = 0.18;

// 各类信号触发概率 (draw > 阈值)
const WEATHER_TRIGGER: f64 = 0.6; // 40%
const DEMAND_TRIGGER: f64 = 0.65; // 35%
const TRANSPORT_TRIGGER: f64 = 0.7; // 30%

/// 由信号列表计算风险分
pub fn compute_risk_score(signals: &[StressSignal]) -> u32 {
    let raw: u32 = signals.iter().map(StressSignal::weight).sum();
    (BASELINE_RISK + raw).min(MAX_RISK_SCORE)
}

/// 价格波动 → 严重程度 (仅在 |spike| > 0.18 时调用)
pub fn price_severity(spike: f64) -> Severity {
    let magnitude = spike.abs();
    if magnitude > 0.30 {
        Severity::Critical
    } else if magnitude > 0.22 {
        Severity::High
    } else {
        Severity::Medium
    }
}

// ==========================================
// StressEngine - 压力信号引擎
// ==========================================
pub struct StressEngine {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    seeds: SeedProvider,
    locale: String,
}

impl StressEngine {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>) -> Self {
        let seeds = SeedProvider::new(clock.clone());
        Self {
            catalog,
            clock,
            seeds,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// 指定文案语言
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    /// 检测压力信号并评估风险
    #[instrument(skip(self))]
    pub fn detect(&self) -> RiskAssessment {
        let mut rng = self.seeds.burst_rng();
        let mut signals = Vec::new();

        self.check_price(&mut rng, &mut signals);
        self.check_weather(&mut rng, &mut signals);
        self.check_demand(&mut rng, &mut signals);
        self.check_transport(&mut rng, &mut signals);

        let risk_score = compute_risk_score(&signals);
        let risk_level = RiskLevel::from_score(risk_score);

        tracing::debug!(
            risk_score,
            signal_count = signals.len(),
            "压力信号评估完成: {}",
            risk_level
        );

        RiskAssessment {
            risk_score,
            risk_level,
            signal_count: signals.len(),
            signals,
            last_updated: self.clock.now_naive(),
        }
    }

    // ==========================================
    // 四类检查
    // ==========================================

    /// 价格检查: 无放回抽取 2~4 种作物,|spike| > 0.18 时产生信号
    fn check_price<R: Rng>(&self, rng: &mut R, signals: &mut Vec<StressSignal>) {
        let crops = self.catalog.crops();
        let amount = rng.gen_range(2..=4);

        for index in sample_indices(rng, crops.len(), amount) {
            let spike: f64 = rng.gen_range(-0.35..0.35);
            if spike.abs() > PRICE_SIGNAL_THRESHOLD {
                let volume_k: u32 = rng.gen_range(10..=80);
                signals.push(self.price_signal(&crops[index], spike, volume_k));
            }
        }
    }

    /// 天气检查: 40% 概率,从三种不利天气中均匀选取
    fn check_weather<R: Rng>(&self, rng: &mut R, signals: &mut Vec<StressSignal>) {
        if rng.gen::<f64>() > WEATHER_TRIGGER {
            let template = WEATHER_TEMPLATES[pick_index(rng, ADVERSE_WEATHER_COUNT)];
            signals.push(self.weather_signal(template));
        }
    }

    /// 需求检查: 35% 概率,节日需求激增 (固定 medium)
    fn check_demand<R: Rng>(&self, rng: &mut R, signals: &mut Vec<StressSignal>) {
        if rng.gen::<f64>() > DEMAND_TRIGGER {
            let festival = FESTIVALS[pick_index(rng, FESTIVALS.len())];
            let multiplier: u32 = rng.gen_range(2..=4);
            signals.push(self.demand_signal(festival, multiplier));
        }
    }

    /// 运输检查: 30% 概率,从三种运输问题中均匀选取
    fn check_transport<R: Rng>(&self, rng: &mut R, signals: &mut Vec<StressSignal>) {
        if rng.gen::<f64>() > TRANSPORT_TRIGGER {
            let template = TRANSPORT_TEMPLATES[pick_index(rng, TRANSPORT_TEMPLATES.len())];
            let affected: u32 = rng.gen_range(1..=3);
            signals.push(self.transport_signal(template, affected));
        }
    }

    // ==========================================
    // 信号构造
    // ==========================================

    fn price_signal(&self, crop: &Crop, spike: f64, volume_k: u32) -> StressSignal {
        let rising = spike > 0.0;
        let direction = t_in(
            &self.locale,
            if rising { "signal.price.spike" } else { "signal.price.crash" },
        );
        let change = format!(
            "{}{}",
            if rising { "+" } else { "" },
            round_whole(spike * 100.0)
        );
        let volume = volume_k.to_string();

        StressSignal {
            signal_type: SignalType::Price,
            severity: price_severity(spike),
            icon: (if rising { "📈" } else { "📉" }).to_string(),
            title: t_in_with_args(
                &self.locale,
                "signal.price.title",
                &[
                    ("emoji", crop.emoji.as_str()),
                    ("crop", crop.name.as_str()),
                    ("direction", direction.as_str()),
                ],
            ),
            detail: t_in_with_args(&self.locale, "signal.price.detail", &[("change", change.as_str())]),
            impact: t_in_with_args(
                &self.locale,
                "signal.price.impact",
                &[("volume", volume.as_str())],
            ),
            action: t_in(
                &self.locale,
                if rising {
                    "signal.price.action_spike"
                } else {
                    "signal.price.action_crash"
                },
            ),
            crop: Some(crop.name.clone()),
        }
    }

    fn weather_signal(&self, template: WeatherTemplate) -> StressSignal {
        let prefix = format!("signal.weather.{}", template.key);
        let impact = t_in(&self.locale, &format!("{}.impact", prefix));

        StressSignal {
            signal_type: SignalType::Weather,
            severity: template.severity,
            icon: template.icon.to_string(),
            title: t_in(&self.locale, &format!("{}.title", prefix)),
            detail: impact.clone(),
            impact,
            action: t_in(&self.locale, "signal.weather.action"),
            crop: None,
        }
    }

    fn demand_signal(&self, festival_key: &str, multiplier: u32) -> StressSignal {
        let festival = t_in(&self.locale, &format!("festival.{}", festival_key));
        let multiplier = multiplier.to_string();

        StressSignal {
            signal_type: SignalType::Demand,
            severity: Severity::Medium,
            icon: "🎉".to_string(),
            title: t_in_with_args(&self.locale, "signal.demand.title", &[("festival", festival.as_str())]),
            detail: t_in(&self.locale, "signal.demand.detail"),
            impact: t_in_with_args(
                &self.locale,
                "signal.demand.impact",
                &[("multiplier", multiplier.as_str())],
            ),
            action: t_in(&self.locale, "signal.demand.action"),
            crop: None,
        }
    }

    fn transport_signal(&self, template: TransportTemplate, affected: u32) -> StressSignal {
        let prefix = format!("signal.transport.{}", template.key);
        let affected = affected.to_string();

        StressSignal {
            signal_type: SignalType::Transport,
            severity: template.severity,
            icon: "🚧".to_string(),
            title: t_in(&self.locale, &format!("{}.title", prefix)),
            detail: t_in(&self.locale, &format!("{}.detail", prefix)),
            impact: t_in_with_args(
                &self.locale,
                "signal.transport.impact",
                &[("count", affected.as_str())],
            ),
            action: t_in(&self.locale, "signal.transport.action"),
            crop: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;
    use chrono::NaiveDate;

    fn engine_at(day: u32, hour: u32) -> StressEngine {
        let date = NaiveDate::from_ymd_opt(2026, 7, day).unwrap();
        StressEngine::new(
            Arc::new(Catalog::standard()),
            Arc::new(FixedClock::at(date, hour).unwrap()),
        )
    }

    fn signal(severity: Severity) -> StressSignal {
        StressSignal {
            signal_type: SignalType::Weather,
            severity,
            icon: String::new(),
            title: String::new(),
            detail: String::new(),
            impact: String::new(),
            action: String::new(),
            crop: None,
        }
    }

    #[test]
    fn test_empty_signals_yield_baseline() {
        assert_eq!(compute_risk_score(&[]), 5);
        assert_eq!(RiskLevel::from_score(compute_risk_score(&[])), RiskLevel::Low);
    }

    #[test]
    fn test_risk_score_sums_weights_and_caps() {
        let signals = vec![signal(Severity::Medium), signal(Severity::High)];
        assert_eq!(compute_risk_score(&signals), 5 + 6 + 12);

        let many: Vec<StressSignal> = (0..6).map(|_| signal(Severity::Critical)).collect();
        assert_eq!(compute_risk_score(&many), 100);
    }

    #[test]
    fn test_price_severity_thresholds() {
        assert_eq!(price_severity(0.19), Severity::Medium);
        assert_eq!(price_severity(-0.22), Severity::Medium);
        assert_eq!(price_severity(0.23), Severity::High);
        assert_eq!(price_severity(-0.31), Severity::Critical);
    }

    #[test]
    fn test_same_bucket_is_deterministic() {
        // 同一 3 小时时段内 (9 点与 11 点)
        let a = engine_at(4, 9).detect();
        let b = engine_at(4, 11).detect();
        assert_eq!(a.signals, b.signals);
        assert_eq!(a.risk_score, b.risk_score);
    }

    #[test]
    fn test_assessment_is_internally_consistent() {
        for day in 1..=28 {
            for hour in [0, 3, 6, 9, 12, 15, 18, 21] {
                let assessment = engine_at(day, hour).detect();
                assert_eq!(assessment.signal_count, assessment.signals.len());
                assert_eq!(assessment.risk_score, compute_risk_score(&assessment.signals));
                assert!(assessment.risk_score >= 5 && assessment.risk_score <= 100);
                assert_eq!(assessment.risk_level, RiskLevel::from_score(assessment.risk_score));

                // 价格信号最多 4 条,其余类别最多各 1 条
                let count = |t: SignalType| {
                    assessment.signals.iter().filter(|s| s.signal_type == t).count()
                };
                assert!(count(SignalType::Price) <= 4);
                assert!(count(SignalType::Weather) <= 1);
                assert!(count(SignalType::Demand) <= 1);
                assert!(count(SignalType::Transport) <= 1);

                for s in &assessment.signals {
                    match s.signal_type {
                        SignalType::Price => {
                            assert!(s.crop.is_some());
                            assert_ne!(s.severity, Severity::Low);
                        }
                        SignalType::Weather => {
                            // 晴好模板不参与抽样
                            assert_ne!(s.severity, Severity::Low);
                            assert_ne!(s.title, "Clear skies ahead");
                        }
                        SignalType::Demand => assert_eq!(s.severity, Severity::Medium),
                        SignalType::Transport => assert!(s.impact.ends_with("deliveries affected today")),
                    }
                }
            }
        }
    }

    #[test]
    fn test_localized_signals_keep_structure() {
        let en = engine_at(4, 9).detect();
        let zh = engine_at(4, 9).with_locale("zh-CN").detect();
        assert_eq!(en.risk_score, zh.risk_score);
        assert_eq!(en.signal_count, zh.signal_count);
        for (a, b) in en.signals.iter().zip(zh.signals.iter()) {
            assert_eq!(a.signal_type, b.signal_type);
            assert_eq!(a.severity, b.severity);
            assert_eq!(a.crop, b.crop);
        }
    }
}
