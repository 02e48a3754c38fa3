// ==========================================
// Mandi 供应链智能引擎 - 情景模拟引擎
// ==========================================
// 职责: 线性敏感系数模拟降雨 / 需求激增 / 运输延误影响
// 输入: 三个标量 (不设上限) + 固定基线
// 输出: ScenarioResult (预测指标 + 作物影响 + 建议)
// ==========================================
// 说明: 纯函数,不使用随机源
// 负值输入按同一线性公式计算,仅告警不截断
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::scenario::{
    CropImpact, ImpactFactors, Recommendation, ScenarioInput, ScenarioPrediction,
    ScenarioResult, BASELINE,
};
use crate::domain::types::{CropRisk, RecommendationKind};
use crate::engine::numeric::{fits_i64, round_to, round_whole};
use crate::i18n::{t_in, t_in_with_args, DEFAULT_LOCALE};
use std::sync::Arc;
use tracing::instrument;

/// 参与作物影响计算的作物数量 (目录前 N 个)
pub const CROP_IMPACT_COUNT: usize = 6;

// 预测下限 / 上限
const SUPPLY_FLOOR_KG: i64 = 500;
const SUPPLY_IMPACT_FLOOR: f64 = 0.2;
const PRICE_IMPACT_FLOOR: f64 = 0.5;
const RISK_CEILING: i64 = 100;
const SPOILAGE_CEILING_PCT: f64 = 40.0;

// 建议触发阈值 (严格大于)
const SHORTFALL_GAP_KG: i64 = 500;
const RISK_ALERT_SCORE: u32 = 60;
const COLD_STORAGE_SPOILAGE_PCT: f64 = 10.0;
const PREPOSITION_RAIN_DAYS: f64 = 2.0;
const FARMER_ALERT_SURGE_PCT: f64 = 30.0;

/// 计算乘性影响因子
pub fn impact_factors(input: &ScenarioInput) -> ImpactFactors {
    let mut f = ImpactFactors::default();

    if input.rain_days > 0.0 {
        f.supply -= 0.12 * input.rain_days;
        f.price += 0.08 * input.rain_days;
        f.risk += 0.15 * input.rain_days;
        f.spoilage += 0.20 * input.rain_days;
    }

    if input.demand_surge_pct > 0.0 {
        let surge = input.demand_surge_pct / 100.0;
        f.demand += surge;
        f.price += surge * 0.6;
        f.risk += surge * 0.4;
    }

    if input.transport_delay_pct > 0.0 {
        let delay = input.transport_delay_pct / 100.0;
        f.supply -= delay * 0.3;
        f.risk += delay * 0.5;
        f.spoilage += delay * 0.4;
    }

    f
}

/// 由影响因子推导预测指标 (各自独立截断)
pub fn predict(f: &ImpactFactors) -> ScenarioPrediction {
    let supply_kg = round_whole(BASELINE.supply_kg as f64 * f.supply.max(SUPPLY_IMPACT_FLOOR))
        .max(SUPPLY_FLOOR_KG);
    let raw_demand = BASELINE.demand_kg as f64 * f.demand;
    if !fits_i64(raw_demand) {
        tracing::warn!(raw_demand, demand_factor = f.demand, "需求量超出 i64 范围,已饱和截断");
    }
    let demand_kg = round_whole(raw_demand);
    let price_index = round_to(BASELINE.price_index * f.price.max(PRICE_IMPACT_FLOOR), 1);
    let risk_score = round_whole(f64::from(BASELINE.risk_score) * f.risk.max(1.0)).min(RISK_CEILING);
    let spoilage_pct =
        round_to(BASELINE.spoilage_pct * f.spoilage.max(1.0), 1).min(SPOILAGE_CEILING_PCT);

    ScenarioPrediction {
        supply_kg,
        demand_kg,
        gap_kg: demand_kg - supply_kg,
        price_index,
        risk_score: risk_score as u32,
        spoilage_pct,
    }
}

/// 腐损率文案: 封顶值显示为整数, 其余保留 1 位小数
fn format_spoilage(pct: f64) -> String {
    if pct >= SPOILAGE_CEILING_PCT {
        format!("{}", SPOILAGE_CEILING_PCT as i64)
    } else {
        format!("{:.1}", pct)
    }
}

// ==========================================
// ScenarioEngine - 情景模拟引擎
// ==========================================
pub struct ScenarioEngine {
    catalog: Arc<Catalog>,
    locale: String,
}

impl ScenarioEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// 指定文案语言
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    /// 运行情景模拟
    #[instrument(skip(self))]
    pub fn run(&self, input: ScenarioInput) -> ScenarioResult {
        if input.has_negative() {
            tracing::warn!(
                rain_days = input.rain_days,
                demand_surge_pct = input.demand_surge_pct,
                transport_delay_pct = input.transport_delay_pct,
                "情景输入含负值,按线性公式计算"
            );
        }

        let impacts = impact_factors(&input);
        let predicted = predict(&impacts);
        let crop_impacts = self.crop_impacts(&impacts);
        let recommendations = self.recommendations(&input, &predicted);

        tracing::debug!(
            gap_kg = predicted.gap_kg,
            risk_score = predicted.risk_score,
            recommendation_count = recommendations.len(),
            "情景模拟完成"
        );

        ScenarioResult {
            scenario: input,
            baseline: BASELINE,
            impacts,
            predicted,
            crop_impacts,
            recommendations,
        }
    }

    /// 作物影响 (目录前 6 种,按目录顺序)
    fn crop_impacts(&self, f: &ImpactFactors) -> Vec<CropImpact> {
        let supply_change_pct = round_to((f.supply - 1.0) * 100.0, 1);

        self.catalog
            .crops()
            .iter()
            .take(CROP_IMPACT_COUNT)
            .map(|crop| {
                let price_change_pct =
                    round_to((f.price - 1.0) * 100.0 * (1.0 + crop.volatility), 1);
                CropImpact {
                    crop: crop.name.clone(),
                    emoji: crop.emoji.clone(),
                    price_change_pct,
                    supply_change_pct,
                    risk: CropRisk::from_price_change(price_change_pct),
                }
            })
            .collect()
    }

    /// 建议 (固定检查顺序,互相独立)
    fn recommendations(
        &self,
        input: &ScenarioInput,
        predicted: &ScenarioPrediction,
    ) -> Vec<Recommendation> {
        let mut recs = Vec::new();

        if predicted.gap_kg > SHORTFALL_GAP_KG {
            let gap = predicted.gap_kg.to_string();
            recs.push(self.recommendation(
                RecommendationKind::Shortfall,
                "📦",
                t_in_with_args(&self.locale, "scenario.shortfall", &[("gap", gap.as_str())]),
            ));
        }
        if predicted.risk_score > RISK_ALERT_SCORE {
            let risk = predicted.risk_score.to_string();
            recs.push(self.recommendation(
                RecommendationKind::RiskAlert,
                "⚠️",
                t_in_with_args(&self.locale, "scenario.risk_alert", &[("risk", risk.as_str())]),
            ));
        }
        if predicted.spoilage_pct > COLD_STORAGE_SPOILAGE_PCT {
            let spoilage = format_spoilage(predicted.spoilage_pct);
            recs.push(self.recommendation(
                RecommendationKind::ColdStorage,
                "❄️",
                t_in_with_args(
                    &self.locale,
                    "scenario.cold_storage",
                    &[("spoilage", spoilage.as_str())],
                ),
            ));
        }
        if input.rain_days > PREPOSITION_RAIN_DAYS {
            recs.push(self.recommendation(
                RecommendationKind::TruckPrepositioning,
                "🚛",
                t_in(&self.locale, "scenario.truck_prepositioning"),
            ));
        }
        if input.demand_surge_pct > FARMER_ALERT_SURGE_PCT {
            recs.push(self.recommendation(
                RecommendationKind::FarmerAlert,
                "📢",
                t_in(&self.locale, "scenario.farmer_alert"),
            ));
        }

        recs
    }

    fn recommendation(&self, kind: RecommendationKind, icon: &str, text: String) -> Recommendation {
        Recommendation {
            kind,
            icon: icon.to_string(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScenarioEngine {
        ScenarioEngine::new(Arc::new(Catalog::standard()))
    }

    fn kinds(result: &ScenarioResult) -> Vec<RecommendationKind> {
        result.recommendations.iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_zero_input_matches_baseline() {
        let result = engine().run(ScenarioInput::default());
        assert_eq!(result.predicted.supply_kg, 5000);
        assert_eq!(result.predicted.demand_kg, 4500);
        assert_eq!(result.predicted.gap_kg, -500);
        assert_eq!(result.predicted.price_index, 100.0);
        assert_eq!(result.predicted.risk_score, 25);
        assert_eq!(result.predicted.spoilage_pct, 3.0);
        assert!(result.recommendations.is_empty());
        assert_eq!(result.crop_impacts.len(), 6);
        for impact in &result.crop_impacts {
            assert_eq!(impact.price_change_pct, 0.0);
            assert_eq!(impact.risk, CropRisk::Low);
        }
    }

    #[test]
    fn test_rain_and_surge_example() {
        let result = engine().run(ScenarioInput::new(2.0, 30.0, 0.0));
        assert_eq!(result.predicted.supply_kg, 3800);
        assert_eq!(result.predicted.demand_kg, 5850);
        assert_eq!(result.predicted.gap_kg, 2050);
        // surge=30 不触发农户预警 (严格大于)
        assert_eq!(kinds(&result), vec![RecommendationKind::Shortfall]);
        assert_eq!(
            result.recommendations[0].text,
            "Shortfall of 2050kg/day — activate buffer stock or increase farmer procurement"
        );
    }

    #[test]
    fn test_surge_just_above_threshold_triggers_farmer_alert() {
        let result = engine().run(ScenarioInput::new(0.0, 31.0, 0.0));
        assert!(kinds(&result).contains(&RecommendationKind::FarmerAlert));
        let text = &result.recommendations.last().unwrap().text;
        assert_eq!(
            text,
            "Alert farmers to increase supply; consider temporary procurement premium"
        );
    }

    #[test]
    fn test_extreme_rain_hits_floor_and_cap() {
        let result = engine().run(ScenarioInput::new(100.0, 0.0, 0.0));
        assert_eq!(result.predicted.supply_kg, 1000);
        assert_eq!(result.predicted.risk_score, 100);
        assert_eq!(result.predicted.spoilage_pct, 40.0);
        assert_eq!(
            kinds(&result),
            vec![
                RecommendationKind::Shortfall,
                RecommendationKind::RiskAlert,
                RecommendationKind::ColdStorage,
                RecommendationKind::TruckPrepositioning,
            ]
        );
        assert_eq!(
            result.recommendations[2].text,
            "Spoilage rate 40% — activate cold storage for perishables"
        );
    }

    #[test]
    fn test_huge_surge_saturates_demand() {
        let result = engine().run(ScenarioInput::new(0.0, f64::MAX, 0.0));
        assert_eq!(result.predicted.demand_kg, i64::MAX);
        assert_eq!(result.predicted.supply_kg, 5000);
        assert_eq!(result.predicted.gap_kg, i64::MAX - 5000);
        assert_eq!(result.predicted.risk_score, 100);
        assert!(kinds(&result).contains(&RecommendationKind::Shortfall));
    }

    #[test]
    fn test_rain_is_monotonic() {
        let mut prev = engine().run(ScenarioInput::new(0.0, 15.0, 20.0)).predicted;
        for step in 1..=40 {
            let rain = step as f64 * 0.5;
            let next = engine().run(ScenarioInput::new(rain, 15.0, 20.0)).predicted;
            assert!(next.supply_kg <= prev.supply_kg, "supply rose at rain={}", rain);
            assert!(next.price_index >= prev.price_index, "price fell at rain={}", rain);
            prev = next;
        }
    }

    #[test]
    fn test_transport_delay_impacts() {
        let f = impact_factors(&ScenarioInput::new(0.0, 0.0, 50.0));
        assert!((f.supply - 0.85).abs() < 1e-12);
        assert!((f.risk - 1.25).abs() < 1e-12);
        assert!((f.spoilage - 1.2).abs() < 1e-12);
        assert_eq!(f.price, 1.0);
        assert_eq!(f.demand, 1.0);
    }

    #[test]
    fn test_crop_risk_labels_follow_volatility() {
        let result = engine().run(ScenarioInput::new(1.0, 0.0, 0.0));
        // price_impact = 1.08 → 8% × (1 + vol)
        let tomato = &result.crop_impacts[0];
        assert_eq!(tomato.crop, "Tomato");
        assert_eq!(tomato.price_change_pct, 9.2);
        assert_eq!(tomato.risk, CropRisk::Medium);
        assert_eq!(tomato.supply_change_pct, -12.0);
    }

    #[test]
    fn test_spoilage_text_keeps_one_decimal() {
        // rain=3 → +0.6, delay=200 → +0.8, 3 × 2.4 = 7.2%
        let result = engine().run(ScenarioInput::new(3.0, 0.0, 200.0));
        assert_eq!(result.predicted.spoilage_pct, 7.2);
        assert_eq!(format_spoilage(12.0), "12.0");
        assert_eq!(format_spoilage(40.0), "40");
    }

    #[test]
    fn test_negative_inputs_follow_linear_formula() {
        // 负值不满足 > 0 条件,因子保持 1.0
        let result = engine().run(ScenarioInput::new(-2.0, -10.0, -5.0));
        assert_eq!(result.impacts, ImpactFactors::default());
        assert_eq!(result.predicted.supply_kg, 5000);
    }

    #[test]
    fn test_localized_recommendations() {
        let result = engine()
            .with_locale("zh-CN")
            .run(ScenarioInput::new(2.0, 30.0, 0.0));
        assert_eq!(kinds(&result), vec![RecommendationKind::Shortfall]);
        assert!(result.recommendations[0].text.contains("2050"));
    }
}
