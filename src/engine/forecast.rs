// ==========================================
// Mandi 供应链智能引擎 - 价格预测引擎
// ==========================================
// 职责: 14 日有界随机游走历史 + 短期趋势外推
// 输入: 参考目录 + 日随机源 + 预测天数
// 输出: ForecastReport
// ==========================================
// 规则 (逐作物,按目录顺序):
// 1) price = base + U(-5,5)
// 2) 历史 14 步: price += U(-2,2.5)·vol·10, 先增量后截断到 [0.5·base, 2·base]
// 3) trend = (末点 - 倒数第 5 点) / 5 (取整后的历史价格)
// 4) 预测 N 步: fp += trend + U(-1,1)·vol·5, 同样先增量后截断
// ==========================================

use crate::domain::catalog::{Catalog, Crop};
use crate::domain::forecast::{
    ForecastReport, PriceForecast, PricePoint, HISTORY_DAYS, TREND_WINDOW,
};
use crate::domain::types::Trend;
use crate::engine::clock::Clock;
use crate::engine::numeric::{clamp, round_to};
use crate::engine::seed::SeedProvider;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::sync::Arc;
use tracing::instrument;

/// 默认预测天数
pub const DEFAULT_FORECAST_DAYS: i64 = 7;

/// 预测天数上限 (API 层拒绝超出值, 引擎内截断)
pub const MAX_FORECAST_DAYS: i64 = 365;

/// 价格下限系数
pub const PRICE_FLOOR_RATIO: f64 = 0.5;

/// 价格上限系数
pub const PRICE_CEILING_RATIO: f64 = 2.0;

/// 作物价格边界
pub fn price_bounds(crop: &Crop) -> (f64, f64) {
    (
        crop.base_price * PRICE_FLOOR_RATIO,
        crop.base_price * PRICE_CEILING_RATIO,
    )
}

// ==========================================
// ForecastEngine - 价格预测引擎
// ==========================================
pub struct ForecastEngine {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    seeds: SeedProvider,
}

impl ForecastEngine {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>) -> Self {
        let seeds = SeedProvider::new(clock.clone());
        Self {
            catalog,
            clock,
            seeds,
        }
    }

    /// 生成全部作物的价格预测
    ///
    /// # 参数
    /// - `days`: 预测天数; <= 0 时预测序列为空 (不报错), 超过 MAX_FORECAST_DAYS 时截断
    #[instrument(skip(self))]
    pub fn forecast(&self, days: i64) -> ForecastReport {
        let days = if days > MAX_FORECAST_DAYS {
            tracing::warn!(days, max = MAX_FORECAST_DAYS, "预测天数超出上限,已截断");
            MAX_FORECAST_DAYS
        } else {
            days
        };
        let mut rng = self.seeds.daily_rng();
        let today = self.clock.today();

        let forecasts = self
            .catalog
            .crops()
            .iter()
            .map(|crop| self.forecast_crop(&mut rng, crop, today, days))
            .collect();

        ForecastReport {
            forecasts,
            generated_at: self.clock.now_naive(),
        }
    }

    /// 单作物: 历史游走 + 趋势外推
    fn forecast_crop<R: Rng>(
        &self,
        rng: &mut R,
        crop: &Crop,
        today: NaiveDate,
        days: i64,
    ) -> PriceForecast {
        let (floor, ceiling) = price_bounds(crop);

        // 1. 历史 (today-13 .. today)
        let mut price = crop.base_price + rng.gen_range(-5.0..5.0);
        let mut history = Vec::with_capacity(HISTORY_DAYS);
        for d in 0..HISTORY_DAYS as i64 {
            price += rng.gen_range(-2.0..2.5) * crop.volatility * 10.0;
            price = clamp(price, floor, ceiling);
            history.push(PricePoint {
                date: today - Duration::days(HISTORY_DAYS as i64 - 1 - d),
                price: round_to(price, 2),
            });
        }

        // 2. 趋势 (最后 5 个历史点)
        let window = &history[history.len() - TREND_WINDOW..];
        let last_price = window[TREND_WINDOW - 1].price;
        let trend = (last_price - window[0].price) / TREND_WINDOW as f64;

        // 3. 预测 (today+1 .. today+days)
        let mut fp = last_price;
        let mut forecast = Vec::new();
        for d in 0..days.max(0) {
            fp += trend + rng.gen_range(-1.0..1.0) * crop.volatility * 5.0;
            fp = clamp(fp, floor, ceiling);
            forecast.push(PricePoint {
                date: today + Duration::days(d + 1),
                price: round_to(fp, 2),
            });
        }

        // 4. 趋势判定 (无预测点时视为持平)
        let predicted_price = forecast.last().map(|p| p.price).unwrap_or(last_price);
        let trend_pct = round_to((predicted_price - last_price) / last_price * 100.0, 1);

        PriceForecast {
            crop: crop.name.clone(),
            emoji: crop.emoji.clone(),
            current_price: last_price,
            predicted_price,
            horizon_days: days,
            trend_pct,
            trend: Trend::from_pct(trend_pct),
            history,
            forecast,
            volatility: crop.volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;

    fn engine_on(y: i32, m: u32, d: u32) -> ForecastEngine {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        ForecastEngine::new(
            Arc::new(Catalog::standard()),
            Arc::new(FixedClock::at(date, 12).unwrap()),
        )
    }

    #[test]
    fn test_history_and_forecast_lengths() {
        for days in [1, 7, 14, 30] {
            let report = engine_on(2026, 4, 1).forecast(days);
            assert_eq!(report.forecasts.len(), 8);
            for f in &report.forecasts {
                assert_eq!(f.history.len(), 14);
                assert_eq!(f.forecast.len(), days as usize);
            }
        }
    }

    #[test]
    fn test_non_positive_days_yield_empty_forecast() {
        for days in [0, -3] {
            let report = engine_on(2026, 4, 1).forecast(days);
            for f in &report.forecasts {
                assert!(f.forecast.is_empty());
                assert_eq!(f.history.len(), 14);
                assert_eq!(f.predicted_price, f.current_price);
                assert_eq!(f.trend_pct, 0.0);
                assert_eq!(f.trend, Trend::Stable);
            }
        }
    }

    #[test]
    fn test_oversized_horizon_is_capped() {
        let report = engine_on(2026, 4, 1).forecast(i64::MAX);
        for f in &report.forecasts {
            assert_eq!(f.forecast.len(), MAX_FORECAST_DAYS as usize);
            assert_eq!(f.horizon_days, MAX_FORECAST_DAYS);
        }
    }

    #[test]
    fn test_prices_stay_within_bounds() {
        let catalog = Catalog::standard();
        for day in 1..=30 {
            let report = engine_on(2026, 6, day).forecast(21);
            for (f, crop) in report.forecasts.iter().zip(catalog.crops()) {
                let (floor, ceiling) = price_bounds(crop);
                for point in f.history.iter().chain(f.forecast.iter()) {
                    assert!(
                        point.price >= floor && point.price <= ceiling,
                        "{} price {} outside [{}, {}]",
                        f.crop,
                        point.price,
                        floor,
                        ceiling
                    );
                }
            }
        }
    }

    #[test]
    fn test_dates_are_contiguous() {
        let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let report = engine_on(2026, 4, 1).forecast(7);
        let f = &report.forecasts[0];
        assert_eq!(f.history[0].date, today - Duration::days(13));
        assert_eq!(f.history[13].date, today);
        assert_eq!(f.forecast[0].date, today + Duration::days(1));
        assert_eq!(f.forecast[6].date, today + Duration::days(7));
        assert_eq!(f.current_price, f.history[13].price);
        assert_eq!(f.predicted_price, f.forecast[6].price);
    }

    #[test]
    fn test_trend_label_matches_pct() {
        let report = engine_on(2026, 4, 1).forecast(7);
        for f in &report.forecasts {
            assert_eq!(f.trend, Trend::from_pct(f.trend_pct));
        }
    }

    #[test]
    fn test_same_day_deterministic_and_horizon_prefix_stable() {
        let a = engine_on(2026, 4, 1).forecast(7);
        let b = engine_on(2026, 4, 1).forecast(7);
        assert_eq!(a, b);

        // 更短的预测窗口不影响第一作物的历史
        let short = engine_on(2026, 4, 1).forecast(3);
        assert_eq!(short.forecasts[0].history, a.forecasts[0].history);
        assert_eq!(short.forecasts[0].forecast[..], a.forecasts[0].forecast[..3]);
    }

    #[test]
    fn test_next_day_differs() {
        let a = engine_on(2026, 4, 1).forecast(7);
        let b = engine_on(2026, 4, 2).forecast(7);
        assert_ne!(a.forecasts, b.forecasts);
    }
}
