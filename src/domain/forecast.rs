// ==========================================
// Mandi 供应链智能引擎 - 价格预测模型
// ==========================================

use crate::domain::types::Trend;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 历史窗口长度 (天)
pub const HISTORY_DAYS: usize = 14;

/// 趋势拟合窗口 (最后 N 个历史点)
pub const TREND_WINDOW: usize = 5;

/// 日期价格点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// 单作物价格预测
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceForecast {
    pub crop: String,
    pub emoji: String,
    pub current_price: f64,
    pub predicted_price: f64,
    pub horizon_days: i64,
    pub trend_pct: f64,
    pub trend: Trend,
    pub history: Vec<PricePoint>,  // today-13 .. today
    pub forecast: Vec<PricePoint>, // today+1 .. today+days
    pub volatility: f64,
}

/// 价格预测报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub forecasts: Vec<PriceForecast>,
    pub generated_at: NaiveDateTime,
}
