// ==========================================
// Mandi 供应链智能引擎 - 情景模拟模型
// ==========================================

use crate::domain::types::{CropRisk, RecommendationKind};
use serde::{Deserialize, Serialize};

/// 情景输入 (均默认 0, 不做上限约束)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(default)]
    pub rain_days: f64,
    #[serde(default)]
    pub demand_surge_pct: f64,
    #[serde(default)]
    pub transport_delay_pct: f64,
}

impl ScenarioInput {
    pub fn new(rain_days: f64, demand_surge_pct: f64, transport_delay_pct: f64) -> Self {
        Self {
            rain_days,
            demand_surge_pct,
            transport_delay_pct,
        }
    }

    /// 是否含负值输入 (按线性公式计算,仅告警)
    pub fn has_negative(&self) -> bool {
        self.rain_days < 0.0 || self.demand_surge_pct < 0.0 || self.transport_delay_pct < 0.0
    }
}

/// 基线常量
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBaseline {
    pub supply_kg: i64,
    pub demand_kg: i64,
    pub price_index: f64,
    pub risk_score: u32,
    pub spoilage_pct: f64,
}

pub const BASELINE: ScenarioBaseline = ScenarioBaseline {
    supply_kg: 5000,
    demand_kg: 4500,
    price_index: 100.0,
    risk_score: 25,
    spoilage_pct: 3.0,
};

/// 乘性影响因子 (初始 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactFactors {
    pub supply: f64,
    pub demand: f64,
    pub price: f64,
    pub risk: f64,
    pub spoilage: f64,
}

impl Default for ImpactFactors {
    fn default() -> Self {
        Self {
            supply: 1.0,
            demand: 1.0,
            price: 1.0,
            risk: 1.0,
            spoilage: 1.0,
        }
    }
}

/// 预测指标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPrediction {
    pub supply_kg: i64,
    pub demand_kg: i64,
    pub gap_kg: i64,
    pub price_index: f64,
    pub risk_score: u32,
    pub spoilage_pct: f64,
}

/// 单作物影响
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropImpact {
    pub crop: String,
    pub emoji: String,
    pub price_change_pct: f64,
    pub supply_change_pct: f64,
    pub risk: CropRisk,
}

/// 建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub icon: String,
    pub text: String,
}

/// 情景模拟结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: ScenarioInput,
    pub baseline: ScenarioBaseline,
    pub impacts: ImpactFactors,
    pub predicted: ScenarioPrediction,
    pub crop_impacts: Vec<CropImpact>,
    pub recommendations: Vec<Recommendation>,
}
