// ==========================================
// Mandi 供应链智能引擎 - 干预建议模型
// ==========================================
// 说明: 干预从固定模板库抽样,不由信号生成
// ==========================================

use crate::domain::types::{InterventionCategory, InterventionStatus, RiskLevel, Urgency};
use serde::{Deserialize, Serialize};

/// 干预模板 (文本通过 i18n 键 intervention.<key>.* 解析)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterventionTemplate {
    pub key: &'static str,
    pub category: InterventionCategory,
    pub icon: &'static str,
    pub urgency: Urgency,
}

pub const INTERVENTION_TEMPLATES: [InterventionTemplate; 6] = [
    InterventionTemplate {
        key: "pre_stock_perishables",
        category: InterventionCategory::Buffer,
        icon: "📦",
        urgency: Urgency::High,
    },
    InterventionTemplate {
        key: "reroute_ring_road",
        category: InterventionCategory::Logistics,
        icon: "🔄",
        urgency: Urgency::Medium,
    },
    InterventionTemplate {
        key: "early_price_alert",
        category: InterventionCategory::Communication,
        icon: "📢",
        urgency: Urgency::High,
    },
    InterventionTemplate {
        key: "cold_storage_chillies",
        category: InterventionCategory::Buffer,
        icon: "❄️",
        urgency: Urgency::Medium,
    },
    InterventionTemplate {
        key: "surge_pricing_whitefield",
        category: InterventionCategory::Pricing,
        icon: "💰",
        urgency: Urgency::Low,
    },
    InterventionTemplate {
        key: "festival_extra_trucks",
        category: InterventionCategory::Logistics,
        icon: "🚛",
        urgency: Urgency::Critical,
    },
];

/// 干预建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: u32, // 按抽样顺序 1..k
    pub title: String,
    pub category: InterventionCategory,
    pub icon: String,
    pub description: String,
    pub impact: String,
    pub cost: String,
    pub urgency: Urgency,
    pub trade_off: String,
    pub status: InterventionStatus,
}

/// 干预计划
///
/// `total_potential_savings` 为独立抽样的展示数字,与所选干预成本无关。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionPlan {
    pub interventions: Vec<Intervention>,
    pub total_potential_savings: String,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
}
