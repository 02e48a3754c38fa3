// ==========================================
// Mandi 供应链智能引擎 - 领域类型定义
// ==========================================
// 职责: 目录、信号、车队、干预、情景的枚举类型
// 序列化格式: 与看板前端约定一致 (小写 / 显示名)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 种植季 (Season)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Kharif, // 雨季作物
    Rabi,   // 冬季作物
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Kharif => write!(f, "kharif"),
            Season::Rabi => write!(f, "rabi"),
        }
    }
}

// ==========================================
// 零售商需求档位 (Demand Tier)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for DemandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandTier::Low => write!(f, "low"),
            DemandTier::Medium => write!(f, "medium"),
            DemandTier::High => write!(f, "high"),
        }
    }
}

// ==========================================
// 车型 (Truck Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruckType {
    #[serde(rename = "Mini Truck")]
    Mini,
    #[serde(rename = "Medium Truck")]
    Medium,
    #[serde(rename = "Large Truck")]
    Large,
}

impl fmt::Display for TruckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruckType::Mini => write!(f, "Mini Truck"),
            TruckType::Medium => write!(f, "Medium Truck"),
            TruckType::Large => write!(f, "Large Truck"),
        }
    }
}

// ==========================================
// 压力信号类别 (Signal Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Price,
    Weather,
    Demand,
    Transport,
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::Price => write!(f, "price"),
            SignalType::Weather => write!(f, "weather"),
            SignalType::Demand => write!(f, "demand"),
            SignalType::Transport => write!(f, "transport"),
        }
    }
}

// ==========================================
// 严重程度 (Severity)
// ==========================================
// 红线: 严重程度唯一决定风险分权重
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// 风险分权重 (low=2, medium=6, high=12, critical=20)
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Low => 2,
            Severity::Medium => 6,
            Severity::High => 12,
            Severity::Critical => 20,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 风险等级 (Risk Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,      // <= 20
    Moderate, // > 20
    High,     // > 45
    Critical, // > 70
}

impl RiskLevel {
    /// 由风险分判定等级 (固定阈值)
    pub fn from_score(score: u32) -> Self {
        if score > 70 {
            RiskLevel::Critical
        } else if score > 45 {
            RiskLevel::High
        } else if score > 20 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

// ==========================================
// 价格趋势 (Trend)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// 按 ±2% 阈值判定趋势
    pub fn from_pct(trend_pct: f64) -> Self {
        if trend_pct > 2.0 {
            Trend::Up
        } else if trend_pct < -2.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

// ==========================================
// 车辆状态 (Truck Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruckStatus {
    Delivering,
    Returning,
    Loading,
    Idle,
    Delayed,
}

impl TruckStatus {
    /// 抽样顺序固定,影响确定性
    pub const ALL: [TruckStatus; 5] = [
        TruckStatus::Delivering,
        TruckStatus::Returning,
        TruckStatus::Loading,
        TruckStatus::Idle,
        TruckStatus::Delayed,
    ];

    /// 是否在途 (有 ETA)
    pub fn is_en_route(&self) -> bool {
        matches!(self, TruckStatus::Delivering | TruckStatus::Returning)
    }
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruckStatus::Delivering => write!(f, "delivering"),
            TruckStatus::Returning => write!(f, "returning"),
            TruckStatus::Loading => write!(f, "loading"),
            TruckStatus::Idle => write!(f, "idle"),
            TruckStatus::Delayed => write!(f, "delayed"),
        }
    }
}

// ==========================================
// 干预类别 / 紧迫度 / 状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionCategory {
    Buffer,
    Logistics,
    Communication,
    Pricing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionStatus {
    Pending,
}

// ==========================================
// 情景模拟: 作物风险 / 建议类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropRisk {
    Low,
    Medium,
    High,
}

impl CropRisk {
    /// |价格变化| > 15 → high, > 5 → medium
    pub fn from_price_change(price_change_pct: f64) -> Self {
        let magnitude = price_change_pct.abs();
        if magnitude > 15.0 {
            CropRisk::High
        } else if magnitude > 5.0 {
            CropRisk::Medium
        } else {
            CropRisk::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Shortfall,
    RiskAlert,
    ColdStorage,
    TruckPrepositioning,
    FarmerAlert,
}

// ==========================================
// 农户订单状态 (Order Status)
// ==========================================
// 序列化格式与数据库一致 (小写)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// 从数据库字符串解析
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(20), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(21), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(45), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(46), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(71), RiskLevel::Critical);
    }

    #[test]
    fn test_severity_weights() {
        assert_eq!(Severity::Low.weight(), 2);
        assert_eq!(Severity::Medium.weight(), 6);
        assert_eq!(Severity::High.weight(), 12);
        assert_eq!(Severity::Critical.weight(), 20);
    }

    #[test]
    fn test_trend_boundaries_are_exclusive() {
        assert_eq!(Trend::from_pct(2.0), Trend::Stable);
        assert_eq!(Trend::from_pct(2.1), Trend::Up);
        assert_eq!(Trend::from_pct(-2.0), Trend::Stable);
        assert_eq!(Trend::from_pct(-2.1), Trend::Down);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&TruckType::Large).unwrap(), "\"Large Truck\"");
        assert_eq!(serde_json::to_string(&RiskLevel::Moderate).unwrap(), "\"Moderate\"");
        assert_eq!(
            serde_json::to_string(&RecommendationKind::FarmerAlert).unwrap(),
            "\"farmer_alert\""
        );
    }
}
