// ==========================================
// Mandi 供应链智能引擎 - 压力信号模型
// ==========================================
// 用途: 价格 / 天气 / 需求 / 运输 四类信号 + 风险评估
// 红线: 严重程度唯一决定风险分权重
// ==========================================

use crate::domain::types::{RiskLevel, Severity, SignalType};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 压力信号
///
/// 各类别通过 `StressEngine` 中的专用构造函数生成,字段集合固定。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressSignal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub severity: Severity,
    pub icon: String,
    pub title: String,
    pub detail: String,
    pub impact: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
}

impl StressSignal {
    /// 风险分贡献
    pub fn weight(&self) -> u32 {
        self.severity.weight()
    }
}

/// 风险评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: u32, // [0,100]
    pub risk_level: RiskLevel,
    pub signals: Vec<StressSignal>,
    pub signal_count: usize,
    pub last_updated: NaiveDateTime,
}

/// 天气模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherTemplate {
    pub key: &'static str, // i18n 键后缀
    pub severity: Severity,
    pub icon: &'static str,
}

/// 运输问题模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTemplate {
    pub key: &'static str,
    pub severity: Severity,
}

/// 天气模板库 (最后一项"晴好"不参与抽样)
pub const WEATHER_TEMPLATES: [WeatherTemplate; 4] = [
    WeatherTemplate { key: "heavy_rain", severity: Severity::High, icon: "🌧️" },
    WeatherTemplate { key: "heatwave", severity: Severity::Medium, icon: "🌡️" },
    WeatherTemplate { key: "cyclone", severity: Severity::Critical, icon: "🌀" },
    WeatherTemplate { key: "clear_skies", severity: Severity::Low, icon: "☀️" },
];

/// 可抽样的不利天气数量
pub const ADVERSE_WEATHER_COUNT: usize = 3;

pub const TRANSPORT_TEMPLATES: [TransportTemplate; 3] = [
    TransportTemplate { key: "highway_construction", severity: Severity::High },
    TransportTemplate { key: "driver_strike", severity: Severity::Critical },
    TransportTemplate { key: "road_flooding", severity: Severity::Medium },
];

/// 节日 (i18n 键后缀)
pub const FESTIVALS: [&str; 4] = ["pongal", "ugadi", "wedding_season", "diwali"];
