// ==========================================
// Mandi 供应链智能引擎 - 供应链配置
// ==========================================
// 存储位置: config_kv (scope_id='global')
// ==========================================

use crate::domain::catalog::GeoPoint;
use crate::engine::forecast::DEFAULT_FORECAST_DAYS;
use crate::i18n::DEFAULT_LOCALE;
use serde::{Deserialize, Serialize};

/// 默认 Mandi 纬度 (班加罗尔)
pub const DEFAULT_MANDI_LATITUDE: f64 = 12.97;

/// 默认 Mandi 经度 (班加罗尔)
pub const DEFAULT_MANDI_LONGITUDE: f64 = 77.59;

/// 供应链配置 (类型化视图)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainConfig {
    /// 未指定坐标时使用的 Mandi 位置
    pub mandi_latitude: f64,
    pub mandi_longitude: f64,

    /// 未指定天数时的预测窗口
    pub forecast_default_days: i64,

    /// 引擎文案默认语言
    pub default_locale: String,
}

impl SupplyChainConfig {
    pub fn mandi(&self) -> GeoPoint {
        GeoPoint::new(self.mandi_latitude, self.mandi_longitude)
    }
}

impl Default for SupplyChainConfig {
    fn default() -> Self {
        Self {
            mandi_latitude: DEFAULT_MANDI_LATITUDE,
            mandi_longitude: DEFAULT_MANDI_LONGITUDE,
            forecast_default_days: DEFAULT_FORECAST_DAYS,
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}
