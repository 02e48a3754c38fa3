// ==========================================
// Mandi 供应链智能引擎 - 库存概览模型
// ==========================================
// 用途: 驾驶舱 KPI、库存快照、7 日进出库序列
// 红线: value = round(qty_kg × price_per_kg)
// ==========================================

use crate::domain::catalog::GeoPoint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单作物库存快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub crop: String,
    pub emoji: String,
    pub qty_kg: i64,
    pub price_per_kg: f64,
    pub value: i64,
    pub change_pct: f64,
}

/// 单日吞吐量 (全部作物汇总)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyThroughput {
    pub date: NaiveDate,
    pub qty_kg: i64,
}

/// 驾驶舱 KPI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewKpis {
    pub total_inventory_kg: i64,
    pub total_value: i64,
    pub daily_inbound_avg: i64,
    pub daily_outbound_avg: i64,
    pub active_farmers: i64,
    pub active_retailers: usize,
    pub trucks_active: usize,
    pub pending_orders: i64,
}

/// 供应概览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyOverview {
    pub kpis: OverviewKpis,
    pub inventory: Vec<InventorySnapshot>, // 按 value 降序
    pub inbound_7d: Vec<DailyThroughput>,  // 旧 → 新, 含今天
    pub outbound_7d: Vec<DailyThroughput>,
    pub mandi: GeoPoint,
}
