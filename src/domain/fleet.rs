// ==========================================
// Mandi 供应链智能引擎 - 车队状态模型
// ==========================================

use crate::domain::catalog::{GeoPoint, Retailer};
use crate::domain::types::{TruckStatus, TruckType};
use serde::{Deserialize, Serialize};

/// 目的地为 Mandi 时的标签
pub const MANDI_LABEL: &str = "Mandi";

/// 无目的地时的标签
pub const NO_DESTINATION_LABEL: &str = "—";

/// 单车状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetEntry {
    pub id: String,
    pub driver: String,
    pub capacity_kg: u32,
    #[serde(rename = "type")]
    pub truck_type: TruckType,
    pub status: TruckStatus,
    pub cargo: String, // "{emoji} {name}"
    pub cargo_crop: String,
    pub cargo_kg: u32,
    pub utilization_pct: u32,
    pub destination: String,
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub dest_lat: f64,
    pub dest_lng: f64,
    pub current_lat: f64,
    pub current_lng: f64,
    pub distance_km: f64, // 当前位置 → 目的地
    pub eta_min: u32,
}

/// 车队汇总 (按状态计数)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub total: usize,
    pub delivering: usize,
    pub returning: usize,
    pub loading: usize,
    pub idle: usize,
    pub delayed: usize,
}

impl FleetSummary {
    /// 按状态聚合
    pub fn from_entries(entries: &[FleetEntry]) -> Self {
        let mut summary = FleetSummary {
            total: entries.len(),
            ..Default::default()
        };
        for entry in entries {
            match entry.status {
                TruckStatus::Delivering => summary.delivering += 1,
                TruckStatus::Returning => summary.returning += 1,
                TruckStatus::Loading => summary.loading += 1,
                TruckStatus::Idle => summary.idle += 1,
                TruckStatus::Delayed => summary.delayed += 1,
            }
        }
        summary
    }
}

/// 车队状态报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetStatus {
    pub fleet: Vec<FleetEntry>,
    pub retailers: Vec<Retailer>,
    pub mandi: GeoPoint,
    pub summary: FleetSummary,
}
