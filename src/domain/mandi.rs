// ==========================================
// Mandi 供应链智能引擎 - Mandi 业务实体
// ==========================================
// 用途: 货主档案 / 库存品项 / 农户订单 (持久化于 SQLite)
// ==========================================

use crate::domain::types::OrderStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// MandiOwner - 货主档案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandiOwner {
    pub id: i64,
    pub user_id: i64,
    pub owner_name: String,
    pub contact: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub language: String, // 看板文案语言 (en / zh-CN)
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// 档案部分更新 (None 表示不修改)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MandiOwnerProfileUpdate {
    pub contact: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub language: Option<String>,
}

// ==========================================
// MandiItem - 库存品项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandiItem {
    pub id: i64,
    pub mandi_owner_id: i64,
    pub item_name: String,
    pub current_qty: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandiItemCreate {
    pub item_name: String,
    pub current_qty: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MandiItemUpdate {
    pub item_name: Option<String>,
    pub current_qty: Option<f64>,
}

// ==========================================
// MandiFarmerOrder - 农户订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandiFarmerOrder {
    pub id: i64,
    pub mandi_owner_id: i64,
    pub farmer_name: String,
    pub item_name: String,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandiFarmerOrderCreate {
    pub farmer_name: String,
    pub item_name: String,
    pub quantity_kg: f64,
    pub price_per_kg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MandiFarmerOrderUpdate {
    pub farmer_name: Option<String>,
    pub item_name: Option<String>,
    pub quantity_kg: Option<f64>,
    pub price_per_kg: Option<f64>,
    pub status: Option<OrderStatus>,
}
