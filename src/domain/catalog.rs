// ==========================================
// Mandi 供应链智能引擎 - 参考目录
// ==========================================
// 职责: 作物 / 零售商 / 车辆静态目录
// 约束: 不可变数据,通过 Arc<Catalog> 注入各引擎
// ==========================================

use crate::domain::types::{DemandTier, Season, TruckType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ==========================================
// 实体定义
// ==========================================

/// 作物
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub name: String,
    pub emoji: String,
    pub base_price: f64, // 基准价 (货币/kg)
    pub volatility: f64, // 波动系数 (0,1)
    pub season: Season,
}

/// 零售商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retailer {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub demand: DemandTier,
}

/// 车辆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: String,
    pub driver: String,
    pub capacity_kg: u32,
    #[serde(rename = "type")]
    pub truck_type: TruckType,
}

/// 地理坐标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

// ==========================================
// 目录校验错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("目录为空: {0}")]
    EmptyList(&'static str),

    #[error("作物波动系数越界: crop={crop}, volatility={volatility}")]
    VolatilityOutOfRange { crop: String, volatility: f64 },

    #[error("作物基准价无效: crop={crop}, base_price={base_price}")]
    InvalidBasePrice { crop: String, base_price: f64 },

    #[error("车辆载重不足: truck={truck}, capacity_kg={capacity_kg} (最小 {min_kg})")]
    CapacityTooSmall {
        truck: String,
        capacity_kg: u32,
        min_kg: u32,
    },
}

/// 车辆最小载重 (货物抽样下限)
pub const MIN_TRUCK_CAPACITY_KG: u32 = 500;

// ==========================================
// Catalog - 参考目录
// ==========================================
/// 字段私有, 只能经 `new` / `from_json` 校验后构造
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    crops: Vec<Crop>,
    retailers: Vec<Retailer>,
    trucks: Vec<Truck>,
}

impl Catalog {
    /// 构造并校验目录
    ///
    /// # 规则
    /// - 三个列表均非空
    /// - 作物波动系数 ∈ (0,1), 基准价 > 0
    /// - 车辆载重 >= 500kg
    pub fn new(
        crops: Vec<Crop>,
        retailers: Vec<Retailer>,
        trucks: Vec<Truck>,
    ) -> Result<Self, CatalogError> {
        if crops.is_empty() {
            return Err(CatalogError::EmptyList("crops"));
        }
        if retailers.is_empty() {
            return Err(CatalogError::EmptyList("retailers"));
        }
        if trucks.is_empty() {
            return Err(CatalogError::EmptyList("trucks"));
        }

        for crop in &crops {
            if !(crop.volatility > 0.0 && crop.volatility < 1.0) {
                return Err(CatalogError::VolatilityOutOfRange {
                    crop: crop.name.clone(),
                    volatility: crop.volatility,
                });
            }
            if !(crop.base_price > 0.0) || !crop.base_price.is_finite() {
                return Err(CatalogError::InvalidBasePrice {
                    crop: crop.name.clone(),
                    base_price: crop.base_price,
                });
            }
        }

        for truck in &trucks {
            if truck.capacity_kg < MIN_TRUCK_CAPACITY_KG {
                return Err(CatalogError::CapacityTooSmall {
                    truck: truck.id.clone(),
                    capacity_kg: truck.capacity_kg,
                    min_kg: MIN_TRUCK_CAPACITY_KG,
                });
            }
        }

        Ok(Self {
            crops,
            retailers,
            trucks,
        })
    }

    /// 从 JSON 解析并校验 (配置覆写用)
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        #[derive(Deserialize)]
        struct RawCatalog {
            crops: Vec<Crop>,
            retailers: Vec<Retailer>,
            trucks: Vec<Truck>,
        }

        let parsed: RawCatalog = serde_json::from_str(raw)?;
        Ok(Self::new(parsed.crops, parsed.retailers, parsed.trucks)?)
    }

    /// 标准目录: 8 种作物 / 6 家零售商 / 5 辆车 (班加罗尔)
    pub fn standard() -> Self {
        let crop = |name: &str, emoji: &str, base_price: f64, volatility: f64, season: Season| Crop {
            name: name.to_string(),
            emoji: emoji.to_string(),
            base_price,
            volatility,
            season,
        };
        let retailer = |id: u32, name: &str, lat: f64, lng: f64, demand: DemandTier| Retailer {
            id,
            name: name.to_string(),
            lat,
            lng,
            demand,
        };
        let truck = |id: &str, driver: &str, capacity_kg: u32, truck_type: TruckType| Truck {
            id: id.to_string(),
            driver: driver.to_string(),
            capacity_kg,
            truck_type,
        };

        Self {
            crops: vec![
                crop("Tomato", "🍅", 45.0, 0.15, Season::Kharif),
                crop("Onion", "🧅", 35.0, 0.25, Season::Rabi),
                crop("Potato", "🥔", 25.0, 0.10, Season::Rabi),
                crop("Rice", "🍚", 55.0, 0.05, Season::Kharif),
                crop("Wheat", "🌾", 30.0, 0.08, Season::Rabi),
                crop("Carrot", "🥕", 40.0, 0.12, Season::Rabi),
                crop("Cabbage", "🥬", 20.0, 0.18, Season::Kharif),
                crop("Green Chilli", "🌶️", 60.0, 0.30, Season::Kharif),
            ],
            retailers: vec![
                retailer(1, "Fresh Mart - Koramangala", 12.9352, 77.6245, DemandTier::High),
                retailer(2, "Veggie Express - Indiranagar", 12.9784, 77.6408, DemandTier::Medium),
                retailer(3, "Daily Basket - HSR Layout", 12.9116, 77.6474, DemandTier::High),
                retailer(4, "Green Grocer - Whitefield", 12.9698, 77.7500, DemandTier::Low),
                retailer(5, "Farm Fresh - JP Nagar", 12.9063, 77.5857, DemandTier::Medium),
                retailer(6, "Nature's Cart - Malleshwaram", 13.0035, 77.5710, DemandTier::High),
            ],
            trucks: vec![
                truck("TRK-001", "Raju", 2000, TruckType::Mini),
                truck("TRK-002", "Suresh", 5000, TruckType::Medium),
                truck("TRK-003", "Ahmed", 3000, TruckType::Mini),
                truck("TRK-004", "Prakash", 8000, TruckType::Large),
                truck("TRK-005", "Vijay", 2500, TruckType::Mini),
            ],
        }
    }

    pub fn crops(&self) -> &[Crop] {
        &self.crops
    }

    pub fn retailers(&self) -> &[Retailer] {
        &self.retailers
    }

    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
