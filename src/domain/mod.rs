// ==========================================
// Mandi 供应链智能引擎 - 领域层
// ==========================================
// 职责: 值类型与枚举,每次请求重新构造,不做缓存
// ==========================================

pub mod catalog;
pub mod fleet;
pub mod forecast;
pub mod intervention;
pub mod mandi;
pub mod overview;
pub mod scenario;
pub mod signal;
pub mod types;

// 重导出核心实体
pub use catalog::{Catalog, CatalogError, Crop, GeoPoint, Retailer, Truck};
pub use fleet::{FleetEntry, FleetStatus, FleetSummary};
pub use forecast::{ForecastReport, PriceForecast, PricePoint};
pub use intervention::{Intervention, InterventionPlan};
pub use mandi::{
    MandiFarmerOrder, MandiFarmerOrderCreate, MandiFarmerOrderUpdate, MandiItem, MandiItemCreate,
    MandiItemUpdate, MandiOwner, MandiOwnerProfileUpdate,
};
pub use overview::{DailyThroughput, InventorySnapshot, OverviewKpis, SupplyOverview};
pub use scenario::{
    CropImpact, ImpactFactors, Recommendation, ScenarioBaseline, ScenarioInput,
    ScenarioPrediction, ScenarioResult,
};
pub use signal::{RiskAssessment, StressSignal};
