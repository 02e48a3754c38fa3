// ==========================================
// Mandi 供应链智能引擎 - 引擎层
// ==========================================
// 职责: 确定性模拟引擎 (概览 / 压力 / 预测 / 车队 / 干预 / 情景)
// 红线: Engine 不拼 SQL, 随机性只来自 SeedProvider
// ==========================================

pub mod clock;
pub mod fleet;
pub mod forecast;
pub mod intervention;
pub mod numeric;
pub mod overview;
pub mod scenario;
pub mod seed;
pub mod stress;

// 重导出核心引擎
pub use clock::{Clock, FixedClock, SystemClock};
pub use fleet::FleetEngine;
pub use forecast::{ForecastEngine, DEFAULT_FORECAST_DAYS, MAX_FORECAST_DAYS};
pub use intervention::InterventionEngine;
pub use overview::OverviewEngine;
pub use scenario::ScenarioEngine;
pub use seed::SeedProvider;
pub use stress::StressEngine;
