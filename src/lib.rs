// ==========================================
// Mandi 供应链智能引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 决策支持系统 (确定性模拟, 人工最终决策)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 确定性模拟
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{RiskLevel, Severity, Trend, TruckStatus};

// 领域实体
pub use domain::{
    Catalog, FleetStatus, ForecastReport, InterventionPlan, RiskAssessment, ScenarioInput,
    ScenarioResult, SupplyOverview,
};

// 引擎
pub use engine::{
    Clock, FixedClock, FleetEngine, ForecastEngine, InterventionEngine, OverviewEngine,
    ScenarioEngine, StressEngine, SystemClock,
};

// API
pub use api::{ApiError, ApiResult, MandiApi, SupplyChainApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Mandi 供应链智能引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
