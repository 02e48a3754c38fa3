// ==========================================
// Mandi 供应链智能引擎 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供 CLI / 上层服务调用
// ==========================================

pub mod error;
pub mod mandi_api;
pub mod supply_chain_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use mandi_api::MandiApi;
pub use supply_chain_api::SupplyChainApi;
