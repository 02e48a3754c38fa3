// ==========================================
// Mandi 供应链智能引擎 - 数据仓储层
// ==========================================
// 职责: 数据访问抽象, 不含业务逻辑
// 红线: Repository 不含业务逻辑
// ==========================================

pub mod error;
pub mod farmer_order_repo;
pub mod mandi_item_repo;
pub mod mandi_owner_repo;

// 重导出
pub use error::{RepositoryError, RepositoryResult};
pub use farmer_order_repo::FarmerOrderRepository;
pub use mandi_item_repo::MandiItemRepository;
pub use mandi_owner_repo::MandiOwnerRepository;
