// ==========================================
// Mandi 供应链智能引擎 - 配置层
// ==========================================
// 职责: 系统配置管理 (Mandi 坐标 / 预测窗口 / 语言 / 目录覆写)
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod supply_chain_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use supply_chain_config::SupplyChainConfig;
