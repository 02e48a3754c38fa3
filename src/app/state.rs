// ==========================================
// Mandi 供应链智能引擎 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{MandiApi, SupplyChainApi};
use crate::config::{ConfigManager, SupplyChainConfig};
use crate::db::{ensure_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::engine::{Clock, SystemClock};
use crate::repository::{FarmerOrderRepository, MandiItemRepository, MandiOwnerRepository};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "MANDI_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 已加载的供应链配置
    pub config: SupplyChainConfig,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 供应链智能API
    pub supply_chain_api: Arc<SupplyChainApi>,

    /// Mandi 业务API
    pub mandi_api: Arc<MandiApi>,
}

impl AppState {
    /// 创建新的AppState实例 (系统时钟)
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String) -> Result<Self, String> {
        Self::with_clock(db_path, Arc::new(SystemClock))
    }

    /// 使用指定时钟创建AppState
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表
    /// 2. 加载配置与参考目录
    /// 3. 创建所有API实例
    pub fn with_clock(db_path: String, clock: Arc<dyn Clock>) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        match read_schema_version(&conn) {
            Ok(Some(v)) if v > CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    "数据库 schema_version={} 高于当前代码期望的 {}",
                    v,
                    CURRENT_SCHEMA_VERSION
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("读取 schema_version 失败: {}", e),
        }
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 配置
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config = config_manager
            .load_supply_chain_config()
            .map_err(|e| format!("加载供应链配置失败: {}", e))?;
        let catalog = Arc::new(
            config_manager
                .load_catalog()
                .map_err(|e| format!("加载参考目录失败: {}", e))?,
        );

        // ==========================================
        // Repository 层
        // ==========================================
        let owner_repo = Arc::new(MandiOwnerRepository::new(conn.clone()));
        let item_repo = Arc::new(MandiItemRepository::new(conn.clone()));
        let order_repo = Arc::new(FarmerOrderRepository::new(conn));

        // ==========================================
        // API 层
        // ==========================================
        let supply_chain_api = Arc::new(SupplyChainApi::new(catalog, clock, config.clone()));
        let mandi_api = Arc::new(MandiApi::new(owner_repo, item_repo, order_repo));

        tracing::info!(
            locale = %config.default_locale,
            forecast_default_days = config.forecast_default_days,
            "AppState初始化完成"
        );

        Ok(Self {
            db_path,
            config,
            config_manager,
            supply_chain_api,
            mandi_api,
        })
    }

    /// 获取数据库路径
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// 按用户的货主档案定制供应链API (语言 / 默认坐标)
    pub fn supply_chain_for_user(&self, user_id: i64) -> Result<SupplyChainApi, crate::api::ApiError> {
        let owner = self.mandi_api.get_profile(user_id)?;
        Ok(self.supply_chain_api.for_owner(&owner))
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 MANDI_DB_PATH (非空时优先)
/// - 用户数据目录/mandi-supply-chain/mandi_supply_chain.db
/// - 无法获取数据目录时: ./mandi_supply_chain.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./mandi_supply_chain.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("mandi-supply-chain");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("mandi_supply_chain.db");
        }
    }

    path.to_string_lossy().to_string()
}
