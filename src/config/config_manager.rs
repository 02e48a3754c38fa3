// ==========================================
// Mandi 供应链智能引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::supply_chain_config::SupplyChainConfig;
use crate::db::configure_sqlite_connection;
use crate::domain::catalog::Catalog;
use crate::engine::forecast::MAX_FORECAST_DAYS;
use crate::i18n::is_supported;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 配置 (UPSERT)
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(key, "配置已更新");
        Ok(())
    }

    /// 读取并解析配置值; 缺失或无法解析时返回默认值 (无法解析时告警)
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr,
    {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    tracing::warn!(key, value = %raw, "配置值无法解析,使用默认值");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    // ===== 供应链配置 =====

    /// 加载类型化供应链配置
    ///
    /// # 说明
    /// 坐标越界 / 不支持的语言同样回退默认值并告警
    pub fn load_supply_chain_config(&self) -> Result<SupplyChainConfig, Box<dyn Error>> {
        let defaults = SupplyChainConfig::default();

        let mut latitude =
            self.get_parsed_or_default(config_keys::MANDI_LATITUDE, defaults.mandi_latitude)?;
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            tracing::warn!(latitude, "mandi_latitude 越界,使用默认值");
            latitude = defaults.mandi_latitude;
        }

        let mut longitude =
            self.get_parsed_or_default(config_keys::MANDI_LONGITUDE, defaults.mandi_longitude)?;
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            tracing::warn!(longitude, "mandi_longitude 越界,使用默认值");
            longitude = defaults.mandi_longitude;
        }

        let mut forecast_default_days = self.get_parsed_or_default(
            config_keys::FORECAST_DEFAULT_DAYS,
            defaults.forecast_default_days,
        )?;
        if forecast_default_days > MAX_FORECAST_DAYS {
            tracing::warn!(
                forecast_default_days,
                max = MAX_FORECAST_DAYS,
                "forecast_default_days 超出上限,使用默认值"
            );
            forecast_default_days = defaults.forecast_default_days;
        }

        let mut default_locale = self
            .get_config_value(config_keys::DEFAULT_LOCALE)?
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| defaults.default_locale.clone());
        if !is_supported(&default_locale) {
            tracing::warn!(locale = %default_locale, "default_locale 不受支持,使用默认值");
            default_locale = defaults.default_locale.clone();
        }

        Ok(SupplyChainConfig {
            mandi_latitude: latitude,
            mandi_longitude: longitude,
            forecast_default_days,
            default_locale,
        })
    }

    /// 加载参考目录
    ///
    /// # 返回
    /// - 未配置 supply_chain_catalog: 标准目录
    /// - 已配置: 解析并校验后的目录; 校验失败返回错误 (不静默回退)
    pub fn load_catalog(&self) -> Result<Catalog, Box<dyn Error>> {
        match self.get_config_value(config_keys::SUPPLY_CHAIN_CATALOG)? {
            Some(raw) => {
                let catalog = Catalog::from_json(&raw)
                    .map_err(|e| format!("supply_chain_catalog 配置无效: {}", e))?;
                tracing::info!(
                    crops = catalog.crops().len(),
                    retailers = catalog.retailers().len(),
                    trucks = catalog.trucks().len(),
                    "使用配置覆写的参考目录"
                );
                Ok(catalog)
            }
            None => Ok(Catalog::standard()),
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // Mandi 默认坐标
    pub const MANDI_LATITUDE: &str = "mandi_latitude";
    pub const MANDI_LONGITUDE: &str = "mandi_longitude";

    // 价格预测
    pub const FORECAST_DEFAULT_DAYS: &str = "forecast_default_days";

    // 文案语言
    pub const DEFAULT_LOCALE: &str = "default_locale";

    // 参考目录覆写 (JSON)
    pub const SUPPLY_CHAIN_CATALOG: &str = "supply_chain_catalog";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = manager().load_supply_chain_config().unwrap();
        assert_eq!(cfg, SupplyChainConfig::default());
        assert_eq!(cfg.mandi_latitude, 12.97);
        assert_eq!(cfg.mandi_longitude, 77.59);
        assert_eq!(cfg.forecast_default_days, 7);
        assert_eq!(cfg.default_locale, "en");
    }

    #[test]
    fn test_overrides_and_fallbacks() {
        let m = manager();
        m.set_config_value(config_keys::MANDI_LATITUDE, "13.02").unwrap();
        m.set_config_value(config_keys::MANDI_LONGITUDE, "not-a-number").unwrap();
        m.set_config_value(config_keys::FORECAST_DEFAULT_DAYS, "14").unwrap();
        m.set_config_value(config_keys::DEFAULT_LOCALE, "fr").unwrap();

        let cfg = m.load_supply_chain_config().unwrap();
        assert_eq!(cfg.mandi_latitude, 13.02);
        assert_eq!(cfg.mandi_longitude, 77.59);
        assert_eq!(cfg.forecast_default_days, 14);
        assert_eq!(cfg.default_locale, "en");

        // UPSERT 覆盖旧值
        m.set_config_value(config_keys::DEFAULT_LOCALE, "zh-CN").unwrap();
        assert_eq!(m.load_supply_chain_config().unwrap().default_locale, "zh-CN");
    }

    #[test]
    fn test_out_of_range_latitude_falls_back() {
        let m = manager();
        m.set_config_value(config_keys::MANDI_LATITUDE, "123.4").unwrap();
        assert_eq!(m.load_supply_chain_config().unwrap().mandi_latitude, 12.97);
    }

    #[test]
    fn test_oversized_forecast_days_falls_back() {
        let m = manager();
        m.set_config_value(config_keys::FORECAST_DEFAULT_DAYS, &i64::MAX.to_string())
            .unwrap();
        assert_eq!(m.load_supply_chain_config().unwrap().forecast_default_days, 7);

        m.set_config_value(config_keys::FORECAST_DEFAULT_DAYS, "365").unwrap();
        assert_eq!(m.load_supply_chain_config().unwrap().forecast_default_days, 365);
    }

    #[test]
    fn test_catalog_override() {
        let m = manager();
        assert_eq!(m.load_catalog().unwrap(), Catalog::standard());

        let raw = r#"{
            "crops": [{"name": "Okra", "emoji": "🫛", "base_price": 30.0, "volatility": 0.2, "season": "kharif"}],
            "retailers": [{"id": 1, "name": "Shop", "lat": 12.9, "lng": 77.6, "demand": "high"}],
            "trucks": [{"id": "KA-01-0001", "driver": "Anil", "capacity_kg": 800, "type": "Mini Truck"}]
        }"#;
        m.set_config_value(config_keys::SUPPLY_CHAIN_CATALOG, raw).unwrap();
        let catalog = m.load_catalog().unwrap();
        assert_eq!(catalog.crops().len(), 1);
        assert_eq!(catalog.crops()[0].name, "Okra");

        m.set_config_value(config_keys::SUPPLY_CHAIN_CATALOG, r#"{"crops": [], "retailers": [], "trucks": []}"#)
            .unwrap();
        assert!(m.load_catalog().is_err());
    }

    #[test]
    fn test_config_snapshot_contains_keys() {
        let m = manager();
        m.set_config_value(config_keys::FORECAST_DEFAULT_DAYS, "10").unwrap();
        let snapshot = m.get_config_snapshot().unwrap();
        let parsed: HashMap<String, String> = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(parsed.get("forecast_default_days").map(String::as_str), Some("10"));
    }
}
