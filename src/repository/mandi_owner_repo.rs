// ==========================================
// Mandi 供应链智能引擎 - 货主档案仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::mandi::{MandiOwner, MandiOwnerProfileUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const OWNER_COLUMNS: &str = r#"
    id, user_id, owner_name, contact, latitude, longitude, language, created_at, updated_at
"#;

fn map_owner(row: &Row<'_>) -> rusqlite::Result<MandiOwner> {
    Ok(MandiOwner {
        id: row.get(0)?,
        user_id: row.get(1)?,
        owner_name: row.get(2)?,
        contact: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        language: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

// ==========================================
// MandiOwnerRepository - 货主档案仓储
// ==========================================
/// 职责: 管理 mandi_owner 表 (按 user_id 唯一)
pub struct MandiOwnerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MandiOwnerRepository {
    /// 从已有连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新建货主档案
    ///
    /// # 返回
    /// - Ok(MandiOwner): 新建的档案
    /// - Err(UniqueConstraintViolation): user_id 已存在
    pub fn insert(
        &self,
        user_id: i64,
        owner_name: &str,
        language: &str,
    ) -> RepositoryResult<MandiOwner> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO mandi_owner (user_id, owner_name, language) VALUES (?1, ?2, ?3)",
            params![user_id, owner_name, language],
        )?;
        let id = conn.last_insert_rowid();

        let sql = format!("SELECT {} FROM mandi_owner WHERE id = ?1", OWNER_COLUMNS);
        let owner = conn.query_row(&sql, params![id], map_owner)?;
        Ok(owner)
    }

    /// 按用户ID查询档案
    ///
    /// # 返回
    /// - Ok(Some(MandiOwner)): 找到档案
    /// - Ok(None): 未找到
    pub fn find_by_user_id(&self, user_id: i64) -> RepositoryResult<Option<MandiOwner>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM mandi_owner WHERE user_id = ?1", OWNER_COLUMNS);
        let owner = conn.query_row(&sql, params![user_id], map_owner).optional()?;
        Ok(owner)
    }

    /// 部分更新档案 (None 字段保持原值)
    ///
    /// # 返回
    /// - Ok(Some(MandiOwner)): 更新后的档案
    /// - Ok(None): 档案不存在
    pub fn update_profile(
        &self,
        user_id: i64,
        update: &MandiOwnerProfileUpdate,
    ) -> RepositoryResult<Option<MandiOwner>> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE mandi_owner SET
                contact = COALESCE(?1, contact),
                latitude = COALESCE(?2, latitude),
                longitude = COALESCE(?3, longitude),
                language = COALESCE(?4, language),
                updated_at = datetime('now')
            WHERE user_id = ?5
            "#,
            params![
                update.contact,
                update.latitude,
                update.longitude,
                update.language,
                user_id
            ],
        )?;

        if affected == 0 {
            return Ok(None);
        }

        let sql = format!("SELECT {} FROM mandi_owner WHERE user_id = ?1", OWNER_COLUMNS);
        let owner = conn.query_row(&sql, params![user_id], map_owner)?;
        Ok(Some(owner))
    }
}
