// ==========================================
// Mandi 供应链智能引擎 - 库存品项仓储
// ==========================================
// 红线: Repository 不含业务逻辑; 所有查询按 mandi_owner_id 限定范围
// ==========================================

use crate::domain::mandi::{MandiItem, MandiItemCreate, MandiItemUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const ITEM_COLUMNS: &str = "id, mandi_owner_id, item_name, current_qty, created_at, updated_at";

fn map_item(row: &Row<'_>) -> rusqlite::Result<MandiItem> {
    Ok(MandiItem {
        id: row.get(0)?,
        mandi_owner_id: row.get(1)?,
        item_name: row.get(2)?,
        current_qty: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

// ==========================================
// MandiItemRepository - 库存品项仓储
// ==========================================
pub struct MandiItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MandiItemRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询货主的全部品项 (按 id 升序)
    pub fn list_by_owner(&self, owner_id: i64) -> RepositoryResult<Vec<MandiItem>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM mandi_item WHERE mandi_owner_id = ?1 ORDER BY id ASC",
            ITEM_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map(params![owner_id], map_item)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(items)
    }

    /// 按 id 查询 (限定货主)
    pub fn find(&self, owner_id: i64, item_id: i64) -> RepositoryResult<Option<MandiItem>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM mandi_item WHERE id = ?1 AND mandi_owner_id = ?2",
            ITEM_COLUMNS
        );
        let item = conn
            .query_row(&sql, params![item_id, owner_id], map_item)
            .optional()?;
        Ok(item)
    }

    /// 新建品项
    pub fn insert(&self, owner_id: i64, create: &MandiItemCreate) -> RepositoryResult<MandiItem> {
        let id = {
            let conn = self.get_conn()?;
            conn.execute(
                "INSERT INTO mandi_item (mandi_owner_id, item_name, current_qty) VALUES (?1, ?2, ?3)",
                params![owner_id, create.item_name, create.current_qty],
            )?;
            conn.last_insert_rowid()
        };

        self.find(owner_id, id)?.ok_or_else(|| RepositoryError::NotFound {
            entity: "MandiItem".to_string(),
            id: id.to_string(),
        })
    }

    /// 部分更新品项
    ///
    /// # 返回
    /// - Ok(None): 品项不存在或不属于该货主
    pub fn update(
        &self,
        owner_id: i64,
        item_id: i64,
        update: &MandiItemUpdate,
    ) -> RepositoryResult<Option<MandiItem>> {
        let affected = {
            let conn = self.get_conn()?;
            conn.execute(
                r#"
                UPDATE mandi_item SET
                    item_name = COALESCE(?1, item_name),
                    current_qty = COALESCE(?2, current_qty),
                    updated_at = datetime('now')
                WHERE id = ?3 AND mandi_owner_id = ?4
                "#,
                params![update.item_name, update.current_qty, item_id, owner_id],
            )?
        };

        if affected == 0 {
            return Ok(None);
        }
        self.find(owner_id, item_id)
    }

    /// 删除品项
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 品项不存在或不属于该货主
    pub fn delete(&self, owner_id: i64, item_id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM mandi_item WHERE id = ?1 AND mandi_owner_id = ?2",
            params![item_id, owner_id],
        )?;
        Ok(affected > 0)
    }
}
