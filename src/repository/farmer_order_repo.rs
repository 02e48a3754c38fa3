// ==========================================
// Mandi 供应链智能引擎 - 农户订单仓储
// ==========================================
// 红线: Repository 不含业务逻辑; 所有查询按 mandi_owner_id 限定范围
// ==========================================

use crate::domain::mandi::{MandiFarmerOrder, MandiFarmerOrderCreate, MandiFarmerOrderUpdate};
use crate::domain::types::OrderStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const ORDER_COLUMNS: &str = r#"
    id, mandi_owner_id, farmer_name, item_name, quantity_kg, price_per_kg, status,
    created_at, updated_at
"#;

const STATUS_COLUMN: usize = 6;

fn parse_order_status(raw: &str) -> rusqlite::Result<OrderStatus> {
    OrderStatus::parse(raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            STATUS_COLUMN,
            Type::Text,
            format!("未知订单状态: {}", raw).into(),
        )
    })
}

fn map_order(row: &Row<'_>) -> rusqlite::Result<MandiFarmerOrder> {
    Ok(MandiFarmerOrder {
        id: row.get(0)?,
        mandi_owner_id: row.get(1)?,
        farmer_name: row.get(2)?,
        item_name: row.get(3)?,
        quantity_kg: row.get(4)?,
        price_per_kg: row.get(5)?,
        status: parse_order_status(&row.get::<_, String>(STATUS_COLUMN)?)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

// ==========================================
// FarmerOrderRepository - 农户订单仓储
// ==========================================
pub struct FarmerOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FarmerOrderRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询货主的全部订单 (新订单在前)
    pub fn list_by_owner(&self, owner_id: i64) -> RepositoryResult<Vec<MandiFarmerOrder>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM mandi_farmer_order WHERE mandi_owner_id = ?1 ORDER BY id DESC",
            ORDER_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let orders = stmt
            .query_map(params![owner_id], map_order)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(orders)
    }

    /// 按 id 查询 (限定货主)
    pub fn find(&self, owner_id: i64, order_id: i64) -> RepositoryResult<Option<MandiFarmerOrder>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM mandi_farmer_order WHERE id = ?1 AND mandi_owner_id = ?2",
            ORDER_COLUMNS
        );
        let order = conn
            .query_row(&sql, params![order_id, owner_id], map_order)
            .optional()?;
        Ok(order)
    }

    /// 新建订单 (状态 pending)
    pub fn insert(
        &self,
        owner_id: i64,
        create: &MandiFarmerOrderCreate,
    ) -> RepositoryResult<MandiFarmerOrder> {
        let id = {
            let conn = self.get_conn()?;
            conn.execute(
                r#"
                INSERT INTO mandi_farmer_order (
                    mandi_owner_id, farmer_name, item_name, quantity_kg, price_per_kg, status
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    owner_id,
                    create.farmer_name,
                    create.item_name,
                    create.quantity_kg,
                    create.price_per_kg,
                    OrderStatus::Pending.to_string(),
                ],
            )?;
            conn.last_insert_rowid()
        };

        self.find(owner_id, id)?.ok_or_else(|| RepositoryError::NotFound {
            entity: "MandiFarmerOrder".to_string(),
            id: id.to_string(),
        })
    }

    /// 部分更新订单
    ///
    /// # 返回
    /// - Ok(None): 订单不存在或不属于该货主
    pub fn update(
        &self,
        owner_id: i64,
        order_id: i64,
        update: &MandiFarmerOrderUpdate,
    ) -> RepositoryResult<Option<MandiFarmerOrder>> {
        let affected = {
            let conn = self.get_conn()?;
            conn.execute(
                r#"
                UPDATE mandi_farmer_order SET
                    farmer_name = COALESCE(?1, farmer_name),
                    item_name = COALESCE(?2, item_name),
                    quantity_kg = COALESCE(?3, quantity_kg),
                    price_per_kg = COALESCE(?4, price_per_kg),
                    status = COALESCE(?5, status),
                    updated_at = datetime('now')
                WHERE id = ?6 AND mandi_owner_id = ?7
                "#,
                params![
                    update.farmer_name,
                    update.item_name,
                    update.quantity_kg,
                    update.price_per_kg,
                    update.status.map(|s| s.to_string()),
                    order_id,
                    owner_id,
                ],
            )?
        };

        if affected == 0 {
            return Ok(None);
        }
        self.find(owner_id, order_id)
    }

    /// 删除订单
    pub fn delete(&self, owner_id: i64, order_id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM mandi_farmer_order WHERE id = ?1 AND mandi_owner_id = ?2",
            params![order_id, owner_id],
        )?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_status_rejects_unknown() {
        assert_eq!(parse_order_status("delivered").unwrap(), OrderStatus::Delivered);
        assert!(parse_order_status("lost").is_err());
    }
}
