// ==========================================
// Mandi 供应链智能引擎 - Mandi 业务 API
// ==========================================
// 职责: 货主档案 / 库存品项 / 农户订单 CRUD
// 说明: 品项与订单均限定在当前货主范围内, 越权访问视为未找到
// ==========================================

use std::sync::Arc;
use tracing::instrument;

use crate::api::error::{
    validate_coordinates, validate_finite, validate_not_blank, ApiError, ApiResult,
};
use crate::domain::mandi::{
    MandiFarmerOrder, MandiFarmerOrderCreate, MandiFarmerOrderUpdate, MandiItem, MandiItemCreate,
    MandiItemUpdate, MandiOwner, MandiOwnerProfileUpdate,
};
use crate::i18n::{is_supported, DEFAULT_LOCALE};
use crate::repository::{FarmerOrderRepository, MandiItemRepository, MandiOwnerRepository};

/// 档案不存在时的错误信息
pub const PROFILE_NOT_FOUND: &str = "Mandi owner profile not found";

// ==========================================
// MandiApi - Mandi 业务 API
// ==========================================
pub struct MandiApi {
    owner_repo: Arc<MandiOwnerRepository>,
    item_repo: Arc<MandiItemRepository>,
    order_repo: Arc<FarmerOrderRepository>,
}

impl MandiApi {
    pub fn new(
        owner_repo: Arc<MandiOwnerRepository>,
        item_repo: Arc<MandiItemRepository>,
        order_repo: Arc<FarmerOrderRepository>,
    ) -> Self {
        Self {
            owner_repo,
            item_repo,
            order_repo,
        }
    }

    // ==========================================
    // 货主档案
    // ==========================================

    /// 登记货主档案 (默认语言 en)
    #[instrument(skip(self))]
    pub fn register_owner(&self, user_id: i64, owner_name: &str) -> ApiResult<MandiOwner> {
        validate_not_blank("owner_name", owner_name)?;
        let owner = self
            .owner_repo
            .insert(user_id, owner_name.trim(), DEFAULT_LOCALE)?;
        tracing::info!(user_id, owner_id = owner.id, "货主档案已登记");
        Ok(owner)
    }

    /// 查询货主档案
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 档案不存在
    pub fn get_profile(&self, user_id: i64) -> ApiResult<MandiOwner> {
        self.owner_repo
            .find_by_user_id(user_id)?
            .ok_or_else(|| ApiError::NotFound(PROFILE_NOT_FOUND.to_string()))
    }

    /// 部分更新货主档案 (contact / latitude / longitude / language)
    #[instrument(skip(self, update))]
    pub fn update_profile(
        &self,
        user_id: i64,
        update: &MandiOwnerProfileUpdate,
    ) -> ApiResult<MandiOwner> {
        self.get_profile(user_id)?;

        // 仅校验本次提供的坐标分量
        validate_coordinates(
            update.latitude.unwrap_or(0.0),
            update.longitude.unwrap_or(0.0),
        )?;

        if let Some(language) = &update.language {
            if !is_supported(language) {
                return Err(ApiError::InvalidInput(format!("不支持的语言: {}", language)));
            }
        }

        let owner = self
            .owner_repo
            .update_profile(user_id, update)?
            .ok_or_else(|| ApiError::NotFound(PROFILE_NOT_FOUND.to_string()))?;
        tracing::info!(user_id, "货主档案已更新");
        Ok(owner)
    }

    // ==========================================
    // 库存品项
    // ==========================================

    pub fn list_items(&self, user_id: i64) -> ApiResult<Vec<MandiItem>> {
        let owner = self.get_profile(user_id)?;
        Ok(self.item_repo.list_by_owner(owner.id)?)
    }

    #[instrument(skip(self, create))]
    pub fn create_item(&self, user_id: i64, create: &MandiItemCreate) -> ApiResult<MandiItem> {
        let owner = self.get_profile(user_id)?;
        validate_not_blank("item_name", &create.item_name)?;
        validate_quantity("current_qty", create.current_qty)?;

        let item = self.item_repo.insert(owner.id, create)?;
        tracing::debug!(owner_id = owner.id, item_id = item.id, "品项已创建");
        Ok(item)
    }

    pub fn get_item(&self, user_id: i64, item_id: i64) -> ApiResult<MandiItem> {
        let owner = self.get_profile(user_id)?;
        self.item_repo
            .find(owner.id, item_id)?
            .ok_or_else(|| item_not_found(item_id))
    }

    #[instrument(skip(self, update))]
    pub fn update_item(
        &self,
        user_id: i64,
        item_id: i64,
        update: &MandiItemUpdate,
    ) -> ApiResult<MandiItem> {
        let owner = self.get_profile(user_id)?;
        if let Some(name) = &update.item_name {
            validate_not_blank("item_name", name)?;
        }
        if let Some(qty) = update.current_qty {
            validate_quantity("current_qty", qty)?;
        }

        self.item_repo
            .update(owner.id, item_id, update)?
            .ok_or_else(|| item_not_found(item_id))
    }

    #[instrument(skip(self))]
    pub fn delete_item(&self, user_id: i64, item_id: i64) -> ApiResult<()> {
        let owner = self.get_profile(user_id)?;
        if self.item_repo.delete(owner.id, item_id)? {
            Ok(())
        } else {
            Err(item_not_found(item_id))
        }
    }

    // ==========================================
    // 农户订单
    // ==========================================

    pub fn list_orders(&self, user_id: i64) -> ApiResult<Vec<MandiFarmerOrder>> {
        let owner = self.get_profile(user_id)?;
        Ok(self.order_repo.list_by_owner(owner.id)?)
    }

    #[instrument(skip(self, create))]
    pub fn create_order(
        &self,
        user_id: i64,
        create: &MandiFarmerOrderCreate,
    ) -> ApiResult<MandiFarmerOrder> {
        let owner = self.get_profile(user_id)?;
        validate_not_blank("farmer_name", &create.farmer_name)?;
        validate_not_blank("item_name", &create.item_name)?;
        validate_order_quantity(create.quantity_kg)?;
        validate_quantity("price_per_kg", create.price_per_kg)?;

        let order = self.order_repo.insert(owner.id, create)?;
        tracing::debug!(owner_id = owner.id, order_id = order.id, "农户订单已创建");
        Ok(order)
    }

    pub fn get_order(&self, user_id: i64, order_id: i64) -> ApiResult<MandiFarmerOrder> {
        let owner = self.get_profile(user_id)?;
        self.order_repo
            .find(owner.id, order_id)?
            .ok_or_else(|| order_not_found(order_id))
    }

    #[instrument(skip(self, update))]
    pub fn update_order(
        &self,
        user_id: i64,
        order_id: i64,
        update: &MandiFarmerOrderUpdate,
    ) -> ApiResult<MandiFarmerOrder> {
        let owner = self.get_profile(user_id)?;
        if let Some(name) = &update.farmer_name {
            validate_not_blank("farmer_name", name)?;
        }
        if let Some(name) = &update.item_name {
            validate_not_blank("item_name", name)?;
        }
        if let Some(qty) = update.quantity_kg {
            validate_order_quantity(qty)?;
        }
        if let Some(price) = update.price_per_kg {
            validate_quantity("price_per_kg", price)?;
        }

        self.order_repo
            .update(owner.id, order_id, update)?
            .ok_or_else(|| order_not_found(order_id))
    }

    #[instrument(skip(self))]
    pub fn delete_order(&self, user_id: i64, order_id: i64) -> ApiResult<()> {
        let owner = self.get_profile(user_id)?;
        if self.order_repo.delete(owner.id, order_id)? {
            Ok(())
        } else {
            Err(order_not_found(order_id))
        }
    }
}

// ==========================================
// 校验辅助
// ==========================================

/// 非负有限数值
fn validate_quantity(field: &str, value: f64) -> ApiResult<()> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ApiError::InvalidInput(format!("{} 不能为负数: {}", field, value)));
    }
    Ok(())
}

/// 订单数量须为正
fn validate_order_quantity(value: f64) -> ApiResult<()> {
    validate_finite("quantity_kg", value)?;
    if value <= 0.0 {
        return Err(ApiError::InvalidInput(format!("quantity_kg 必须大于 0: {}", value)));
    }
    Ok(())
}

fn item_not_found(item_id: i64) -> ApiError {
    ApiError::NotFound(format!("Item not found (id={})", item_id))
}

fn order_not_found(order_id: i64) -> ApiError {
    ApiError::NotFound(format!("Order not found (id={})", order_id))
}
