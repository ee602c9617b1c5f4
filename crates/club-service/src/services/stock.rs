//! Stock service
//!
//! Bar inventory. The level of an item only ever changes through a logged
//! movement.

use club_core::{DomainError, MovementKind, StockItem, StockMovement};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    CreateStockItemRequest, RecordMovementRequest, StockItemDetailResponse, StockItemResponse,
    StockMovementResponse, UpdateStockItemRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Movements shown with an item
pub const RECENT_MOVEMENTS: i64 = 20;

pub(crate) async fn find_item(ctx: &ServiceContext, item_id: Uuid) -> ServiceResult<StockItem> {
    ctx.stock_repo()
        .find_by_id(item_id)
        .await?
        .ok_or_else(|| DomainError::StockItemNotFound(item_id).into())
}

fn required(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

/// Stock service
pub struct StockService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StockService<'a> {
    /// Create a new StockService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All items by category and name
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ServiceResult<Vec<StockItemResponse>> {
        let items = self.ctx.stock_repo().list().await?;
        Ok(items.iter().map(StockItemResponse::from).collect())
    }

    /// Items at or below their minimum level
    #[instrument(skip(self))]
    pub async fn low_stock(&self) -> ServiceResult<Vec<StockItemResponse>> {
        let items = self.ctx.stock_repo().find_low().await?;
        Ok(items.iter().map(StockItemResponse::from).collect())
    }

    /// One item with its most recent movements
    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: Uuid) -> ServiceResult<StockItemDetailResponse> {
        let item = find_item(self.ctx, item_id).await?;
        let movements = self
            .ctx
            .stock_repo()
            .find_movements(item_id, RECENT_MOVEMENTS)
            .await?;

        Ok(StockItemDetailResponse {
            item: StockItemResponse::from(item),
            movements: movements.into_iter().map(StockMovementResponse::from).collect(),
        })
    }

    /// Create an item, optionally with an opening level
    #[instrument(skip(self, request))]
    pub async fn create_item(
        &self,
        request: CreateStockItemRequest,
    ) -> ServiceResult<StockItemResponse> {
        let mut item = StockItem::new(
            required("name", &request.name)?,
            required("category", &request.category)?,
            required("unit", &request.unit)?,
            request.unit_price,
        );
        item.min_quantity = request.min_quantity;
        item.created_at = self.ctx.now();
        item.updated_at = item.created_at;

        self.ctx.stock_repo().create(&item).await?;

        info!(item_id = %item.id, name = %item.name, "Stock item created");

        if let Some(quantity) = request.initial_quantity.filter(|q| *q > 0) {
            let mut movement = StockMovement::new(
                item.id,
                MovementKind::Entry,
                quantity,
                Some("initial stock".to_string()),
            );
            movement.created_at = item.created_at;
            item = self.ctx.stock_repo().record_movement(&movement).await?;
        }

        Ok(StockItemResponse::from(item))
    }

    /// Update descriptive fields, price and minimum level
    #[instrument(skip(self, request))]
    pub async fn update_item(
        &self,
        item_id: Uuid,
        request: UpdateStockItemRequest,
    ) -> ServiceResult<StockItemResponse> {
        let mut item = find_item(self.ctx, item_id).await?;

        if let Some(name) = request.name {
            item.name = required("name", &name)?;
        }
        if let Some(category) = request.category {
            item.category = required("category", &category)?;
        }
        if let Some(unit) = request.unit {
            item.unit = required("unit", &unit)?;
        }
        if let Some(unit_price) = request.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(min_quantity) = request.min_quantity {
            item.min_quantity = min_quantity;
        }
        item.updated_at = self.ctx.now();

        self.ctx.stock_repo().update(&item).await?;

        info!(item_id = %item_id, "Stock item updated");

        Ok(StockItemResponse::from(item))
    }

    /// Log a movement and apply it to the item level
    ///
    /// `entry` adds, `exit` subtracts and `adjustment` sets the level. An exit
    /// larger than the level fails with `INSUFFICIENT_STOCK` and changes
    /// nothing.
    #[instrument(skip(self, request), fields(kind = %request.kind, quantity = request.quantity))]
    pub async fn record_movement(
        &self,
        item_id: Uuid,
        request: RecordMovementRequest,
    ) -> ServiceResult<StockItemResponse> {
        let item = find_item(self.ctx, item_id).await?;
        item.quantity_after(request.kind, request.quantity)?;

        let mut movement = StockMovement::new(
            item_id,
            request.kind,
            request.quantity,
            request.note.filter(|n| !n.trim().is_empty()),
        );
        movement.created_at = self.ctx.now();

        let updated = self.ctx.stock_repo().record_movement(&movement).await?;

        info!(
            item_id = %item_id,
            from = item.quantity,
            to = updated.quantity,
            "Stock movement recorded"
        );
        if updated.is_low() {
            warn!(item_id = %item_id, quantity = updated.quantity, "Stock item is low");
        }

        Ok(StockItemResponse::from(updated))
    }
}
