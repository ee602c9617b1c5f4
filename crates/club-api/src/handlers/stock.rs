//! Stock handlers
//!
//! Inventory items and their movement log.

use axum::{
    extract::{Path, State},
    Json,
};
use club_service::{
    CreateStockItemRequest, RecordMovementRequest, StockItemDetailResponse, StockItemResponse,
    StockService, UpdateStockItemRequest,
};

use crate::extractors::{IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /stock
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Vec<StockItemResponse>>> {
    let service = StockService::new(state.service_context());
    Ok(Json(service.list_items().await?))
}

/// Items at or below their minimum level
///
/// GET /stock/low
pub async fn list_low(State(state): State<AppState>) -> ApiResult<Json<Vec<StockItemResponse>>> {
    let service = StockService::new(state.service_context());
    Ok(Json(service.low_stock().await?))
}

/// POST /stock
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateStockItemRequest>,
) -> ApiResult<Created<Json<StockItemResponse>>> {
    let service = StockService::new(state.service_context());
    let response = service.create_item(request).await?;
    Ok(Created(Json(response)))
}

/// Item with its recent movements
///
/// GET /stock/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<StockItemDetailResponse>> {
    let service = StockService::new(state.service_context());
    let response = service.get_item(path.id()?).await?;
    Ok(Json(response))
}

/// PATCH /stock/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdateStockItemRequest>,
) -> ApiResult<Json<StockItemResponse>> {
    let service = StockService::new(state.service_context());
    let response = service.update_item(path.id()?, request).await?;
    Ok(Json(response))
}

/// Record an entry, exit or adjustment
///
/// POST /stock/{id}/movements
pub async fn record_movement(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<RecordMovementRequest>,
) -> ApiResult<Created<Json<StockItemResponse>>> {
    let service = StockService::new(state.service_context());
    let response = service.record_movement(path.id()?, request).await?;
    Ok(Created(Json(response)))
}
