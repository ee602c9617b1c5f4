//! Comanda handlers
//!
//! Bar tabs: opening, line items and settlement.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use club_service::{
    AddComandaItemRequest, ComandaResponse, ComandaService, OpenComandaRequest, PayComandaRequest,
};

use crate::extractors::{ComandaFilter, IdPath, ItemPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List tabs, optionally by status
///
/// GET /comandas?status=
pub async fn list_comandas(
    State(state): State<AppState>,
    Query(filter): Query<ComandaFilter>,
) -> ApiResult<Json<Vec<ComandaResponse>>> {
    let service = ComandaService::new(state.service_context());
    let response = service.list_comandas(filter.status).await?;
    Ok(Json(response))
}

/// POST /comandas
pub async fn open_comanda(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<OpenComandaRequest>,
) -> ApiResult<Created<Json<ComandaResponse>>> {
    let service = ComandaService::new(state.service_context());
    let response = service.open_comanda(request).await?;
    Ok(Created(Json(response)))
}

/// GET /comandas/{id}
pub async fn get_comanda(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<ComandaResponse>> {
    let service = ComandaService::new(state.service_context());
    let response = service.get_comanda(path.id()?).await?;
    Ok(Json(response))
}

/// Add a line to an open tab
///
/// POST /comandas/{id}/items
pub async fn add_item(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<AddComandaItemRequest>,
) -> ApiResult<Created<Json<ComandaResponse>>> {
    let service = ComandaService::new(state.service_context());
    let response = service.add_item(path.id()?, request).await?;
    Ok(Created(Json(response)))
}

/// Remove a line from an open tab
///
/// DELETE /comandas/{id}/items/{item_id}
pub async fn remove_item(
    State(state): State<AppState>,
    Path(path): Path<ItemPath>,
) -> ApiResult<Json<ComandaResponse>> {
    let service = ComandaService::new(state.service_context());
    let response = service.remove_item(path.id()?, path.item_id()?).await?;
    Ok(Json(response))
}

/// Close a tab as paid
///
/// POST /comandas/{id}/pay
pub async fn pay_comanda(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<PayComandaRequest>,
) -> ApiResult<Json<ComandaResponse>> {
    let service = ComandaService::new(state.service_context());
    let response = service.pay_comanda(path.id()?, request).await?;
    Ok(Json(response))
}

/// Cancel a tab and restock its items
///
/// POST /comandas/{id}/cancel
pub async fn cancel_comanda(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<ComandaResponse>> {
    let service = ComandaService::new(state.service_context());
    let response = service.cancel_comanda(path.id()?).await?;
    Ok(Json(response))
}
