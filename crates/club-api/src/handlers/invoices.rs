//! Dues handlers

use axum::{
    extract::{Path, State},
    Json,
};
use club_service::{CreateInvoiceRequest, DuesService, InvoiceResponse};

use crate::extractors::{InvoiceMemberPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Invoices with their shares, newest due date first
///
/// GET /invoices
pub async fn list_invoices(State(state): State<AppState>) -> ApiResult<Json<Vec<InvoiceResponse>>> {
    let service = DuesService::new(state.service_context());
    Ok(Json(service.list_invoices().await?))
}

/// Bill dues split equally among members
///
/// POST /invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateInvoiceRequest>,
) -> ApiResult<Created<Json<InvoiceResponse>>> {
    let service = DuesService::new(state.service_context());
    let response = service.create_invoice(request).await?;
    Ok(Created(Json(response)))
}

/// Mark one member's share as paid
///
/// POST /invoices/{id}/shares/{member_id}/pay
pub async fn pay_share(
    State(state): State<AppState>,
    Path(path): Path<InvoiceMemberPath>,
) -> ApiResult<Json<InvoiceResponse>> {
    let service = DuesService::new(state.service_context());
    let response = service.pay_share(path.id()?, path.member_id()?).await?;
    Ok(Json(response))
}
