//! Dashboard handler

use axum::{
    extract::{Query, State},
    Json,
};
use club_service::{DashboardResponse, DashboardService};

use crate::extractors::DashboardParams;
use crate::response::ApiResult;
use crate::state::AppState;

/// Club-wide summary
///
/// GET /dashboard?revenue_days=
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> ApiResult<Json<DashboardResponse>> {
    let service = DashboardService::new(state.service_context());
    let response = service.summary(params.revenue_days).await?;
    Ok(Json(response))
}
