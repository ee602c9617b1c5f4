//! Activity handlers
//!
//! Logging, the review queue and the activity catalogue.

use axum::{
    extract::{Path, State},
    Json,
};
use club_service::{
    ActivityKindResponse, ActivityResponse, ActivityService, LogActivityRequest,
    ReviewActivityRequest,
};

use crate::extractors::{IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Activity kinds with their points and limits
///
/// GET /activities/kinds
pub async fn list_kinds(State(state): State<AppState>) -> Json<Vec<ActivityKindResponse>> {
    Json(ActivityService::new(state.service_context()).kinds())
}

/// Activities awaiting review
///
/// GET /activities/pending
pub async fn list_pending(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let service = ActivityService::new(state.service_context());
    Ok(Json(service.list_pending().await?))
}

/// Activities of one member, newest first
///
/// GET /members/{id}/activities
pub async fn list_member_activities(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    let service = ActivityService::new(state.service_context());
    let response = service.list_member_activities(path.id()?).await?;
    Ok(Json(response))
}

/// Log an activity for a member
///
/// POST /members/{id}/activities
pub async fn log_activity(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<LogActivityRequest>,
) -> ApiResult<Created<Json<ActivityResponse>>> {
    let service = ActivityService::new(state.service_context());
    let response = service.log_activity(path.id()?, request).await?;
    Ok(Created(Json(response)))
}

/// Approve a pending activity
///
/// POST /activities/{id}/validate
pub async fn validate_activity(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<ReviewActivityRequest>,
) -> ApiResult<Json<ActivityResponse>> {
    let service = ActivityService::new(state.service_context());
    let response = service.validate_activity(path.id()?, request).await?;
    Ok(Json(response))
}

/// Reject a pending activity
///
/// POST /activities/{id}/reject
pub async fn reject_activity(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<ReviewActivityRequest>,
) -> ApiResult<Json<ActivityResponse>> {
    let service = ActivityService::new(state.service_context());
    let response = service.reject_activity(path.id()?, request).await?;
    Ok(Json(response))
}

/// Delete a pending activity
///
/// DELETE /activities/{id}
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<NoContent> {
    let service = ActivityService::new(state.service_context());
    service.delete_activity(path.id()?).await?;
    Ok(NoContent)
}
