//! Member handlers
//!
//! Registry endpoints plus the patch progression view.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use club_service::{
    CreateMemberRequest, DuesService, DuesShareResponse, MemberResponse, MemberService,
    PaginatedResponse, ProgressionResponse, ProgressionService, PromoteMemberRequest,
    UpdateMemberRequest,
};

use crate::extractors::{IdPath, MemberFilter, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a member
///
/// POST /members
pub async fn create_member(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service.create_member(request).await?;
    Ok(Created(Json(response)))
}

/// List members
///
/// GET /members?case_type=&include_inactive=&offset=&limit=
pub async fn list_members(
    State(state): State<AppState>,
    Query(filter): Query<MemberFilter>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service.list_members(filter.into_query(pagination)).await?;
    Ok(Json(response))
}

/// Get member by ID
///
/// GET /members/{id}
pub async fn get_member(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.get_member(path.id()?).await?;
    Ok(Json(response))
}

/// Update member contact details
///
/// PATCH /members/{id}
pub async fn update_member(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.update_member(path.id()?, request).await?;
    Ok(Json(response))
}

/// Deactivate a member (soft delete)
///
/// DELETE /members/{id}
pub async fn deactivate_member(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<NoContent> {
    let service = MemberService::new(state.service_context());
    service.deactivate_member(path.id()?).await?;
    Ok(NoContent)
}

/// Change a member's classification
///
/// POST /members/{id}/promote
pub async fn promote_member(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
    ValidatedJson(request): ValidatedJson<PromoteMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.promote_member(path.id()?, request).await?;
    Ok(Json(response))
}

/// Patch progression statistics
///
/// GET /members/{id}/progression
pub async fn get_progression(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<ProgressionResponse>> {
    let service = ProgressionService::new(state.service_context());
    let response = service.member_progression(path.id()?).await?;
    Ok(Json(response))
}

/// Dues shares billed to a member
///
/// GET /members/{id}/dues
pub async fn get_member_dues(
    State(state): State<AppState>,
    Path(path): Path<IdPath>,
) -> ApiResult<Json<Vec<DuesShareResponse>>> {
    let service = DuesService::new(state.service_context());
    let response = service.member_shares(path.id()?).await?;
    Ok(Json(response))
}
