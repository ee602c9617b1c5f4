//! Member service
//!
//! Handles member registration, profile updates, classification changes and
//! soft deletion.

use chrono::NaiveTime;
use club_core::{DomainError, Member, MemberQuery};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    CreateMemberRequest, MemberResponse, PaginatedResponse, PromoteMemberRequest,
    UpdateMemberRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Largest page the member listing returns
pub const MAX_PAGE_SIZE: i64 = 100;

/// Load a member or fail with `UNKNOWN_MEMBER`
pub(crate) async fn find_member(ctx: &ServiceContext, member_id: Uuid) -> ServiceResult<Member> {
    ctx.member_repo()
        .find_by_id(member_id)
        .await?
        .ok_or_else(|| DomainError::MemberNotFound(member_id).into())
}

fn non_blank(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new member
    #[instrument(skip(self, request))]
    pub async fn create_member(&self, request: CreateMemberRequest) -> ServiceResult<MemberResponse> {
        let name = non_blank("name", &request.name)?;
        let today = self.ctx.today();

        let joined_at = match request.joined_at {
            Some(date) if date > today => {
                return Err(ServiceError::validation("joined_at cannot be in the future"));
            }
            Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
            None => self.ctx.now(),
        };

        if request.half_date.is_some_and(|date| date > today) {
            return Err(ServiceError::validation("half_date cannot be in the future"));
        }

        // Not a promotion: a Half without a recorded date is resolved from history
        let mut member = Member::joined_at(name, joined_at);
        member.nickname = request.nickname;
        member.email = request.email;
        member.phone = request.phone;
        member.case_type = request.case_type.unwrap_or_default();
        member.half_date = request.half_date;

        self.ctx.member_repo().create(&member).await?;

        info!(member_id = %member.id, case_type = %member.case_type, "Member created");

        Ok(MemberResponse::from(&member))
    }

    /// Get a member by ID
    #[instrument(skip(self))]
    pub async fn get_member(&self, member_id: Uuid) -> ServiceResult<MemberResponse> {
        let member = find_member(self.ctx, member_id).await?;
        Ok(MemberResponse::from(member))
    }

    /// List members, one page at a time
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        query: MemberQuery,
    ) -> ServiceResult<PaginatedResponse<MemberResponse>> {
        let offset = query.offset.max(0);
        let limit = query.limit.clamp(1, MAX_PAGE_SIZE);

        // One extra row tells whether another page exists
        let lookup = MemberQuery {
            offset,
            limit: limit + 1,
            ..query
        };
        let mut members = self.ctx.member_repo().list(&lookup).await?;

        let has_more = members.len() as i64 > limit;
        members.truncate(limit as usize);

        Ok(PaginatedResponse::new(
            members.iter().map(MemberResponse::from).collect(),
            offset,
            limit,
            has_more,
        ))
    }

    /// Update member profile fields
    #[instrument(skip(self, request))]
    pub async fn update_member(
        &self,
        member_id: Uuid,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let mut member = find_member(self.ctx, member_id).await?;

        if let Some(name) = request.name {
            member.name = non_blank("name", &name)?;
        }
        if let Some(nickname) = request.nickname {
            member.nickname = Some(nickname).filter(|n| !n.trim().is_empty());
        }
        if let Some(email) = request.email {
            member.email = Some(email);
        }
        if let Some(phone) = request.phone {
            member.phone = Some(phone).filter(|p| !p.trim().is_empty());
        }
        member.updated_at = self.ctx.now();

        self.ctx.member_repo().update(&member).await?;

        info!(member_id = %member_id, "Member updated");

        Ok(MemberResponse::from(member))
    }

    /// Soft delete: the member is kept but marked inactive
    #[instrument(skip(self))]
    pub async fn deactivate_member(&self, member_id: Uuid) -> ServiceResult<()> {
        let mut member = find_member(self.ctx, member_id).await?;
        if !member.active {
            return Ok(());
        }

        member.deactivate(self.ctx.now());
        self.ctx.member_repo().update(&member).await?;

        info!(member_id = %member_id, "Member deactivated");

        Ok(())
    }

    /// Change a member's classification
    ///
    /// Promoting to Half without a date records today as the half-patch date.
    #[instrument(skip(self, request), fields(case_type = %request.case_type))]
    pub async fn promote_member(
        &self,
        member_id: Uuid,
        request: PromoteMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let mut member = find_member(self.ctx, member_id).await?;
        if !member.active {
            return Err(DomainError::MemberInactive.into());
        }

        let today = self.ctx.today();
        if request.half_date.is_some_and(|date| date > today) {
            return Err(ServiceError::validation("half_date cannot be in the future"));
        }

        let previous = member.case_type;
        member.promote(request.case_type, request.half_date, self.ctx.now());
        self.ctx.member_repo().update(&member).await?;

        info!(
            member_id = %member_id,
            from = %previous,
            to = %member.case_type,
            "Member promoted"
        );

        Ok(MemberResponse::from(member))
    }
}
