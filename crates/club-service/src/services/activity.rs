//! Activity service
//!
//! Prospect activity logging and the director review queue. The once-per-month
//! limit is enforced at write time by the repository: on insert against every
//! activity that is not rejected, and again on validation against validated
//! ones.

use club_core::{Activity, ActivityKind, ActivityStatus, DomainError};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{ActivityKindResponse, ActivityResponse, LogActivityRequest, ReviewActivityRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::member::find_member;

/// Activity service
pub struct ActivityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivityService<'a> {
    /// Create a new ActivityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The fixed activity catalogue
    pub fn kinds(&self) -> Vec<ActivityKindResponse> {
        ActivityKind::ALL.into_iter().map(ActivityKindResponse::from).collect()
    }

    /// Log an activity for a member; it starts pending review
    #[instrument(skip(self, request), fields(activity_type = %request.activity_type))]
    pub async fn log_activity(
        &self,
        member_id: Uuid,
        request: LogActivityRequest,
    ) -> ServiceResult<ActivityResponse> {
        let member = find_member(self.ctx, member_id).await?;
        if !member.active {
            return Err(DomainError::MemberInactive.into());
        }
        if request.activity_date > self.ctx.today() {
            return Err(ServiceError::validation("activity_date cannot be in the future"));
        }

        let mut activity = Activity::new(
            member_id,
            request.activity_type,
            request.activity_date,
            self.ctx.now(),
        );
        activity.description = request.description.filter(|d| !d.trim().is_empty());

        // Refused when a non-rejected entry already holds the monthly slot
        self.ctx.activity_repo().create(&activity).await?;

        info!(
            activity_id = %activity.id,
            member_id = %member_id,
            points = activity.points,
            "Activity logged"
        );

        Ok(ActivityResponse::from(activity))
    }

    /// All activities of a member in date order
    #[instrument(skip(self))]
    pub async fn list_member_activities(
        &self,
        member_id: Uuid,
    ) -> ServiceResult<Vec<ActivityResponse>> {
        find_member(self.ctx, member_id).await?;
        let activities = self.ctx.activity_repo().find_by_member(member_id).await?;
        Ok(activities.iter().map(ActivityResponse::from).collect())
    }

    /// Review queue, oldest first
    #[instrument(skip(self))]
    pub async fn list_pending(&self) -> ServiceResult<Vec<ActivityResponse>> {
        let activities = self.ctx.activity_repo().find_pending().await?;
        Ok(activities.iter().map(ActivityResponse::from).collect())
    }

    /// Validate a pending activity so its points count
    #[instrument(skip(self, request))]
    pub async fn validate_activity(
        &self,
        activity_id: Uuid,
        request: ReviewActivityRequest,
    ) -> ServiceResult<ActivityResponse> {
        let activity = self.find_activity(activity_id).await?;
        self.review(activity, ActivityStatus::Validated, request.reviewer)
            .await
    }

    /// Reject a pending activity
    #[instrument(skip(self, request))]
    pub async fn reject_activity(
        &self,
        activity_id: Uuid,
        request: ReviewActivityRequest,
    ) -> ServiceResult<ActivityResponse> {
        let activity = self.find_activity(activity_id).await?;
        self.review(activity, ActivityStatus::Rejected, request.reviewer)
            .await
    }

    /// Delete an activity that has not been reviewed yet
    #[instrument(skip(self))]
    pub async fn delete_activity(&self, activity_id: Uuid) -> ServiceResult<()> {
        self.ctx.activity_repo().delete_pending(activity_id).await?;

        info!(activity_id = %activity_id, "Activity deleted");

        Ok(())
    }

    async fn find_activity(&self, activity_id: Uuid) -> ServiceResult<Activity> {
        self.ctx
            .activity_repo()
            .find_by_id(activity_id)
            .await?
            .ok_or_else(|| DomainError::ActivityNotFound(activity_id).into())
    }

    async fn review(
        &self,
        mut activity: Activity,
        outcome: ActivityStatus,
        reviewer: String,
    ) -> ServiceResult<ActivityResponse> {
        let reviewer = reviewer.trim().to_string();
        if reviewer.is_empty() {
            return Err(ServiceError::validation("reviewer must not be blank"));
        }

        activity.review(outcome, reviewer, self.ctx.now())?;
        // The stored row decides: it must still be pending, and a validation
        // must find the monthly slot free
        self.ctx.activity_repo().record_review(&activity).await?;

        info!(
            activity_id = %activity.id,
            member_id = %activity.prospect_id,
            status = %activity.status,
            "Activity reviewed"
        );

        Ok(ActivityResponse::from(activity))
    }
}
