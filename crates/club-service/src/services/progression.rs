//! Progression service
//!
//! Runs the patch-eligibility calculator over a member's stored history.

use club_core::ProspectStats;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::dto::ProgressionResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::member::find_member;

/// Progression service
pub struct ProgressionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProgressionService<'a> {
    /// Create a new ProgressionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compute patch progression for a member as of the service clock
    #[instrument(skip(self))]
    pub async fn member_progression(&self, member_id: Uuid) -> ServiceResult<ProgressionResponse> {
        let member = find_member(self.ctx, member_id).await?;
        let activities = self.ctx.activity_repo().find_by_member(member_id).await?;

        let rules = *self.ctx.rules();
        let stats = ProspectStats::compute(&member, &activities, self.ctx.now(), &rules);

        debug!(
            member_id = %member_id,
            total_points = stats.total_points,
            half_eligible = stats.half_patch.eligible,
            full_eligible = stats.full_patch.eligible,
            "Progression computed"
        );

        Ok(ProgressionResponse {
            member_id,
            name: member.name,
            case_type: member.case_type,
            rules,
            stats,
        })
    }
}
