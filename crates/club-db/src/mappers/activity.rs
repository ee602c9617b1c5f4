//! Activity model -> entity

use club_core::{Activity, DomainError};

use super::{ensure, parse_column};
use crate::models::ActivityModel;

impl TryFrom<ActivityModel> for Activity {
    type Error = DomainError;

    fn try_from(model: ActivityModel) -> Result<Self, Self::Error> {
        ensure("activity", model.points >= 0, || {
            format!("activity {} has negative points ({})", model.id, model.points)
        })?;

        Ok(Activity {
            id: model.id,
            prospect_id: model.prospect_id,
            kind: parse_column("activity", &model.activity_type)?,
            activity_date: model.activity_date,
            description: model.description,
            status: parse_column("activity", &model.status)?,
            points: model.points,
            reviewed_by: model.reviewed_by,
            reviewed_at: model.reviewed_at,
            created_at: model.created_at,
        })
    }
}
