//! Member model -> entity

use club_core::{DomainError, Member};

use super::{ensure, parse_column};
use crate::models::MemberModel;

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        ensure("member", !model.name.trim().is_empty(), || {
            format!("member {} has an empty name", model.id)
        })?;

        Ok(Member {
            id: model.id,
            case_type: parse_column("member", &model.case_type)?,
            name: model.name,
            nickname: model.nickname,
            email: model.email,
            phone: model.phone,
            half_date: model.half_date,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
