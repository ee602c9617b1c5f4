//! Member entity - a club member at some stage of the patch progression

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Member classification ("case type")
///
/// Prospects earn the Half patch, Half members earn the Full patch.
/// Diretoria is the board and sits outside the progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CaseType {
    #[default]
    Prospect,
    Half,
    Diretoria,
    Full,
}

impl CaseType {
    pub const ALL: [CaseType; 4] = [Self::Prospect, Self::Half, Self::Diretoria, Self::Full];

    /// Stored / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prospect => "Prospect",
            Self::Half => "Half",
            Self::Diretoria => "Diretoria",
            Self::Full => "Full",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Prospect" => Ok(Self::Prospect),
            "Half" => Ok(Self::Half),
            "Diretoria" => Ok(Self::Diretoria),
            "Full" => Ok(Self::Full),
            other => Err(DomainError::UnknownVariant {
                field: "case_type",
                value: other.to_string(),
            }),
        }
    }
}

/// Member entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub case_type: CaseType,
    /// Date the Half patch was recorded, if an admin recorded it
    pub half_date: Option<NaiveDate>,
    pub active: bool,
    /// Join date; the progression clock starts here
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Create a new prospect with an explicit join timestamp
    pub fn joined_at(name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            nickname: None,
            email: None,
            phone: None,
            case_type: CaseType::Prospect,
            half_date: None,
            active: true,
            created_at,
            updated_at: created_at,
        }
    }

    /// Join date (calendar day of `created_at`)
    #[inline]
    pub fn join_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Display name (nickname if set)
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.name)
    }

    /// Check whether this member is still a prospect
    #[inline]
    pub fn is_prospect(&self) -> bool {
        self.case_type == CaseType::Prospect
    }

    /// Change the member's classification at `at`
    ///
    /// Promoting to Half without an explicit date records the promotion day
    /// as the half-patch date, unless one is already recorded.
    pub fn promote(
        &mut self,
        case_type: CaseType,
        half_date: Option<NaiveDate>,
        at: DateTime<Utc>,
    ) {
        if case_type == CaseType::Half {
            self.half_date = half_date.or(self.half_date).or(Some(at.date_naive()));
        } else if half_date.is_some() {
            self.half_date = half_date;
        }
        self.case_type = case_type;
        self.updated_at = at;
    }

    /// Soft delete
    pub fn deactivate(&mut self, at: DateTime<Utc>) {
        self.active = false;
        self.updated_at = at;
    }
}
