//! Activity database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for activities table
#[derive(Debug, Clone, FromRow)]
pub struct ActivityModel {
    pub id: Uuid,
    pub prospect_id: Uuid,
    pub activity_type: String,
    pub activity_date: NaiveDate,
    pub description: Option<String>,
    pub status: String,
    pub points: i32,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
