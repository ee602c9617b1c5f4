//! Invoice database models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for invoices table
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceModel {
    pub id: Uuid,
    pub description: String,
    pub total_amount: Decimal,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Database model for dues_shares table
#[derive(Debug, Clone, FromRow)]
pub struct DuesShareModel {
    pub invoice_id: Uuid,
    pub member_id: Uuid,
    pub amount: Decimal,
    pub paid_at: Option<DateTime<Utc>>,
}
