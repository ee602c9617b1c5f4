//! Comanda (bar tab) database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for comandas table
#[derive(Debug, Clone, FromRow)]
pub struct ComandaModel {
    pub id: Uuid,
    pub customer_name: String,
    pub member_id: Option<Uuid>,
    pub status: String,
    pub payment_method: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Database model for comanda_items table
#[derive(Debug, Clone, FromRow)]
pub struct ComandaItemModel {
    pub id: Uuid,
    pub comanda_id: Uuid,
    pub stock_item_id: Option<Uuid>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
}
