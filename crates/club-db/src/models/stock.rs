//! Stock database models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for stock_items table
#[derive(Debug, Clone, FromRow)]
pub struct StockItemModel {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: i32,
    pub min_quantity: i32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for stock_movements table
#[derive(Debug, Clone, FromRow)]
pub struct StockMovementModel {
    pub id: Uuid,
    pub item_id: Uuid,
    pub kind: String,
    pub quantity: i32,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}
