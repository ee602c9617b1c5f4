//! Path parameter extractors
//!
//! Path segments arrive as strings and are parsed into UUIDs here so a
//! malformed id is a 400 rather than an axum rejection.

use serde::Deserialize;
use uuid::Uuid;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Single `:id` segment
#[derive(Debug, Deserialize)]
pub struct IdPath {
    pub id: String,
}

impl IdPath {
    pub fn id(&self) -> Result<Uuid, ApiError> {
        parse_id(&self.id, "id")
    }
}

/// Tab line: `/comandas/:id/items/:item_id`
#[derive(Debug, Deserialize)]
pub struct ItemPath {
    pub id: String,
    pub item_id: String,
}

impl ItemPath {
    pub fn id(&self) -> Result<Uuid, ApiError> {
        parse_id(&self.id, "id")
    }

    pub fn item_id(&self) -> Result<Uuid, ApiError> {
        parse_id(&self.item_id, "item_id")
    }
}

/// Dues share: `/invoices/:id/shares/:member_id`
#[derive(Debug, Deserialize)]
pub struct InvoiceMemberPath {
    pub id: String,
    pub member_id: String,
}

impl InvoiceMemberPath {
    pub fn id(&self) -> Result<Uuid, ApiError> {
        parse_id(&self.id, "id")
    }

    pub fn member_id(&self) -> Result<Uuid, ApiError> {
        parse_id(&self.member_id, "member_id")
    }
}
