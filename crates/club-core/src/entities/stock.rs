//! Stock entities - bar inventory and its movement log

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Stock item (a drink, snack, or any countable bar product)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    /// Unit label ("lata", "garrafa", "un")
    pub unit: String,
    /// Units on hand, never negative
    pub quantity: i32,
    /// Low-stock threshold
    pub min_quantity: i32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    /// Create a new, empty stock item
    pub fn new(name: String, category: String, unit: String, unit_price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            unit,
            quantity: 0,
            min_quantity: 0,
            unit_price,
            created_at: now,
            updated_at: now,
        }
    }

    /// At or below the low-stock threshold
    #[inline]
    pub fn is_low(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    /// Compute the quantity after applying a movement
    ///
    /// Does not mutate; repositories apply the result together with the log entry.
    pub fn quantity_after(&self, kind: MovementKind, quantity: i32) -> Result<i32, DomainError> {
        match kind {
            MovementKind::Entry | MovementKind::Exit if quantity <= 0 => {
                Err(DomainError::InvalidQuantity(quantity))
            }
            MovementKind::Adjustment if quantity < 0 => Err(DomainError::InvalidQuantity(quantity)),
            MovementKind::Entry => self
                .quantity
                .checked_add(quantity)
                .ok_or(DomainError::InvalidQuantity(quantity)),
            MovementKind::Exit => {
                if quantity > self.quantity {
                    Err(DomainError::InsufficientStock {
                        available: self.quantity,
                        requested: quantity,
                    })
                } else {
                    Ok(self.quantity - quantity)
                }
            }
            MovementKind::Adjustment => Ok(quantity),
        }
    }

    /// Apply a movement in place
    pub fn apply(&mut self, movement: &StockMovement) -> Result<(), DomainError> {
        self.quantity = self.quantity_after(movement.kind, movement.quantity)?;
        self.updated_at = movement.created_at;
        Ok(())
    }
}

/// Kind of inventory movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Goods received
    Entry,
    /// Goods consumed or sold
    Exit,
    /// Stock count; `quantity` is the counted level
    Adjustment,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Adjustment => "adjustment",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(Self::Entry),
            "exit" => Ok(Self::Exit),
            "adjustment" => Ok(Self::Adjustment),
            other => Err(DomainError::UnknownVariant {
                field: "movement_kind",
                value: other.to_string(),
            }),
        }
    }
}

/// One entry of the stock log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMovement {
    pub id: Uuid,
    pub item_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StockMovement {
    pub fn new(item_id: Uuid, kind: MovementKind, quantity: i32, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            kind,
            quantity,
            note,
            created_at: Utc::now(),
        }
    }
}
