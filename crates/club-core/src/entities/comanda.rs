//! Comanda entity - an open bar tab and its line items

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Tab lifecycle: open -> paid | cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComandaStatus {
    #[default]
    Open,
    Paid,
    Cancelled,
}

impl ComandaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ComandaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComandaStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::UnknownVariant {
                field: "comanda_status",
                value: other.to_string(),
            }),
        }
    }
}

/// How a tab was settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Pix,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Pix => "pix",
            Self::Card => "card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "pix" => Ok(Self::Pix),
            "card" => Ok(Self::Card),
            other => Err(DomainError::UnknownVariant {
                field: "payment_method",
                value: other.to_string(),
            }),
        }
    }
}

/// Line item on a tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComandaItem {
    pub id: Uuid,
    pub comanda_id: Uuid,
    /// Linked inventory item, if the drink comes from stock
    pub stock_item_id: Option<Uuid>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl ComandaItem {
    pub fn new(
        comanda_id: Uuid,
        stock_item_id: Option<Uuid>,
        description: String,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<Self, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantity(quantity));
        }
        if unit_price.is_sign_negative() {
            return Err(DomainError::InvalidAmount(unit_price.to_string()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            comanda_id,
            stock_item_id,
            description,
            quantity,
            unit_price,
            created_at: Utc::now(),
        })
    }

    #[inline]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Bar tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comanda {
    pub id: Uuid,
    pub customer_name: String,
    pub member_id: Option<Uuid>,
    pub status: ComandaStatus,
    pub items: Vec<ComandaItem>,
    pub payment_method: Option<PaymentMethod>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Comanda {
    /// Open a new, empty tab
    pub fn open(customer_name: String, member_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_name,
            member_id,
            status: ComandaStatus::Open,
            items: Vec::new(),
            payment_method: None,
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == ComandaStatus::Open
    }

    /// Fail unless the tab still accepts changes
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DomainError::ComandaNotOpen(self.status.as_str()))
        }
    }

    /// Sum of quantity x unit price over all items
    pub fn total(&self) -> Decimal {
        self.items.iter().map(ComandaItem::subtotal).sum()
    }

    /// Find a line item by ID
    pub fn item(&self, item_id: Uuid) -> Option<&ComandaItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Settle the tab
    pub fn pay(&mut self, method: PaymentMethod, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.status = ComandaStatus::Paid;
        self.payment_method = Some(method);
        self.closed_at = Some(at);
        Ok(())
    }

    /// Void the tab
    pub fn cancel(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.ensure_open()?;
        self.status = ComandaStatus::Cancelled;
        self.closed_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab_with_items() -> Comanda {
        let mut comanda = Comanda::open("Visitante".to_string(), None);
        comanda.items.push(
            ComandaItem::new(comanda.id, None, "Cerveja".to_string(), 3, Decimal::new(850, 2))
                .unwrap(),
        );
        comanda.items.push(
            ComandaItem::new(comanda.id, None, "Refrigerante".to_string(), 1, Decimal::new(600, 2))
                .unwrap(),
        );
        comanda
    }

    #[test]
    fn test_total() {
        let comanda = tab_with_items();
        assert_eq!(comanda.total(), Decimal::new(3150, 2));
    }

    #[test]
    fn test_empty_total_is_zero() {
        let comanda = Comanda::open("Visitante".to_string(), None);
        assert_eq!(comanda.total(), Decimal::ZERO);
    }

    #[test]
    fn test_item_validation() {
        let id = Uuid::new_v4();
        assert!(ComandaItem::new(id, None, "x".to_string(), 0, Decimal::ONE).is_err());
        assert!(ComandaItem::new(id, None, "x".to_string(), 1, Decimal::NEGATIVE_ONE).is_err());
        assert!(ComandaItem::new(id, None, "x".to_string(), 1, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_pay_closes_tab() {
        let mut comanda = tab_with_items();
        comanda.pay(PaymentMethod::Pix, Utc::now()).unwrap();
        assert_eq!(comanda.status, ComandaStatus::Paid);
        assert!(comanda.closed_at.is_some());

        let err = comanda.ensure_open().unwrap_err();
        assert!(matches!(err, DomainError::ComandaNotOpen("paid")));
        assert!(comanda.cancel(Utc::now()).is_err());
    }
}
