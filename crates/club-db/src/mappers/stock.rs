//! Stock models -> entities

use club_core::{DomainError, StockItem, StockMovement};

use super::{ensure, parse_column};
use crate::models::{StockItemModel, StockMovementModel};

impl TryFrom<StockItemModel> for StockItem {
    type Error = DomainError;

    fn try_from(model: StockItemModel) -> Result<Self, Self::Error> {
        ensure("stock_item", model.quantity >= 0, || {
            format!("item {} has negative quantity ({})", model.id, model.quantity)
        })?;
        ensure("stock_item", !model.unit_price.is_sign_negative(), || {
            format!("item {} has negative price", model.id)
        })?;

        Ok(StockItem {
            id: model.id,
            name: model.name,
            category: model.category,
            unit: model.unit,
            quantity: model.quantity,
            min_quantity: model.min_quantity,
            unit_price: model.unit_price,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<StockMovementModel> for StockMovement {
    type Error = DomainError;

    fn try_from(model: StockMovementModel) -> Result<Self, Self::Error> {
        Ok(StockMovement {
            id: model.id,
            item_id: model.item_id,
            kind: parse_column("stock_movement", &model.kind)?,
            quantity: model.quantity,
            note: model.note,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_negative_quantity_is_rejected() {
        let row = StockItemModel {
            id: Uuid::new_v4(),
            name: "Cerveja".to_string(),
            category: "bebidas".to_string(),
            unit: "lata".to_string(),
            quantity: -1,
            min_quantity: 0,
            unit_price: Decimal::new(800, 2),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(StockItem::try_from(row).is_err());
    }
}
