//! Comanda models -> entity

use club_core::{Comanda, ComandaItem, DomainError};

use super::{ensure, parse_column};
use crate::models::{ComandaItemModel, ComandaModel};

impl TryFrom<ComandaItemModel> for ComandaItem {
    type Error = DomainError;

    fn try_from(model: ComandaItemModel) -> Result<Self, Self::Error> {
        ensure("comanda_item", model.quantity > 0, || {
            format!("item {} has non-positive quantity ({})", model.id, model.quantity)
        })?;
        ensure("comanda_item", !model.unit_price.is_sign_negative(), || {
            format!("item {} has negative price", model.id)
        })?;

        Ok(ComandaItem {
            id: model.id,
            comanda_id: model.comanda_id,
            stock_item_id: model.stock_item_id,
            description: model.description,
            quantity: model.quantity,
            unit_price: model.unit_price,
            created_at: model.created_at,
        })
    }
}

/// Assemble a tab from its row and its item rows
pub fn comanda_with_items(
    model: ComandaModel,
    items: Vec<ComandaItemModel>,
) -> Result<Comanda, DomainError> {
    let payment_method = model
        .payment_method
        .as_deref()
        .map(|raw| parse_column("comanda", raw))
        .transpose()?;

    Ok(Comanda {
        id: model.id,
        customer_name: model.customer_name,
        member_id: model.member_id,
        status: parse_column("comanda", &model.status)?,
        items: items
            .into_iter()
            .map(ComandaItem::try_from)
            .collect::<Result<_, _>>()?,
        payment_method,
        opened_at: model.opened_at,
        closed_at: model.closed_at,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use club_core::{ComandaStatus, PaymentMethod};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    fn model(status: &str, payment_method: Option<&str>) -> ComandaModel {
        ComandaModel {
            id: Uuid::new_v4(),
            customer_name: "Mesa 4".to_string(),
            member_id: None,
            status: status.to_string(),
            payment_method: payment_method.map(String::from),
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    #[test]
    fn test_assembles_items() {
        let row = model("paid", Some("pix"));
        let item = ComandaItemModel {
            id: Uuid::new_v4(),
            comanda_id: row.id,
            stock_item_id: None,
            description: "Cerveja".to_string(),
            quantity: 2,
            unit_price: Decimal::new(900, 2),
            created_at: Utc::now(),
        };

        let comanda = comanda_with_items(row, vec![item]).unwrap();
        assert_eq!(comanda.status, ComandaStatus::Paid);
        assert_eq!(comanda.payment_method, Some(PaymentMethod::Pix));
        assert_eq!(comanda.total(), Decimal::new(1800, 2));
    }

    #[test]
    fn test_unknown_payment_method_is_rejected() {
        let err = comanda_with_items(model("paid", Some("cheque")), Vec::new()).unwrap_err();
        assert_eq!(err.code(), "INVALID_RECORD");
    }
}
