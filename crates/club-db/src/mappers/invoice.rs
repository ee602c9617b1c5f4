//! Invoice models -> entity

use club_core::{DomainError, DuesShare, Invoice};

use super::ensure;
use crate::models::{DuesShareModel, InvoiceModel};

impl From<DuesShareModel> for DuesShare {
    fn from(model: DuesShareModel) -> Self {
        DuesShare {
            invoice_id: model.invoice_id,
            member_id: model.member_id,
            amount: model.amount,
            paid_at: model.paid_at,
        }
    }
}

/// Assemble an invoice from its row and its share rows
pub fn invoice_with_shares(
    model: InvoiceModel,
    shares: Vec<DuesShareModel>,
) -> Result<Invoice, DomainError> {
    let shares: Vec<DuesShare> = shares.into_iter().map(DuesShare::from).collect();
    if !shares.is_empty() {
        let sum: rust_decimal::Decimal = shares.iter().map(|s| s.amount).sum();
        ensure("invoice", sum == model.total_amount, || {
            format!(
                "invoice {} shares add up to {sum}, total is {}",
                model.id, model.total_amount
            )
        })?;
    }

    Ok(Invoice {
        id: model.id,
        description: model.description,
        total_amount: model.total_amount,
        due_date: model.due_date,
        shares,
        created_at: model.created_at,
    })
}
