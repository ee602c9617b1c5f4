//! Invoice entity - a dues bill split among members

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{round_cents, CENTS};

/// One member's part of an invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuesShare {
    pub invoice_id: Uuid,
    pub member_id: Uuid,
    pub amount: Decimal,
    pub paid_at: Option<DateTime<Utc>>,
}

impl DuesShare {
    #[inline]
    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }

    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        if self.is_paid() {
            return Err(DomainError::DuesShareAlreadyPaid);
        }
        self.paid_at = Some(at);
        Ok(())
    }
}

/// Dues invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub id: Uuid,
    pub description: String,
    pub total_amount: Decimal,
    pub due_date: NaiveDate,
    pub shares: Vec<DuesShare>,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Create an invoice split equally among `members`
    pub fn split_among(
        description: String,
        total_amount: Decimal,
        due_date: NaiveDate,
        members: &[Uuid],
    ) -> Result<Self, DomainError> {
        let id = Uuid::new_v4();
        let shares = split_equally(total_amount, members)?
            .into_iter()
            .map(|(member_id, amount)| DuesShare {
                invoice_id: id,
                member_id,
                amount,
                paid_at: None,
            })
            .collect();

        Ok(Self {
            id,
            description,
            total_amount,
            due_date,
            shares,
            created_at: Utc::now(),
        })
    }

    /// Sum of shares not yet paid
    pub fn outstanding(&self) -> Decimal {
        self.shares
            .iter()
            .filter(|s| !s.is_paid())
            .map(|s| s.amount)
            .sum()
    }

    pub fn share_for(&self, member_id: Uuid) -> Option<&DuesShare> {
        self.shares.iter().find(|s| s.member_id == member_id)
    }

    pub fn share_for_mut(&mut self, member_id: Uuid) -> Option<&mut DuesShare> {
        self.shares.iter_mut().find(|s| s.member_id == member_id)
    }
}

/// Split `total` equally among `members`, to the cent
///
/// Every share gets `total / n` rounded down to cents; the leftover cents go
/// one by one to the first members so the shares always add up to `total`.
pub fn split_equally(total: Decimal, members: &[Uuid]) -> Result<Vec<(Uuid, Decimal)>, DomainError> {
    if members.is_empty() {
        return Err(DomainError::ValidationError(
            "at least one member is required".to_string(),
        ));
    }
    if total <= Decimal::ZERO || round_cents(total) != total {
        return Err(DomainError::InvalidAmount(total.to_string()));
    }

    let mut seen = HashSet::with_capacity(members.len());
    if !members.iter().all(|id| seen.insert(*id)) {
        return Err(DomainError::ValidationError(
            "members must not repeat".to_string(),
        ));
    }

    let count = Decimal::from(members.len());
    let cent = Decimal::new(1, CENTS);
    let base = (total / count).round_dp_with_strategy(CENTS, RoundingStrategy::ToZero);
    let leftover = ((total - base * count) / cent)
        .to_usize()
        .ok_or_else(|| DomainError::InternalError("dues split overflow".to_string()))?;

    Ok(members
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let amount = if i < leftover { base + cent } else { base };
            (*id, amount)
        })
        .collect())
}
