//! Money helpers
//!
//! Amounts are `rust_decimal::Decimal` rounded to cents (2 decimal places).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for monetary values
pub const CENTS: u32 = 2;

/// Round a monetary value to cents (half away from zero)
#[inline]
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero)
}
