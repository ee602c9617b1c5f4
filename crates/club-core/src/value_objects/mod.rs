//! Value objects - immutable types that represent domain concepts

mod calendar;
mod money;

pub use calendar::{add_months, months_between, YearMonth};
pub use money::{round_cents, CENTS};
