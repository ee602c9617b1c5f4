//! Model to entity mappers
//!
//! Rows are converted with `TryFrom` so that unknown enum strings and
//! impossible values are rejected as `DomainError::InvalidRecord` instead of
//! leaking into the domain.

mod activity;
mod comanda;
mod invoice;
mod member;
mod stock;

use std::str::FromStr;

use club_core::DomainError;

pub use comanda::comanda_with_items;
pub use invoice::invoice_with_shares;

/// Parse a stored enum column
fn parse_column<T>(entity: &'static str, raw: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = DomainError>,
{
    raw.parse()
        .map_err(|e: DomainError| DomainError::invalid_record(entity, e.to_string()))
}

fn ensure(entity: &'static str, ok: bool, reason: impl FnOnce() -> String) -> Result<(), DomainError> {
    if ok {
        Ok(())
    } else {
        Err(DomainError::invalid_record(entity, reason()))
    }
}

#[cfg(test)]
mod tests {
    use club_core::CaseType;

    use super::*;

    #[test]
    fn test_parse_column() {
        let parsed: CaseType = parse_column("member", "Half").unwrap();
        assert_eq!(parsed, CaseType::Half);

        let err = parse_column::<CaseType>("member", "half").unwrap_err();
        assert_eq!(err.code(), "INVALID_RECORD");
        assert!(err.to_string().contains("member"));
    }
}
