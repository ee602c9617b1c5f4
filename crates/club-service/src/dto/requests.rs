//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Dates are ISO-8601 (`YYYY-MM-DD`); money is a decimal string or number.

use chrono::NaiveDate;
use club_core::{round_cents, ActivityKind, CaseType, MovementKind, PaymentMethod};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("non_negative")
            .with_message("Amount must not be negative".into()));
    }
    Ok(())
}

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive").with_message("Amount must be positive".into()));
    }
    Ok(())
}

fn at_most_cents(value: &Decimal) -> Result<(), ValidationError> {
    if round_cents(*value) != *value {
        return Err(ValidationError::new("cents")
            .with_message("Amount must have at most two decimal places".into()));
    }
    Ok(())
}

fn price(value: &Decimal) -> Result<(), ValidationError> {
    non_negative(value)?;
    at_most_cents(value)
}

fn total(value: &Decimal) -> Result<(), ValidationError> {
    positive(value)?;
    at_most_cents(value)
}

// ============================================================================
// Member Requests
// ============================================================================

/// Register a member
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(length(max = 60, message = "Nickname must be at most 60 characters"))]
    pub nickname: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,

    /// Defaults to Prospect
    pub case_type: Option<CaseType>,

    pub half_date: Option<NaiveDate>,

    /// Backfilled join date for members registered after the fact
    pub joined_at: Option<NaiveDate>,
}

/// Partial member update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 60, message = "Nickname must be at most 60 characters"))]
    pub nickname: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,
}

/// Change a member's classification
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PromoteMemberRequest {
    pub case_type: CaseType,

    /// Date the Half patch was granted; defaults to today when promoting to Half
    pub half_date: Option<NaiveDate>,
}

// ============================================================================
// Activity Requests
// ============================================================================

/// Log a prospect activity
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LogActivityRequest {
    pub activity_type: ActivityKind,

    pub activity_date: NaiveDate,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

/// Validate or reject a pending activity
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewActivityRequest {
    #[validate(length(min = 1, max = 120, message = "Reviewer must be 1-120 characters"))]
    pub reviewer: String,
}

// ============================================================================
// Stock Requests
// ============================================================================

/// Create an inventory item
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStockItemRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 60, message = "Category must be 1-60 characters"))]
    pub category: String,

    #[validate(length(min = 1, max = 30, message = "Unit must be 1-30 characters"))]
    pub unit: String,

    #[validate(custom(function = "price"))]
    pub unit_price: Decimal,

    #[serde(default)]
    #[validate(range(min = 0, message = "Minimum quantity must not be negative"))]
    pub min_quantity: i32,

    /// Opening level, logged as an entry movement
    #[validate(range(min = 0, message = "Initial quantity must not be negative"))]
    pub initial_quantity: Option<i32>,
}

/// Partial inventory item update; the level changes only through movements
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStockItemRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 60, message = "Category must be 1-60 characters"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 30, message = "Unit must be 1-30 characters"))]
    pub unit: Option<String>,

    #[validate(custom(function = "price"))]
    pub unit_price: Option<Decimal>,

    #[validate(range(min = 0, message = "Minimum quantity must not be negative"))]
    pub min_quantity: Option<i32>,
}

/// Record a stock movement
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordMovementRequest {
    pub kind: MovementKind,

    /// Units moved for entry/exit, resulting level for adjustment
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,

    #[validate(length(max = 200, message = "Note must be at most 200 characters"))]
    pub note: Option<String>,
}

// ============================================================================
// Comanda Requests
// ============================================================================

/// Open a bar tab
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OpenComandaRequest {
    #[validate(length(min = 1, max = 120, message = "Customer name must be 1-120 characters"))]
    pub customer_name: String,

    pub member_id: Option<Uuid>,
}

/// Add a line to a tab
///
/// Either `stock_item_id` is set (description and price default from the
/// item) or both `description` and `unit_price` are.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddComandaItemRequest {
    pub stock_item_id: Option<Uuid>,

    #[validate(length(min = 1, max = 120, message = "Description must be 1-120 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 999, message = "Quantity must be 1-999"))]
    pub quantity: i32,

    #[validate(custom(function = "price"))]
    pub unit_price: Option<Decimal>,
}

/// Settle a tab
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PayComandaRequest {
    pub payment_method: PaymentMethod,
}

// ============================================================================
// Dues Requests
// ============================================================================

/// Bill dues split equally among members
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceRequest {
    #[validate(length(min = 1, max = 200, message = "Description must be 1-200 characters"))]
    pub description: String,

    #[validate(custom(function = "total"))]
    pub total_amount: Decimal,

    pub due_date: NaiveDate,

    #[validate(length(min = 1, max = 500, message = "Between 1 and 500 members are required"))]
    pub member_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_member_validation() {
        let request: CreateMemberRequest =
            serde_json::from_value(json!({ "name": "Carlos", "email": "not-an-email" })).unwrap();
        assert!(request.validate().is_err());

        let request: CreateMemberRequest =
            serde_json::from_value(json!({ "name": "Carlos", "case_type": "Half" })).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.case_type, Some(CaseType::Half));
    }

    #[test]
    fn test_empty_name_rejected() {
        let request: CreateMemberRequest =
            serde_json::from_value(json!({ "name": "" })).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_activity_request_parses_kind_and_date() {
        let request: LogActivityRequest = serde_json::from_value(json!({
            "activity_type": "meeting_attendance",
            "activity_date": "2024-03-05"
        }))
        .unwrap();
        assert_eq!(request.activity_type, ActivityKind::MeetingAttendance);
        assert_eq!(
            request.activity_date,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );

        let malformed = serde_json::from_value::<LogActivityRequest>(json!({
            "activity_type": "meeting_attendance",
            "activity_date": "05/03/2024"
        }));
        assert!(malformed.is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let request: CreateStockItemRequest = serde_json::from_value(json!({
            "name": "Cerveja",
            "category": "bebidas",
            "unit": "lata",
            "unit_price": "-1.00"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("unit_price"));
    }

    #[test]
    fn test_invoice_total_must_be_positive_cents() {
        let base = json!({
            "description": "Mensalidade",
            "due_date": "2024-04-10",
            "member_ids": [Uuid::new_v4()]
        });

        let mut zero = base.clone();
        zero["total_amount"] = json!("0");
        let request: CreateInvoiceRequest = serde_json::from_value(zero).unwrap();
        assert!(request.validate().is_err());

        let mut fractional = base.clone();
        fractional["total_amount"] = json!("10.005");
        let request: CreateInvoiceRequest = serde_json::from_value(fractional).unwrap();
        assert!(request.validate().is_err());

        let mut valid = base;
        valid["total_amount"] = json!("100.00");
        let request: CreateInvoiceRequest = serde_json::from_value(valid).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invoice_requires_members() {
        let request: CreateInvoiceRequest = serde_json::from_value(json!({
            "description": "Mensalidade",
            "total_amount": "100.00",
            "due_date": "2024-04-10",
            "member_ids": []
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}
