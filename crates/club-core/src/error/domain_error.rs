//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::YearMonth;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    #[error("Activity not found: {0}")]
    ActivityNotFound(Uuid),

    #[error("Stock item not found: {0}")]
    StockItemNotFound(Uuid),

    #[error("Comanda not found: {0}")]
    ComandaNotFound(Uuid),

    #[error("Comanda item not found: {0}")]
    ComandaItemNotFound(Uuid),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(Uuid),

    #[error("Dues share not found for member {member_id} on invoice {invoice_id}")]
    DuesShareNotFound { invoice_id: Uuid, member_id: Uuid },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown {field} value: {value}")]
    UnknownVariant { field: &'static str, value: String },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Activity '{kind}' already logged for {month}")]
    MonthlyLimitReached { kind: &'static str, month: YearMonth },

    #[error("Activity already reviewed (status: {0})")]
    ActivityAlreadyReviewed(&'static str),

    #[error("Comanda is not open (status: {0})")]
    ComandaNotOpen(&'static str),

    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Dues share already paid")]
    DuesShareAlreadyPaid,

    #[error("Member is inactive")]
    MemberInactive,

    // =========================================================================
    // Boundary Errors
    // =========================================================================
    #[error("Invalid {entity} record: {reason}")]
    InvalidRecord { entity: &'static str, reason: String },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::ActivityNotFound(_) => "UNKNOWN_ACTIVITY",
            Self::StockItemNotFound(_) => "UNKNOWN_STOCK_ITEM",
            Self::ComandaNotFound(_) => "UNKNOWN_COMANDA",
            Self::ComandaItemNotFound(_) => "UNKNOWN_COMANDA_ITEM",
            Self::InvoiceNotFound(_) => "UNKNOWN_INVOICE",
            Self::DuesShareNotFound { .. } => "UNKNOWN_DUES_SHARE",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::UnknownVariant { .. } => "UNKNOWN_VARIANT",

            // Conflict
            Self::MonthlyLimitReached { .. } => "MONTHLY_LIMIT_REACHED",
            Self::ActivityAlreadyReviewed(_) => "ACTIVITY_ALREADY_REVIEWED",
            Self::ComandaNotOpen(_) => "COMANDA_NOT_OPEN",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::DuesShareAlreadyPaid => "DUES_SHARE_ALREADY_PAID",
            Self::MemberInactive => "MEMBER_INACTIVE",

            // Boundary
            Self::InvalidRecord { .. } => "INVALID_RECORD",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_)
                | Self::ActivityNotFound(_)
                | Self::StockItemNotFound(_)
                | Self::ComandaNotFound(_)
                | Self::ComandaItemNotFound(_)
                | Self::InvoiceNotFound(_)
                | Self::DuesShareNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidQuantity(_)
                | Self::InvalidAmount(_)
                | Self::UnknownVariant { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::MonthlyLimitReached { .. }
                | Self::ActivityAlreadyReviewed(_)
                | Self::ComandaNotOpen(_)
                | Self::InsufficientStock { .. }
                | Self::DuesShareAlreadyPaid
                | Self::MemberInactive
        )
    }

    /// Create an invalid-record error for data coming from the store
    pub fn invalid_record(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            entity,
            reason: reason.into(),
        }
    }
}
