//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Money is serialized as a decimal string to keep cents exact.

use chrono::{DateTime, NaiveDate, Utc};
use club_core::{
    ActivityKind, ActivityStatus, CaseType, ComandaStatus, DashboardSummary, MovementKind,
    PatchRules, PaymentMethod, ProspectStats,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with offset-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, offset: i64, limit: i64, has_more: bool) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                offset,
                limit,
                has_more,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Number of records skipped
    pub offset: i64,
    /// Page size limit used
    pub limit: i64,
    /// Whether more results exist
    pub has_more: bool,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub case_type: CaseType,
    pub half_date: Option<NaiveDate>,
    pub active: bool,
    pub joined_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patch progression of one member
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionResponse {
    pub member_id: Uuid,
    pub name: String,
    pub case_type: CaseType,
    pub rules: PatchRules,
    #[serde(flatten)]
    pub stats: ProspectStats,
}

// ============================================================================
// Activity Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ActivityResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub activity_type: ActivityKind,
    pub activity_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ActivityStatus,
    pub points: i32,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Catalogue entry for one activity kind
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ActivityKindResponse {
    pub activity_type: ActivityKind,
    pub points: i32,
    pub once_per_month: bool,
}

// ============================================================================
// Stock Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct StockItemResponse {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: i32,
    pub min_quantity: i32,
    pub unit_price: Decimal,
    pub low: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockMovementResponse {
    pub id: Uuid,
    pub item_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Item with its most recent movements
#[derive(Debug, Clone, Serialize)]
pub struct StockItemDetailResponse {
    #[serde(flatten)]
    pub item: StockItemResponse,
    pub movements: Vec<StockMovementResponse>,
}

// ============================================================================
// Comanda Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ComandaItemResponse {
    pub id: Uuid,
    pub stock_item_id: Option<Uuid>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComandaResponse {
    pub id: Uuid,
    pub customer_name: String,
    pub member_id: Option<Uuid>,
    pub status: ComandaStatus,
    pub payment_method: Option<PaymentMethod>,
    pub items: Vec<ComandaItemResponse>,
    pub total: Decimal,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Dues Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DuesShareResponse {
    pub invoice_id: Uuid,
    pub member_id: Uuid,
    pub amount: Decimal,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub description: String,
    pub total_amount: Decimal,
    pub due_date: NaiveDate,
    pub outstanding: Decimal,
    pub shares: Vec<DuesShareResponse>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Dashboard Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    /// `None` means the service runs without a database
    pub fn ready(database_healthy: Option<bool>) -> Self {
        let database = match database_healthy {
            Some(true) => "healthy",
            Some(false) => "unhealthy",
            None => "not_configured",
        };
        Self {
            status: if database_healthy == Some(false) { "not_ready" } else { "ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: database.to_string(),
            },
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
