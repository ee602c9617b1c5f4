//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddComandaItemRequest, CreateInvoiceRequest, CreateMemberRequest, CreateStockItemRequest,
    LogActivityRequest, OpenComandaRequest, PayComandaRequest, PromoteMemberRequest,
    RecordMovementRequest, ReviewActivityRequest, UpdateMemberRequest, UpdateStockItemRequest,
};

pub use responses::{
    ActivityKindResponse, ActivityResponse, ComandaItemResponse, ComandaResponse,
    DashboardResponse, DuesShareResponse, HealthChecks, HealthResponse, InvoiceResponse,
    MemberResponse, PaginatedResponse, PaginationMeta, ProgressionResponse, ReadinessResponse,
    StockItemDetailResponse, StockItemResponse, StockMovementResponse,
};
