//! # club-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(any(test, feature = "memory"))]
pub mod memory;

pub use services::{
    ActivityService, ComandaService, DashboardService, DuesService, MemberService,
    ProgressionService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    StockService,
};

pub use dto::{
    ActivityKindResponse, ActivityResponse, AddComandaItemRequest, ComandaResponse,
    CreateInvoiceRequest, CreateMemberRequest, CreateStockItemRequest, DashboardResponse,
    DuesShareResponse, HealthResponse, InvoiceResponse, LogActivityRequest, MemberResponse,
    OpenComandaRequest, PaginatedResponse, PayComandaRequest, ProgressionResponse,
    PromoteMemberRequest, ReadinessResponse, RecordMovementRequest, ReviewActivityRequest,
    StockItemDetailResponse, StockItemResponse, UpdateMemberRequest, UpdateStockItemRequest,
};
