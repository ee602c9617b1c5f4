//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod activity;
pub mod comanda;
pub mod context;
pub mod dashboard;
pub mod dues;
pub mod error;
pub mod member;
pub mod progression;
pub mod stock;

// Re-export all services for convenience
pub use activity::ActivityService;
pub use comanda::ComandaService;
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_REVENUE_DAYS};
pub use dashboard::DashboardService;
pub use dues::DuesService;
pub use error::{ServiceError, ServiceResult};
pub use member::MemberService;
pub use progression::ProgressionService;
pub use stock::StockService;
