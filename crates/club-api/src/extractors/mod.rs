//! Axum extractors for request handling
//!
//! Custom extractors for validation, pagination, path ids and query filters.

mod pagination;
mod path;
mod query;
mod validated;

pub use pagination::{Pagination, PaginationParams};
pub use path::{IdPath, InvoiceMemberPath, ItemPath};
pub use query::{ComandaFilter, DashboardParams, MemberFilter};
pub use validated::ValidatedJson;
