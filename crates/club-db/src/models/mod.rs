//! Database models - SQLx-compatible structs for PostgreSQL tables

mod activity;
mod comanda;
mod invoice;
mod member;
mod stock;

pub use activity::ActivityModel;
pub use comanda::{ComandaItemModel, ComandaModel};
pub use invoice::{DuesShareModel, InvoiceModel};
pub use member::MemberModel;
pub use stock::{StockItemModel, StockMovementModel};
