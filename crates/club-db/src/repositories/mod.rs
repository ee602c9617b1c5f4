//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in club-core.
//! Each repository handles database operations for a specific domain entity.

mod activity;
mod comanda;
mod error;
mod invoice;
mod member;
mod stock;

pub use activity::PgActivityRepository;
pub use comanda::PgComandaRepository;
pub use invoice::PgInvoiceRepository;
pub use member::PgMemberRepository;
pub use stock::PgStockRepository;
