//! Domain entities - core business objects

mod activity;
mod comanda;
mod invoice;
mod member;
mod stock;

pub use activity::{
    ensure_monthly_slot, find_monthly_conflict, Activity, ActivityKind, ActivityStatus,
};
pub use comanda::{Comanda, ComandaItem, ComandaStatus, PaymentMethod};
pub use invoice::{split_equally, DuesShare, Invoice};
pub use member::{CaseType, Member};
pub use stock::{MovementKind, StockItem, StockMovement};
