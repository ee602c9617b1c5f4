//! Ports the domain depends on

mod clock;
mod repositories;

pub use clock::{Clock, FixedClock, SystemClock};
pub use repositories::{
    ActivityRepository, ComandaRepository, InvoiceRepository, MemberQuery, MemberRepository,
    RepoResult, StockRepository,
};
