//! # club-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! patch progression calculator.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod dashboard;
pub mod entities;
pub mod error;
pub mod progression;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use dashboard::{DashboardSnapshot, DashboardSummary, EligibleProspect, MemberCounts};
pub use entities::{
    ensure_monthly_slot, find_monthly_conflict, split_equally, Activity, ActivityKind,
    ActivityStatus, CaseType, Comanda, ComandaItem, ComandaStatus, DuesShare, Invoice, Member,
    MovementKind, PaymentMethod, StockItem, StockMovement,
};
pub use error::DomainError;
pub use progression::{
    HalfPatchDateSource, MilestoneProgress, PatchRules, PatchRulesError, ProspectStats,
};
pub use traits::{
    ActivityRepository, Clock, ComandaRepository, FixedClock, InvoiceRepository, MemberQuery,
    MemberRepository, RepoResult, StockRepository, SystemClock,
};
pub use value_objects::{add_months, months_between, round_cents, YearMonth};
