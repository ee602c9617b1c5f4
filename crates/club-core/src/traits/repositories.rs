//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations that touch more than one table
//! (stock level and movement log, tab item and stock, invoice and shares)
//! are single methods so implementations can run them atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{
    Activity, CaseType, Comanda, ComandaItem, ComandaStatus, DuesShare, Invoice, Member,
    StockItem, StockMovement,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

/// Filter and pagination options for member listings
#[derive(Debug, Clone)]
pub struct MemberQuery {
    pub case_type: Option<CaseType>,
    pub active_only: bool,
    pub offset: i64,
    pub limit: i64,
}

impl Default for MemberQuery {
    fn default() -> Self {
        Self {
            case_type: None,
            active_only: true,
            offset: 0,
            limit: 50,
        }
    }
}

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>>;

    /// List members ordered by name
    async fn list(&self, query: &MemberQuery) -> RepoResult<Vec<Member>>;

    /// All active members, unpaginated
    async fn find_active(&self) -> RepoResult<Vec<Member>>;

    /// Create a new member
    async fn create(&self, member: &Member) -> RepoResult<()>;

    /// Update an existing member
    async fn update(&self, member: &Member) -> RepoResult<()>;
}

// ============================================================================
// Activity Repository
// ============================================================================

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Find activity by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Activity>>;

    /// All activities of one member, oldest first
    async fn find_by_member(&self, member_id: Uuid) -> RepoResult<Vec<Activity>>;

    /// Review queue, oldest first
    async fn find_pending(&self) -> RepoResult<Vec<Activity>>;

    /// Every activity of every member
    async fn find_all(&self) -> RepoResult<Vec<Activity>>;

    /// Create a new activity
    ///
    /// Fails with `MonthlyLimitReached` when a non-rejected activity of the
    /// same member already holds the monthly slot. The check and the insert
    /// are atomic per member.
    async fn create(&self, activity: &Activity) -> RepoResult<()>;

    /// Persist the review outcome carried by `activity`
    ///
    /// Fails with `ActivityAlreadyReviewed` unless the stored activity is
    /// still pending, and with `MonthlyLimitReached` when a validated outcome
    /// would take a slot another validated activity holds.
    async fn record_review(&self, activity: &Activity) -> RepoResult<()>;

    /// Hard delete an activity that is still pending
    async fn delete_pending(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Stock Repository
// ============================================================================

#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Find item by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<StockItem>>;

    /// List all items ordered by category and name
    async fn list(&self) -> RepoResult<Vec<StockItem>>;

    /// Items at or below their minimum level
    async fn find_low(&self) -> RepoResult<Vec<StockItem>>;

    /// Create a new item
    async fn create(&self, item: &StockItem) -> RepoResult<()>;

    /// Update descriptive fields. Never touches the quantity.
    async fn update(&self, item: &StockItem) -> RepoResult<()>;

    /// Apply a movement to the item level and log it, atomically
    ///
    /// Fails with `InsufficientStock` when an exit exceeds the level; the
    /// level is left unchanged in that case.
    async fn record_movement(&self, movement: &StockMovement) -> RepoResult<StockItem>;

    /// Most recent movements of an item, newest first
    async fn find_movements(&self, item_id: Uuid, limit: i64) -> RepoResult<Vec<StockMovement>>;
}

// ============================================================================
// Comanda Repository
// ============================================================================

#[async_trait]
pub trait ComandaRepository: Send + Sync {
    /// Find tab by ID, items included
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comanda>>;

    /// List tabs, newest first, optionally by status
    async fn list(&self, status: Option<ComandaStatus>) -> RepoResult<Vec<Comanda>>;

    /// Tabs settled at or after `since`
    async fn find_paid_since(&self, since: DateTime<Utc>) -> RepoResult<Vec<Comanda>>;

    /// Create a new, empty tab
    async fn create(&self, comanda: &Comanda) -> RepoResult<()>;

    /// Add an item, taking it out of stock in the same transaction
    async fn add_item(&self, item: &ComandaItem, stock_exit: Option<&StockMovement>)
        -> RepoResult<()>;

    /// Remove an item, putting it back in stock in the same transaction
    async fn remove_item(
        &self,
        comanda_id: Uuid,
        item_id: Uuid,
        restock: Option<&StockMovement>,
    ) -> RepoResult<()>;

    /// Persist status, payment method and close time, applying any restock
    async fn close(&self, comanda: &Comanda, restock: &[StockMovement]) -> RepoResult<()>;
}

// ============================================================================
// Invoice Repository
// ============================================================================

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Find invoice by ID, shares included
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invoice>>;

    /// List invoices, newest due date first
    async fn list(&self) -> RepoResult<Vec<Invoice>>;

    /// Shares owed by one member
    async fn find_shares_by_member(&self, member_id: Uuid) -> RepoResult<Vec<DuesShare>>;

    /// Create an invoice together with its shares
    async fn create(&self, invoice: &Invoice) -> RepoResult<()>;

    /// Persist the payment state of a share
    async fn update_share(&self, share: &DuesShare) -> RepoResult<()>;
}
