//! Service context - dependency container for services
//!
//! Holds all repositories, the clock, and the patch rules needed by services.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use club_core::traits::{
    ActivityRepository, Clock, ComandaRepository, InvoiceRepository, MemberRepository,
    StockRepository,
};
use club_core::{PatchRules, SystemClock};
use club_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Default revenue window for the dashboard, in days
pub const DEFAULT_REVENUE_DAYS: u32 = 30;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (PostgreSQL in production, in-memory in tests)
/// - The clock every "now" is read from
/// - The configured patch thresholds
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, absent when running over in-memory repositories
    pool: Option<PgPool>,

    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    stock_repo: Arc<dyn StockRepository>,
    comanda_repo: Arc<dyn ComandaRepository>,
    invoice_repo: Arc<dyn InvoiceRepository>,

    clock: Arc<dyn Clock>,
    rules: PatchRules,
    revenue_days: u32,
}

impl ServiceContext {
    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if the context is database-backed
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the activity repository
    pub fn activity_repo(&self) -> &dyn ActivityRepository {
        self.activity_repo.as_ref()
    }

    /// Get the stock repository
    pub fn stock_repo(&self) -> &dyn StockRepository {
        self.stock_repo.as_ref()
    }

    /// Get the comanda repository
    pub fn comanda_repo(&self) -> &dyn ComandaRepository {
        self.comanda_repo.as_ref()
    }

    /// Get the invoice repository
    pub fn invoice_repo(&self) -> &dyn InvoiceRepository {
        self.invoice_repo.as_ref()
    }

    // === Time and rules ===

    /// Current instant according to the injected clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Current calendar date according to the injected clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Patch eligibility thresholds
    pub fn rules(&self) -> &PatchRules {
        &self.rules
    }

    /// Default dashboard revenue window in days
    pub fn revenue_days(&self) -> u32 {
        self.revenue_days
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("rules", &self.rules)
            .field("revenue_days", &self.revenue_days)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    stock_repo: Option<Arc<dyn StockRepository>>,
    comanda_repo: Option<Arc<dyn ComandaRepository>>,
    invoice_repo: Option<Arc<dyn InvoiceRepository>>,
    clock: Option<Arc<dyn Clock>>,
    rules: Option<PatchRules>,
    revenue_days: Option<u32>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            member_repo: None,
            activity_repo: None,
            stock_repo: None,
            comanda_repo: None,
            invoice_repo: None,
            clock: None,
            rules: None,
            revenue_days: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn stock_repo(mut self, repo: Arc<dyn StockRepository>) -> Self {
        self.stock_repo = Some(repo);
        self
    }

    pub fn comanda_repo(mut self, repo: Arc<dyn ComandaRepository>) -> Self {
        self.comanda_repo = Some(repo);
        self
    }

    pub fn invoice_repo(mut self, repo: Arc<dyn InvoiceRepository>) -> Self {
        self.invoice_repo = Some(repo);
        self
    }

    /// Clock override; defaults to the system clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn rules(mut self, rules: PatchRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn revenue_days(mut self, days: u32) -> Self {
        self.revenue_days = Some(days);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first absent component
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            member_repo: self
                .member_repo
                .ok_or(ServiceError::MissingDependency("member_repo"))?,
            activity_repo: self
                .activity_repo
                .ok_or(ServiceError::MissingDependency("activity_repo"))?,
            stock_repo: self
                .stock_repo
                .ok_or(ServiceError::MissingDependency("stock_repo"))?,
            comanda_repo: self
                .comanda_repo
                .ok_or(ServiceError::MissingDependency("comanda_repo"))?,
            invoice_repo: self
                .invoice_repo
                .ok_or(ServiceError::MissingDependency("invoice_repo"))?,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            rules: self
                .rules
                .ok_or(ServiceError::MissingDependency("patch rules"))?,
            revenue_days: self.revenue_days.unwrap_or(DEFAULT_REVENUE_DAYS),
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
