//! Dashboard service

use club_core::{ComandaStatus, DashboardSnapshot, DashboardSummary};
use chrono::Duration;
use tracing::instrument;

use crate::dto::DashboardResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Longest revenue window accepted, in days
pub const MAX_REVENUE_DAYS: u32 = 366;

/// Dashboard service
pub struct DashboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DashboardService<'a> {
    /// Create a new DashboardService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Club overview; `revenue_days` overrides the configured revenue window
    #[instrument(skip(self))]
    pub async fn summary(&self, revenue_days: Option<u32>) -> ServiceResult<DashboardResponse> {
        let revenue_days = revenue_days.unwrap_or_else(|| self.ctx.revenue_days());
        if revenue_days == 0 || revenue_days > MAX_REVENUE_DAYS {
            return Err(ServiceError::validation(format!(
                "revenue_days must be between 1 and {MAX_REVENUE_DAYS}"
            )));
        }

        let now = self.ctx.now();
        let members = self.ctx.member_repo().find_active().await?;
        let activities = self.ctx.activity_repo().find_all().await?;
        let mut comandas = self
            .ctx
            .comanda_repo()
            .list(Some(ComandaStatus::Open))
            .await?;
        comandas.extend(
            self.ctx
                .comanda_repo()
                .find_paid_since(now - Duration::days(i64::from(revenue_days)))
                .await?,
        );
        let stock = self.ctx.stock_repo().list().await?;
        let invoices = self.ctx.invoice_repo().list().await?;

        let snapshot = DashboardSnapshot {
            members: &members,
            activities: &activities,
            comandas: &comandas,
            stock: &stock,
            invoices: &invoices,
        };

        Ok(DashboardResponse {
            generated_at: now,
            summary: DashboardSummary::compute(&snapshot, now, self.ctx.rules(), revenue_days),
        })
    }
}
