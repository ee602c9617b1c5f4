//! Dues service
//!
//! Invoices split equally among members, to the cent.

use club_core::{DomainError, Invoice};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{CreateInvoiceRequest, DuesShareResponse, InvoiceResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::member::find_member;

/// Dues service
pub struct DuesService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DuesService<'a> {
    /// Create a new DuesService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Bill `total_amount` split equally among the given members
    #[instrument(skip(self, request), fields(members = request.member_ids.len()))]
    pub async fn create_invoice(&self, request: CreateInvoiceRequest) -> ServiceResult<InvoiceResponse> {
        let description = request.description.trim().to_string();
        if description.is_empty() {
            return Err(ServiceError::validation("description must not be blank"));
        }

        for member_id in &request.member_ids {
            find_member(self.ctx, *member_id).await?;
        }

        let mut invoice = Invoice::split_among(
            description,
            request.total_amount,
            request.due_date,
            &request.member_ids,
        )?;
        invoice.created_at = self.ctx.now();

        self.ctx.invoice_repo().create(&invoice).await?;

        info!(
            invoice_id = %invoice.id,
            total = %invoice.total_amount,
            shares = invoice.shares.len(),
            "Invoice created"
        );

        Ok(InvoiceResponse::from(invoice))
    }

    /// All invoices with their shares, latest due date first
    #[instrument(skip(self))]
    pub async fn list_invoices(&self) -> ServiceResult<Vec<InvoiceResponse>> {
        let invoices = self.ctx.invoice_repo().list().await?;
        Ok(invoices.iter().map(InvoiceResponse::from).collect())
    }

    /// Mark one member's share of an invoice as paid
    #[instrument(skip(self))]
    pub async fn pay_share(&self, invoice_id: Uuid, member_id: Uuid) -> ServiceResult<InvoiceResponse> {
        let mut invoice = self
            .ctx
            .invoice_repo()
            .find_by_id(invoice_id)
            .await?
            .ok_or(DomainError::InvoiceNotFound(invoice_id))?;

        let now = self.ctx.now();
        let share = invoice
            .share_for_mut(member_id)
            .ok_or(DomainError::DuesShareNotFound {
                invoice_id,
                member_id,
            })?;
        share.mark_paid(now)?;
        let share = share.clone();

        self.ctx.invoice_repo().update_share(&share).await?;

        info!(
            invoice_id = %invoice_id,
            member_id = %member_id,
            amount = %share.amount,
            "Dues share paid"
        );

        Ok(InvoiceResponse::from(invoice))
    }

    /// Every share billed to a member
    #[instrument(skip(self))]
    pub async fn member_shares(&self, member_id: Uuid) -> ServiceResult<Vec<DuesShareResponse>> {
        find_member(self.ctx, member_id).await?;
        let shares = self.ctx.invoice_repo().find_shares_by_member(member_id).await?;
        Ok(shares.into_iter().map(DuesShareResponse::from).collect())
    }
}
