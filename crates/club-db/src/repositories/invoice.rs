//! PostgreSQL implementation of InvoiceRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use club_core::traits::{InvoiceRepository, RepoResult};
use club_core::{DomainError, DuesShare, Invoice};

use crate::mappers::invoice_with_shares;
use crate::models::{DuesShareModel, InvoiceModel};

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of InvoiceRepository
#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    /// Create a new PgInvoiceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_shares(&self, models: Vec<InvoiceModel>) -> RepoResult<Vec<Invoice>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let shares = sqlx::query_as::<_, DuesShareModel>(
            r#"
            SELECT invoice_id, member_id, amount, paid_at
            FROM dues_shares
            WHERE invoice_id = ANY($1)
            "#,
        )
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut grouped: HashMap<Uuid, Vec<DuesShareModel>> = HashMap::new();
        for share in shares {
            grouped.entry(share.invoice_id).or_default().push(share);
        }

        models
            .into_iter()
            .map(|model| {
                let shares = grouped.remove(&model.id).unwrap_or_default();
                invoice_with_shares(model, shares)
            })
            .collect()
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invoice>> {
        let result = sqlx::query_as::<_, InvoiceModel>(
            r#"
            SELECT id, description, total_amount, due_date, created_at
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(self.with_shares(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Invoice>> {
        let results = sqlx::query_as::<_, InvoiceModel>(
            r#"
            SELECT id, description, total_amount, due_date, created_at
            FROM invoices
            ORDER BY due_date DESC, created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.with_shares(results).await
    }

    #[instrument(skip(self))]
    async fn find_shares_by_member(&self, member_id: Uuid) -> RepoResult<Vec<DuesShare>> {
        let results = sqlx::query_as::<_, DuesShareModel>(
            r#"
            SELECT s.invoice_id, s.member_id, s.amount, s.paid_at
            FROM dues_shares s
            JOIN invoices i ON i.id = s.invoice_id
            WHERE s.member_id = $1
            ORDER BY i.due_date DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DuesShare::from).collect())
    }

    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.id, shares = invoice.shares.len()))]
    async fn create(&self, invoice: &Invoice) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO invoices (id, description, total_amount, due_date, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(invoice.id)
        .bind(&invoice.description)
        .bind(invoice.total_amount)
        .bind(invoice.due_date)
        .bind(invoice.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for share in &invoice.shares {
            sqlx::query(
                r#"
                INSERT INTO dues_shares (invoice_id, member_id, amount, paid_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(share.invoice_id)
            .bind(share.member_id)
            .bind(share.amount)
            .bind(share.paid_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_fk_violation(e, || DomainError::MemberNotFound(share.member_id)))?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, share), fields(invoice_id = %share.invoice_id, member_id = %share.member_id))]
    async fn update_share(&self, share: &DuesShare) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE dues_shares
            SET paid_at = $3
            WHERE invoice_id = $1 AND member_id = $2
            "#,
        )
        .bind(share.invoice_id)
        .bind(share.member_id)
        .bind(share.paid_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::DuesShareNotFound {
                invoice_id: share.invoice_id,
                member_id: share.member_id,
            });
        }

        Ok(())
    }
}
