//! PostgreSQL implementation of ComandaRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use club_core::traits::{ComandaRepository, RepoResult};
use club_core::{Comanda, ComandaItem, ComandaStatus, DomainError, StockMovement};

use crate::mappers::comanda_with_items;
use crate::models::{ComandaItemModel, ComandaModel};

use super::error::{map_db_error, map_fk_violation};
use super::stock::apply_movement;

const COMANDA_COLUMNS: &str =
    "id, customer_name, member_id, status, payment_method, opened_at, closed_at";
const ITEM_COLUMNS: &str =
    "id, comanda_id, stock_item_id, description, quantity, unit_price, created_at";

/// PostgreSQL implementation of ComandaRepository
#[derive(Clone)]
pub struct PgComandaRepository {
    pool: PgPool,
}

impl PgComandaRepository {
    /// Create a new PgComandaRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load items for a batch of tabs and assemble them
    async fn with_items(&self, models: Vec<ComandaModel>) -> RepoResult<Vec<Comanda>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let items = sqlx::query_as::<_, ComandaItemModel>(&format!(
            "SELECT {ITEM_COLUMNS} FROM comanda_items WHERE comanda_id = ANY($1) ORDER BY created_at"
        ))
        .bind(ids.as_slice())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut grouped: HashMap<Uuid, Vec<ComandaItemModel>> = HashMap::new();
        for item in items {
            grouped.entry(item.comanda_id).or_default().push(item);
        }

        models
            .into_iter()
            .map(|model| {
                let items = grouped.remove(&model.id).unwrap_or_default();
                comanda_with_items(model, items)
            })
            .collect()
    }
}

/// Lock a tab row and make sure it still accepts changes
async fn lock_open(conn: &mut PgConnection, comanda_id: Uuid) -> RepoResult<()> {
    let status = sqlx::query_scalar::<_, String>("SELECT status FROM comandas WHERE id = $1 FOR UPDATE")
        .bind(comanda_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::ComandaNotFound(comanda_id))?;

    let status: ComandaStatus = status
        .parse()
        .map_err(|e: DomainError| DomainError::invalid_record("comanda", e.to_string()))?;
    if status == ComandaStatus::Open {
        Ok(())
    } else {
        Err(DomainError::ComandaNotOpen(status.as_str()))
    }
}

#[async_trait]
impl ComandaRepository for PgComandaRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comanda>> {
        let result = sqlx::query_as::<_, ComandaModel>(&format!(
            "SELECT {COMANDA_COLUMNS} FROM comandas WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(self.with_items(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, status: Option<ComandaStatus>) -> RepoResult<Vec<Comanda>> {
        let results = sqlx::query_as::<_, ComandaModel>(&format!(
            "SELECT {COMANDA_COLUMNS} FROM comandas WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY opened_at DESC"
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.with_items(results).await
    }

    #[instrument(skip(self))]
    async fn find_paid_since(&self, since: DateTime<Utc>) -> RepoResult<Vec<Comanda>> {
        let results = sqlx::query_as::<_, ComandaModel>(&format!(
            "SELECT {COMANDA_COLUMNS} FROM comandas WHERE status = 'paid' AND closed_at >= $1 \
             ORDER BY closed_at DESC"
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.with_items(results).await
    }

    #[instrument(skip(self, comanda), fields(comanda_id = %comanda.id))]
    async fn create(&self, comanda: &Comanda) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comandas (id, customer_name, member_id, status, payment_method, opened_at, closed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(comanda.id)
        .bind(&comanda.customer_name)
        .bind(comanda.member_id)
        .bind(comanda.status.as_str())
        .bind(comanda.payment_method.map(|m| m.as_str()))
        .bind(comanda.opened_at)
        .bind(comanda.closed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_fk_violation(e, || {
                DomainError::MemberNotFound(comanda.member_id.unwrap_or_default())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, item, stock_exit), fields(comanda_id = %item.comanda_id))]
    async fn add_item(
        &self,
        item: &ComandaItem,
        stock_exit: Option<&StockMovement>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_open(&mut tx, item.comanda_id).await?;

        if let Some(movement) = stock_exit {
            apply_movement(&mut tx, movement).await?;
        }

        sqlx::query(
            r#"
            INSERT INTO comanda_items
                (id, comanda_id, stock_item_id, description, quantity, unit_price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id)
        .bind(item.comanda_id)
        .bind(item.stock_item_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, restock))]
    async fn remove_item(
        &self,
        comanda_id: Uuid,
        item_id: Uuid,
        restock: Option<&StockMovement>,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_open(&mut tx, comanda_id).await?;

        let result = sqlx::query("DELETE FROM comanda_items WHERE id = $1 AND comanda_id = $2")
            .bind(item_id)
            .bind(comanda_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::ComandaItemNotFound(item_id));
        }

        if let Some(movement) = restock {
            apply_movement(&mut tx, movement).await?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, comanda, restock), fields(comanda_id = %comanda.id, status = %comanda.status))]
    async fn close(&self, comanda: &Comanda, restock: &[StockMovement]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_open(&mut tx, comanda.id).await?;

        sqlx::query(
            r#"
            UPDATE comandas
            SET status = $2, payment_method = $3, closed_at = $4
            WHERE id = $1
            "#,
        )
        .bind(comanda.id)
        .bind(comanda.status.as_str())
        .bind(comanda.payment_method.map(|m| m.as_str()))
        .bind(comanda.closed_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for movement in restock {
            apply_movement(&mut tx, movement).await?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
