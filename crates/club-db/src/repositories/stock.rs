//! PostgreSQL implementation of StockRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

use club_core::traits::{RepoResult, StockRepository};
use club_core::{DomainError, MovementKind, StockItem, StockMovement};

use crate::models::{StockItemModel, StockMovementModel};

use super::error::map_db_error;

const ITEM_COLUMNS: &str =
    "id, name, category, unit, quantity, min_quantity, unit_price, created_at, updated_at";

/// Apply a movement to the item level and append it to the log
///
/// Runs on the caller's connection so it can join a wider transaction. The
/// exit guard lives in the `WHERE` clause, so concurrent exits can never
/// drive the level below zero.
pub(crate) async fn apply_movement(
    conn: &mut PgConnection,
    movement: &StockMovement,
) -> RepoResult<StockItem> {
    let sql = match movement.kind {
        MovementKind::Entry => {
            "UPDATE stock_items SET quantity = quantity + $2, updated_at = $3 \
             WHERE id = $1 AND $2 > 0"
        }
        MovementKind::Exit => {
            "UPDATE stock_items SET quantity = quantity - $2, updated_at = $3 \
             WHERE id = $1 AND $2 > 0 AND quantity >= $2"
        }
        MovementKind::Adjustment => {
            "UPDATE stock_items SET quantity = $2, updated_at = $3 WHERE id = $1 AND $2 >= 0"
        }
    };

    let updated = sqlx::query_as::<_, StockItemModel>(&format!("{sql} RETURNING {ITEM_COLUMNS}"))
        .bind(movement.item_id)
        .bind(movement.quantity)
        .bind(movement.created_at)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

    let Some(model) = updated else {
        let available = sqlx::query_scalar::<_, i32>("SELECT quantity FROM stock_items WHERE id = $1")
            .bind(movement.item_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_db_error)?;

        return Err(match available {
            None => DomainError::StockItemNotFound(movement.item_id),
            Some(_) if movement.quantity <= 0 && movement.kind != MovementKind::Adjustment => {
                DomainError::InvalidQuantity(movement.quantity)
            }
            Some(_) if movement.quantity < 0 => DomainError::InvalidQuantity(movement.quantity),
            Some(available) => DomainError::InsufficientStock {
                available,
                requested: movement.quantity,
            },
        });
    };

    sqlx::query(
        r#"
        INSERT INTO stock_movements (id, item_id, kind, quantity, note, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(movement.id)
    .bind(movement.item_id)
    .bind(movement.kind.as_str())
    .bind(movement.quantity)
    .bind(&movement.note)
    .bind(movement.created_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    StockItem::try_from(model)
}

/// PostgreSQL implementation of StockRepository
#[derive(Clone)]
pub struct PgStockRepository {
    pool: PgPool,
}

impl PgStockRepository {
    /// Create a new PgStockRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_items(&self, sql: &str) -> RepoResult<Vec<StockItem>> {
        let results = sqlx::query_as::<_, StockItemModel>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(StockItem::try_from).collect()
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<StockItem>> {
        let result = sqlx::query_as::<_, StockItemModel>(&format!(
            "SELECT {ITEM_COLUMNS} FROM stock_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(StockItem::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<StockItem>> {
        self.fetch_items(&format!(
            "SELECT {ITEM_COLUMNS} FROM stock_items ORDER BY category, name"
        ))
        .await
    }

    #[instrument(skip(self))]
    async fn find_low(&self) -> RepoResult<Vec<StockItem>> {
        self.fetch_items(&format!(
            "SELECT {ITEM_COLUMNS} FROM stock_items WHERE quantity <= min_quantity \
             ORDER BY quantity, name"
        ))
        .await
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn create(&self, item: &StockItem) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stock_items
                (id, name, category, unit, quantity, min_quantity, unit_price, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(&item.unit)
        .bind(item.quantity)
        .bind(item.min_quantity)
        .bind(item.unit_price)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, item), fields(item_id = %item.id))]
    async fn update(&self, item: &StockItem) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE stock_items
            SET name = $2, category = $3, unit = $4, min_quantity = $5, unit_price = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.category)
        .bind(&item.unit)
        .bind(item.min_quantity)
        .bind(item.unit_price)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::StockItemNotFound(item.id));
        }

        Ok(())
    }

    #[instrument(skip(self, movement), fields(item_id = %movement.item_id, kind = %movement.kind))]
    async fn record_movement(&self, movement: &StockMovement) -> RepoResult<StockItem> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let item = apply_movement(&mut tx, movement).await?;
        tx.commit().await.map_err(map_db_error)?;

        info!(quantity = item.quantity, "Stock level updated");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn find_movements(&self, item_id: Uuid, limit: i64) -> RepoResult<Vec<StockMovement>> {
        let results = sqlx::query_as::<_, StockMovementModel>(
            r#"
            SELECT id, item_id, kind, quantity, note, created_at
            FROM stock_movements
            WHERE item_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(item_id)
        .bind(limit.clamp(1, 500))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(StockMovement::try_from).collect()
    }
}
