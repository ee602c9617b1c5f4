//! PostgreSQL implementation of ActivityRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use club_core::traits::{ActivityRepository, RepoResult};
use club_core::{ensure_monthly_slot, Activity, ActivityStatus, DomainError};

use crate::models::ActivityModel;

use super::error::{map_db_error, map_fk_violation};

const ACTIVITY_COLUMNS: &str = "id, prospect_id, activity_type, activity_date, description, \
     status, points, reviewed_by, reviewed_at, created_at";

/// PostgreSQL implementation of ActivityRepository
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    /// Create a new PgActivityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_many(&self, sql: &str, member_id: Option<Uuid>) -> RepoResult<Vec<Activity>> {
        let mut query = sqlx::query_as::<_, ActivityModel>(sql);
        if let Some(member_id) = member_id {
            query = query.bind(member_id);
        }
        let results = query.fetch_all(&self.pool).await.map_err(map_db_error)?;

        results.into_iter().map(Activity::try_from).collect()
    }
}

/// Lock the member row and load its activities
///
/// Every activity write of a member goes through this lock, so monthly-slot
/// checks never run on a stale history.
async fn lock_member_history(
    conn: &mut PgConnection,
    member_id: Uuid,
) -> RepoResult<Vec<Activity>> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM members WHERE id = $1 FOR UPDATE")
        .bind(member_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::MemberNotFound(member_id))?;

    let rows = sqlx::query_as::<_, ActivityModel>(&format!(
        "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE prospect_id = $1"
    ))
    .bind(member_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_db_error)?;

    rows.into_iter().map(Activity::try_from).collect()
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Activity>> {
        let result = sqlx::query_as::<_, ActivityModel>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Activity::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: Uuid) -> RepoResult<Vec<Activity>> {
        self.fetch_many(
            &format!(
                "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE prospect_id = $1 \
                 ORDER BY activity_date, created_at"
            ),
            Some(member_id),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn find_pending(&self) -> RepoResult<Vec<Activity>> {
        self.fetch_many(
            &format!(
                "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE status = 'pending' \
                 ORDER BY created_at"
            ),
            None,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Activity>> {
        self.fetch_many(
            &format!("SELECT {ACTIVITY_COLUMNS} FROM activities ORDER BY activity_date, created_at"),
            None,
        )
        .await
    }

    #[instrument(skip(self, activity), fields(activity_id = %activity.id))]
    async fn create(&self, activity: &Activity) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let history = lock_member_history(&mut tx, activity.prospect_id).await?;
        ensure_monthly_slot(&history, activity, |a| a.status != ActivityStatus::Rejected)?;

        sqlx::query(
            r#"
            INSERT INTO activities
                (id, prospect_id, activity_type, activity_date, description, status, points,
                 reviewed_by, reviewed_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(activity.id)
        .bind(activity.prospect_id)
        .bind(activity.kind.as_str())
        .bind(activity.activity_date)
        .bind(&activity.description)
        .bind(activity.status.as_str())
        .bind(activity.points)
        .bind(&activity.reviewed_by)
        .bind(activity.reviewed_at)
        .bind(activity.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_fk_violation(e, || DomainError::MemberNotFound(activity.prospect_id)))?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, activity), fields(activity_id = %activity.id))]
    async fn record_review(&self, activity: &Activity) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let history = lock_member_history(&mut tx, activity.prospect_id).await?;

        let stored = history
            .iter()
            .find(|a| a.id == activity.id)
            .ok_or(DomainError::ActivityNotFound(activity.id))?;
        if !stored.is_pending() {
            return Err(DomainError::ActivityAlreadyReviewed(stored.status.as_str()));
        }
        if activity.is_validated() {
            ensure_monthly_slot(&history, activity, Activity::is_validated)?;
        }

        let result = sqlx::query(
            r#"
            UPDATE activities
            SET status = $2, reviewed_by = $3, reviewed_at = $4, description = $5
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(activity.id)
        .bind(activity.status.as_str())
        .bind(&activity.reviewed_by)
        .bind(activity.reviewed_at)
        .bind(&activity.description)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Deleted while we waited for the member lock
        if result.rows_affected() == 0 {
            return Err(DomainError::ActivityNotFound(activity.id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_pending(&self, id: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM activities WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or(DomainError::ActivityNotFound(id))?;

        let status: ActivityStatus = status
            .parse()
            .map_err(|e: DomainError| DomainError::invalid_record("activity", e.to_string()))?;
        if status != ActivityStatus::Pending {
            return Err(DomainError::ActivityAlreadyReviewed(status.as_str()));
        }

        sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
