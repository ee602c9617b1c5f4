//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use club_core::traits::{MemberQuery, MemberRepository, RepoResult};
use club_core::{DomainError, Member};

use crate::models::MemberModel;

use super::error::map_db_error;

const MEMBER_COLUMNS: &str =
    "id, name, nickname, email, phone, case_type, half_date, active, created_at, updated_at";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_members(models: Vec<MemberModel>) -> RepoResult<Vec<Member>> {
    models.into_iter().map(Member::try_from).collect()
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &MemberQuery) -> RepoResult<Vec<Member>> {
        let limit = query.limit.clamp(1, 500);
        let offset = query.offset.max(0);

        let results = sqlx::query_as::<_, MemberModel>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM members
            WHERE ($1::text IS NULL OR case_type = $1)
              AND (NOT $2 OR active)
            ORDER BY name, id
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(query.case_type.map(|c| c.as_str()))
        .bind(query.active_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_members(results)
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE active ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_members(results)
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO members
                (id, name, nickname, email, phone, case_type, half_date, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(member.id)
        .bind(&member.name)
        .bind(&member.nickname)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.case_type.as_str())
        .bind(member.half_date)
        .bind(member.active)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET name = $2, nickname = $3, email = $4, phone = $5, case_type = $6,
                half_date = $7, active = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(member.id)
        .bind(&member.name)
        .bind(&member.nickname)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(member.case_type.as_str())
        .bind(member.half_date)
        .bind(member.active)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(member.id));
        }

        Ok(())
    }
}
