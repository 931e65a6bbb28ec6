//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Case-insensitive code uniqueness is enforced by the `LOWER(code)` unique
/// index; a violating insert surfaces as [`AppError::CodeConflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (user_id, original_url, code)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, original_url, code, click_count, created_at
            "#,
        )
        .bind(new_link.user_id)
        .bind(&new_link.original_url)
        .bind(&new_link.code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, user_id, original_url, code, click_count, created_at
            FROM links
            WHERE LOWER(code) = LOWER($1)
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn increment_clicks(&self, code: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE links
            SET click_count = click_count + 1
            WHERE LOWER(code) = LOWER($1)
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn exists_code(&self, code: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM links WHERE LOWER(code) = LOWER($1))",
        )
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
