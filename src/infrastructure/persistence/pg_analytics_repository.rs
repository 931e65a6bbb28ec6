//! PostgreSQL implementation of the click event log.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, NewClickEvent};
use crate::domain::repositories::{AnalyticsRepository, AnalyticsSummary};
use crate::error::AppError;

/// PostgreSQL repository for click events and their aggregates.
///
/// Aggregates are computed with `GROUP BY` on every request; nothing is
/// materialized.
pub struct PgAnalyticsRepository {
    pool: Arc<PgPool>,
}

impl PgAnalyticsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn group_counts(
        &self,
        column: &'static str,
        link_id: i64,
    ) -> Result<BTreeMap<String, i64>, AppError> {
        // `column` is always one of the fixed names below, never user input.
        let sql = format!(
            "SELECT {column}, COUNT(*) FROM click_events WHERE link_id = $1 GROUP BY {column}"
        );

        let rows = sqlx::query_as::<_, (String, i64)>(&sql)
            .bind(link_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().collect())
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    async fn save(&self, event: NewClickEvent) -> Result<ClickEvent, AppError> {
        let saved = sqlx::query_as::<_, ClickEvent>(
            r#"
            INSERT INTO click_events
                (link_id, ip, user_agent, location, device_type, os, browser, clicked_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, link_id, ip, user_agent, location, device_type, os, browser, clicked_at
            "#,
        )
        .bind(event.link_id)
        .bind(&event.ip)
        .bind(&event.user_agent)
        .bind(&event.location)
        .bind(&event.device_type)
        .bind(&event.os)
        .bind(&event.browser)
        .bind(event.clicked_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(saved)
    }

    async fn aggregate(&self, link_id: i64) -> Result<AnalyticsSummary, AppError> {
        let total_clicks =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM click_events WHERE link_id = $1")
                .bind(link_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        if total_clicks == 0 {
            return Ok(AnalyticsSummary::default());
        }

        Ok(AnalyticsSummary {
            total_clicks,
            devices: self.group_counts("device_type", link_id).await?,
            browsers: self.group_counts("browser", link_id).await?,
            locations: self.group_counts("location", link_id).await?,
        })
    }
}
