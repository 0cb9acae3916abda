use async_trait::async_trait;
use sqlx::PgPool;

use bhatti_core::error::DomainError;
use bhatti_core::repositories::MetricsRepository;

use super::db_error;

const VISITS: &str = "visits";

pub struct PgMetricsRepository {
    pool: PgPool,
}

impl PgMetricsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for PgMetricsRepository {
    async fn increment_visits(&self) -> Result<u64, DomainError> {
        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO metrics (name, value, updated_at) VALUES ($1, 1, NOW())
            ON CONFLICT (name) DO UPDATE SET value = metrics.value + 1, updated_at = NOW()
            RETURNING value
            "#,
        )
        .bind(VISITS)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("incrementing visits"))?;
        Ok(value.max(0) as u64)
    }

    async fn visits(&self) -> Result<u64, DomainError> {
        let value: Option<i64> = sqlx::query_scalar("SELECT value FROM metrics WHERE name = $1")
            .bind(VISITS)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("reading visits"))?;
        Ok(value.unwrap_or(0).max(0) as u64)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM metrics")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting metrics"))?;
        Ok(count as u64)
    }

    async fn purge(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM metrics")
            .execute(&self.pool)
            .await
            .map_err(db_error("purging metrics"))?;
        Ok(result.rows_affected())
    }
}
