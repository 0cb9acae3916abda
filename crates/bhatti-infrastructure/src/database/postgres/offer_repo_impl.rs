use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use bhatti_core::domain::Offer;
use bhatti_core::error::DomainError;
use bhatti_core::repositories::OfferRepository;

use super::db_error;

pub struct PgOfferRepository {
    pool: PgPool,
}

impl PgOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OfferRow {
    id: String,
    title: String,
    description: String,
    highlight: String,
    image_url: String,
    valid_from: Option<String>,
    valid_to: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        Offer {
            id: row.id,
            title: row.title,
            description: row.description,
            highlight: row.highlight,
            image_url: row.image_url,
            valid_from: row.valid_from,
            valid_to: row.valid_to,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

const SELECT_OFFER: &str = r#"
    SELECT id, title, description, highlight, image_url, valid_from, valid_to, is_active, created_at
    FROM offers
"#;

#[async_trait]
impl OfferRepository for PgOfferRepository {
    async fn list_all(&self) -> Result<Vec<Offer>, DomainError> {
        let rows: Vec<OfferRow> = sqlx::query_as(&format!("{} ORDER BY created_at DESC", SELECT_OFFER))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing offers"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Offer>, DomainError> {
        let row: Option<OfferRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_OFFER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding offer"))?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, offer: &Offer) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO offers
                (id, title, description, highlight, image_url, valid_from, valid_to, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&offer.id)
        .bind(&offer.title)
        .bind(&offer.description)
        .bind(&offer.highlight)
        .bind(&offer.image_url)
        .bind(&offer.valid_from)
        .bind(&offer.valid_to)
        .bind(offer.is_active)
        .bind(offer.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("inserting offer"))?;
        Ok(())
    }

    async fn update(&self, offer: &Offer) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE offers
            SET title = $2, description = $3, highlight = $4, image_url = $5,
                valid_from = $6, valid_to = $7, is_active = $8
            WHERE id = $1
            "#,
        )
        .bind(&offer.id)
        .bind(&offer.title)
        .bind(&offer.description)
        .bind(&offer.highlight)
        .bind(&offer.image_url)
        .bind(&offer.valid_from)
        .bind(&offer.valid_to)
        .bind(offer.is_active)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating offer"))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting offer"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM offers")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting offers"))?;
        Ok(count as u64)
    }

    async fn purge(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM offers")
            .execute(&self.pool)
            .await
            .map_err(db_error("purging offers"))?;
        Ok(result.rows_affected())
    }
}
