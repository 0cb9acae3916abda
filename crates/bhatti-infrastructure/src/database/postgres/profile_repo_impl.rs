use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};

use bhatti_core::domain::{SavedAddress, UserProfile};
use bhatti_core::error::DomainError;
use bhatti_core::repositories::ProfileRepository;

use super::db_error;

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    uid: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    addresses: Json<Vec<SavedAddress>>,
    default_address_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        UserProfile {
            uid: row.uid,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            addresses: row.addresses.0,
            default_address_id: row.default_address_id,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find(&self, uid: &str) -> Result<Option<UserProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT uid, name, email, phone, address, addresses, default_address_id, created_at
            FROM user_profiles
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding profile"))?;
        Ok(row.map(Into::into))
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles
                (uid, name, email, phone, address, addresses, default_address_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (uid) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                address = EXCLUDED.address,
                addresses = EXCLUDED.addresses,
                default_address_id = EXCLUDED.default_address_id,
                created_at = COALESCE(user_profiles.created_at, EXCLUDED.created_at)
            "#,
        )
        .bind(&profile.uid)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(Json(&profile.addresses))
        .bind(&profile.default_address_id)
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("saving profile"))?;
        Ok(())
    }

    async fn list_uids(&self) -> Result<Vec<String>, DomainError> {
        sqlx::query_scalar("SELECT uid FROM user_profiles")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing profile uids"))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting profiles"))?;
        Ok(count as u64)
    }
}
