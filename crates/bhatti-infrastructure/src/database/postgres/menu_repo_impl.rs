use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use bhatti_core::domain::MenuItem;
use bhatti_core::error::DomainError;
use bhatti_core::repositories::MenuRepository;

use super::db_error;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MenuItemRow {
    id: String,
    title: String,
    description: String,
    price: f64,
    category: String,
    image_url: String,
    is_available: bool,
    rating: f64,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            category: row.category,
            image_url: row.image_url,
            is_available: row.is_available,
            rating: row.rating,
        }
    }
}

const SELECT_MENU: &str = r#"
    SELECT id, title, description, price, category, image_url, is_available, rating
    FROM menu_items
"#;

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(&format!("{} ORDER BY title ASC", SELECT_MENU))
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing menu items"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_MENU))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding menu item by id"))?;
        Ok(row.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<MenuItem>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<MenuItemRow> = sqlx::query_as(&format!("{} WHERE id = ANY($1)", SELECT_MENU))
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("finding menu items by ids"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> =
            sqlx::query_as(&format!("{} WHERE title = $1 LIMIT 1", SELECT_MENU))
                .bind(title)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("finding menu item by title"))?;
        Ok(row.map(Into::into))
    }

    async fn insert(&self, item: &MenuItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO menu_items
                (id, title, description, price, category, image_url, is_available, rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .bind(&item.image_url)
        .bind(item.is_available)
        .bind(item.rating)
        .execute(&self.pool)
        .await
        .map_err(db_error("inserting menu item"))?;
        Ok(())
    }

    async fn update(&self, item: &MenuItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE menu_items
            SET title = $2, description = $3, price = $4, category = $5,
                image_url = $6, is_available = $7, rating = $8
            WHERE id = $1
            "#,
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .bind(&item.image_url)
        .bind(item.is_available)
        .bind(item.rating)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating menu item"))?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting menu item"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting menu items"))?;
        Ok(count as u64)
    }

    async fn purge(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM menu_items")
            .execute(&self.pool)
            .await
            .map_err(db_error("purging menu items"))?;
        Ok(result.rows_affected())
    }
}
