use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, PgPool};

use bhatti_core::domain::{GeoPoint, Order, OrderLine, OrderStatus};
use bhatti_core::error::DomainError;
use bhatti_core::repositories::OrderRepository;

use super::db_error;

const ORDER_COUNTER: &str = "orderNumber";

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    order_number: String,
    order_number_value: i64,
    user_id: String,
    user_email: Option<String>,
    user_name: String,
    items: Json<Vec<OrderLine>>,
    total: f64,
    status: String,
    address: String,
    phone: String,
    location: Option<Json<GeoPoint>>,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            order_number: row.order_number,
            order_number_value: row.order_number_value.max(0) as u64,
            user_id: row.user_id,
            user_email: row.user_email,
            user_name: row.user_name,
            items: row.items.0,
            total: row.total,
            // Legacy spellings are normalised on read.
            status: OrderStatus::normalize(Some(&row.status)),
            address: row.address,
            phone: row.phone,
            location: row.location.map(|l| l.0),
            created_at: row.created_at,
        }
    }
}

const SELECT_ORDER: &str = r#"
    SELECT id, order_number, order_number_value, user_id, user_email, user_name,
           items, total, status, address, phone, location, created_at
    FROM orders
"#;

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn next_order_number(&self) -> Result<u64, DomainError> {
        let value: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO counters (name, value) VALUES ($1, 1)
            ON CONFLICT (name) DO UPDATE SET value = counters.value + 1
            RETURNING value - 1
            "#,
        )
        .bind(ORDER_COUNTER)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("claiming order number"))?;
        Ok(value.max(0) as u64)
    }

    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders
                (id, order_number, order_number_value, user_id, user_email, user_name,
                 items, total, status, address, phone, location, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(order.order_number_value as i64)
        .bind(&order.user_id)
        .bind(&order.user_email)
        .bind(&order.user_name)
        .bind(Json(&order.items))
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(&order.address)
        .bind(&order.phone)
        .bind(order.location.map(Json))
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("inserting order"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_ORDER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding order"))?;
        Ok(row.map(Into::into))
    }

    async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<Order>, DomainError> {
        // LIMIT NULL returns every row.
        let rows: Vec<OrderRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at DESC LIMIT $1", SELECT_ORDER))
                .bind(limit.map(|l| l as i64))
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("listing orders"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Order>, DomainError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_ORDER
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing user orders"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            UPDATE orders SET status = $2 WHERE id = $1
            RETURNING id, order_number, order_number_value, user_id, user_email, user_name,
                      items, total, status, address, phone, location, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating order status"))?;
        Ok(row.map(Into::into))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting orders"))?;
        Ok(count as u64)
    }

    async fn purge(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM orders")
            .execute(&self.pool)
            .await
            .map_err(db_error("purging orders"))?;
        Ok(result.rows_affected())
    }
}
