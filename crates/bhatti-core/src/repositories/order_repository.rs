//! Order repository trait (port)

use async_trait::async_trait;

use crate::domain::{Order, OrderStatus};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Claim the next order number. The first call returns 0.
    async fn next_order_number(&self) -> Result<u64, DomainError>;
    async fn insert(&self, order: &Order) -> Result<(), DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError>;
    /// Newest first.
    async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<Order>, DomainError>;
    /// Newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Order>, DomainError>;
    /// Overwrite the status; `None` when the order does not exist.
    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
    async fn purge(&self) -> Result<u64, DomainError>;
}
