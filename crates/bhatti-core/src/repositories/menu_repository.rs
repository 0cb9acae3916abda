//! Menu repository trait (port)

use async_trait::async_trait;

use crate::domain::MenuItem;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Every item, sorted by title.
    async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, DomainError>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<MenuItem>, DomainError>;
    async fn find_by_title(&self, title: &str) -> Result<Option<MenuItem>, DomainError>;
    async fn insert(&self, item: &MenuItem) -> Result<(), DomainError>;
    async fn update(&self, item: &MenuItem) -> Result<(), DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
    async fn purge(&self) -> Result<u64, DomainError>;
}
