//! Offer repository trait (port)

use async_trait::async_trait;

use crate::domain::Offer;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Newest first.
    async fn list_all(&self) -> Result<Vec<Offer>, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Offer>, DomainError>;
    async fn insert(&self, offer: &Offer) -> Result<(), DomainError>;
    async fn update(&self, offer: &Offer) -> Result<(), DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
    async fn purge(&self) -> Result<u64, DomainError>;
}
