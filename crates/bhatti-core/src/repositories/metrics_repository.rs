//! Counter repository trait (port)

use async_trait::async_trait;

use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Atomically bump the visit counter and return the new value.
    async fn increment_visits(&self) -> Result<u64, DomainError>;
    async fn visits(&self) -> Result<u64, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
    async fn purge(&self) -> Result<u64, DomainError>;
}
