//! Profile repository trait (port)

use async_trait::async_trait;

use crate::domain::UserProfile;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, uid: &str) -> Result<Option<UserProfile>, DomainError>;
    /// Insert or replace by uid.
    async fn save(&self, profile: &UserProfile) -> Result<(), DomainError>;
    async fn list_uids(&self) -> Result<Vec<String>, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}
