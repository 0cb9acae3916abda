//! PostgreSQL repository implementations

pub mod menu_repo_impl;
pub mod metrics_repo_impl;
pub mod offer_repo_impl;
pub mod order_repo_impl;
pub mod profile_repo_impl;

pub use menu_repo_impl::PgMenuRepository;
pub use metrics_repo_impl::PgMetricsRepository;
pub use offer_repo_impl::PgOfferRepository;
pub use order_repo_impl::PgOrderRepository;
pub use profile_repo_impl::PgProfileRepository;

use bhatti_core::error::DomainError;
use tracing::error;

/// Log and wrap a driver error for the domain layer.
pub(crate) fn db_error(operation: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", operation, e);
        DomainError::DatabaseError(e.to_string())
    }
}
