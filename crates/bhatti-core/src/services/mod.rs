//! Domain services (business logic)

pub mod cleanup_service;
pub mod menu_service;
pub mod metrics_service;
pub mod offer_service;
pub mod order_service;
pub mod profile_service;

pub use cleanup_service::{CleanupService, Collection, PurgeReport};
pub use menu_service::{MenuService, SeedReport};
pub use metrics_service::MetricsService;
pub use offer_service::OfferService;
pub use order_service::OrderService;
pub use profile_service::ProfileService;
