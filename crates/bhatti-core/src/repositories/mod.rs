//! Repository traits (ports)

pub mod menu_repository;
pub mod metrics_repository;
pub mod offer_repository;
pub mod order_repository;
pub mod profile_repository;

pub use menu_repository::MenuRepository;
pub use metrics_repository::MetricsRepository;
pub use offer_repository::OfferRepository;
pub use order_repository::OrderRepository;
pub use profile_repository::ProfileRepository;

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use metrics_repository::MockMetricsRepository;
#[cfg(test)]
pub use offer_repository::MockOfferRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
