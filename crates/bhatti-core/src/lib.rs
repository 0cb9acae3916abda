//! # Bhatti Core
//!
//! Domain records, repository ports, the order event bus and the services
//! that implement every ordering, menu, offer, profile and metrics operation.

pub mod domain;
pub mod error;
pub mod events;
pub mod notifier;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use events::{EventBus, OrderEvent};
