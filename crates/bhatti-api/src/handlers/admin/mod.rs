//! Admin-only handlers. Every handler takes an `AdminUser`.

pub mod cleanup;
pub mod menu;
pub mod metrics;
pub mod offers;
pub mod orders;
