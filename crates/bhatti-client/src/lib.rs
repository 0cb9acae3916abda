//! # Bhatti Client
//!
//! HTTP client for the ordering API, the locally persisted cart and the
//! polling watchers that turn order snapshots into events.

pub mod api_client;
pub mod cart_store;
pub mod diff;
pub mod error;
pub mod watcher;

pub use api_client::ApiClient;
pub use cart_store::CartStore;
pub use diff::{AdminOrderDiff, CustomerOrderDiff, OrderSummary, WatchEvent};
pub use error::ClientError;
pub use watcher::{spawn_admin_watcher, spawn_customer_watcher, WatchConfig, WatcherHandle};
