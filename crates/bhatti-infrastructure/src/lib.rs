//! # Bhatti Infrastructure
//!
//! Storage adapters (PostgreSQL and in-memory) and the order side channels:
//! receipt printer, messaging webhook and the dispatcher that drives them.

pub mod database;
pub mod memory;
pub mod notifications;

pub use database::{
    create_pool, run_migrations, PgMenuRepository, PgMetricsRepository, PgOfferRepository,
    PgOrderRepository, PgProfileRepository,
};
pub use memory::MemoryStore;
pub use notifications::{spawn_dispatcher, ReceiptPrinter, WhatsappNotifier};
