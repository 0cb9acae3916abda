//! # Bhatti Shared
//!
//! Configuration, telemetry and small helpers shared by every crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod utils;

pub use error::AppError;
