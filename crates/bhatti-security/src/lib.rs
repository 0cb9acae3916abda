//! # Bhatti Security
//!
//! Bearer token minting and verification, role resolution.

pub mod jwt;

pub use jwt::{Claims, JwtError, JwtService};
