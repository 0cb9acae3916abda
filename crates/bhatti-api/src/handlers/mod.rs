//! HTTP handlers

pub mod admin;
pub mod health;
pub mod menu;
pub mod metrics;
pub mod offers;
pub mod orders;
pub mod profile;

use serde::{Deserialize, Serialize};

/// `{id}` body used by the delete endpoints
#[derive(Debug, Default, Deserialize)]
pub struct IdPayload {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
