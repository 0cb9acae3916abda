//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("No valid menu items found in cart. Please refresh the menu and add items again.")]
    NoValidMenuItems(Vec<String>),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn not_found(what: &str) -> Self {
        DomainError::NotFound(format!("{} not found", what))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::ValidationError(msg.into())
    }
}
