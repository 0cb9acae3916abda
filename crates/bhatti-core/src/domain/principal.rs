//! Authenticated caller, resolved from a bearer token

use serde::{Deserialize, Serialize};

/// Role claim carried on identity tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Guest => "guest",
        }
    }

    /// Unknown or missing claims resolve to `Guest`.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim.map(|c| c.trim().to_ascii_lowercase()) {
            Some(c) if c == "admin" => Role::Admin,
            _ => Role::Guest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
    pub role: Role,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: Option<String>, role: Role) -> Self {
        Self {
            uid: uid.into(),
            email,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
