//! JWT token handling

use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use bhatti_core::domain::{Principal, Role};
use bhatti_shared::config::AuthSettings;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

pub struct JwtService {
    secret: String,
    token_expiry: i64,
    issuer: Option<String>,
    admin_uids: HashSet<String>,
}

impl JwtService {
    pub fn new(secret: String, token_expiry: i64, issuer: Option<String>, admin_uids: Vec<String>) -> Self {
        Self {
            secret,
            token_expiry,
            issuer,
            admin_uids: admin_uids.into_iter().collect(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.jwt_secret.clone(),
            settings.token_expiry_seconds,
            settings.issuer.clone(),
            settings.admin_uids.clone(),
        )
    }

    pub fn issue_token(&self, uid: &str, email: Option<&str>, role: Option<&str>) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: uid.to_string(),
            email: email.map(str::to_string),
            role: role.map(str::to_string),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
            iss: self.issuer.clone(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        decode::<Claims>(token, &DecodingKey::from_secret(self.secret.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }

    /// Verify a bearer token and resolve the caller. Allowlisted uids are
    /// admins whatever their role claim says.
    pub fn verify(&self, token: &str) -> Result<Principal, JwtError> {
        let claims = self.validate_token(token)?;
        let role = if self.admin_uids.contains(&claims.sub) {
            Role::Admin
        } else {
            Role::from_claim(claims.role.as_deref())
        };
        debug!("Token verified for {} as {}", claims.sub, role.as_str());
        Ok(Principal::new(claims.sub, claims.email, role))
    }
}
