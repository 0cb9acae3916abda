//! Bearer-token extractors resolving the caller

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use bhatti_core::domain::Principal;
use bhatti_security::JwtService;

use crate::error::ApiError;

/// Any caller holding a valid token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

/// A caller whose token resolves to the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Principal);

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".into()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Malformed authorization header".into()))
}

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<JwtService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jwt = Arc::<JwtService>::from_ref(state);
        let principal = jwt.verify(bearer_token(parts)?)?;
        Ok(AuthUser(principal))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    Arc<JwtService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(principal) = AuthUser::from_request_parts(parts, state).await?;
        if !principal.is_admin() {
            return Err(ApiError::Forbidden("Forbidden".into()));
        }
        Ok(AdminUser(principal))
    }
}
