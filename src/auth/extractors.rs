use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::{
    auth::{jwt::JwtKeys, repo_types::Role},
    error::ApiError,
};

/// Caller identity bound from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

/// Resolves the `Authorization` header value into a caller identity.
///
/// No header, or no token after the scheme, is `MissingToken` (401). Anything
/// that fails verification is `InvalidToken` (403).
pub fn authenticate(header: Option<&str>, keys: &JwtKeys) -> Result<AuthUser, ApiError> {
    let header = header.ok_or(ApiError::MissingToken)?;

    let token = match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => token.trim(),
        Some(_) => return Err(ApiError::InvalidToken),
        None => "",
    };
    if token.is_empty() {
        return Err(ApiError::MissingToken);
    }

    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        ApiError::InvalidToken
    })?;

    Ok(AuthUser {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        authenticate(header, &keys)
    }
}
