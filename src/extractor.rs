use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};

use crate::config::APP_CONFIG;
use crate::error::ApiError;
use crate::utils::jwt::{JwtManager, TokenClaims};

/// Extracts and verifies the bearer token on protected routes. Missing or
/// invalid credentials reject with 401 before the handler runs.
pub struct AuthClaims(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::unauthorized("Missing or invalid Authorization header"))?;

        let claims = JwtManager::new(APP_CONFIG.jwt_secret.clone())
            .decode_jwt(bearer.token())
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

        Ok(AuthClaims(claims))
    }
}
