use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{LoginRequest, LoginResponse};
use crate::config::{APP_CONFIG, JWT_EXPIRED_TIME};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::utils::jwt::JwtManager;

pub fn create_route() -> Router {
    Router::new().route("/auth/login", post(login))
}

/// Login endpoint - returns JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let user_repo = UserRepository::new();

    let user_info = user_repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let password_valid = bcrypt::verify(&payload.password, &user_info.password)
        .map_err(|e| ApiError::internal(format!("Password verification error: {}", e)))?;

    if !password_valid {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    if !user_info.is_active {
        return Err(ApiError::unauthorized("Account has been deactivated"));
    }

    let jwt_manager = JwtManager::new(APP_CONFIG.jwt_secret.clone());
    let token = jwt_manager
        .create_jwt(
            user_info.id,
            &user_info.full_name(),
            user_info.role,
            JWT_EXPIRED_TIME,
        )
        .map_err(|e| ApiError::internal(format!("Failed to create token: {}", e)))?;

    let response = LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: JWT_EXPIRED_TIME,
        user_id: user_info.id,
        email: user_info.email,
        role: user_info.role,
    };

    Ok((StatusCode::OK, Json(response)))
}
