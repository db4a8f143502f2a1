use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{get, post},
};

use super::dto::{CreateUserRequest, UpdateUserRequest, UserListResponse, UserResponse};
use crate::error::ApiError;
use crate::extractor::AuthClaims;
use crate::middleware::permission::require_admin;
use crate::repositories::{UserRepository, UserUpdate};
use crate::utils::email::normalize_email;

pub fn create_route() -> Router {
    Router::new()
        .route("/users", post(create_user).get(get_all_users))
        .route(
            "/users/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Create a new user (Admin only)
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Duplicate email"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    AuthClaims(auth_claims): AuthClaims,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    require_admin(&auth_claims)?;
    let user_repo = UserRepository::new();

    if user_repo.find_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::bad_request(
            "A user with this email already exists",
        ));
    }

    let hashed_password = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    let user = user_repo
        .create(
            payload.email,
            payload.first_name,
            payload.last_name,
            hashed_password,
            payload.role,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get all users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users retrieved", body = UserListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_all_users(
    AuthClaims(_auth_claims): AuthClaims,
) -> Result<(StatusCode, Json<UserListResponse>), ApiError> {
    let user_repo = UserRepository::new();

    let users = user_repo.find_all().await?;

    let response = UserListResponse {
        total: users.len(),
        users: users.into_iter().map(UserResponse::from).collect(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User retrieved", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn get_user(
    AuthClaims(_auth_claims): AuthClaims,
    Path(user_id): Path<i32>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user_repo = UserRepository::new();

    let user = user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok((StatusCode::OK, Json(user.into())))
}

/// Update user (Admin only)
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Duplicate email"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    AuthClaims(auth_claims): AuthClaims,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    require_admin(&auth_claims)?;
    let user_repo = UserRepository::new();

    let user = user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if let Some(ref email) = payload.email {
        if let Some(existing) = user_repo.find_by_email(email).await? {
            if existing.id != user.id {
                return Err(ApiError::bad_request(
                    "A user with this email already exists",
                ));
            }
        }
    }

    let hashed_password = match payload.password {
        Some(password) => Some(
            bcrypt::hash(&password, bcrypt::DEFAULT_COST)
                .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?,
        ),
        None => None,
    };

    let updates = UserUpdate {
        email: payload.email.map(|e| normalize_email(&e)),
        first_name: payload.first_name,
        last_name: payload.last_name,
        password: hashed_password,
        role: payload.role,
        is_active: payload.is_active,
    };

    let updated = user_repo.update(user_id, updates).await?;

    Ok((StatusCode::OK, Json(updated.into())))
}

/// Delete user (Admin only). The user's grade rows are deleted with it.
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    AuthClaims(auth_claims): AuthClaims,
    Path(user_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    require_admin(&auth_claims)?;
    let user_repo = UserRepository::new();

    user_repo
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    user_repo.delete(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
