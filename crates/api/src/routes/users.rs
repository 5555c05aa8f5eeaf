//! User management routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::extract::{ApiJson, ApiPath};
use crate::{AppState, error::error_response};
use fintrack_db::repositories::user::{CreateUserInput, UpdateUserInput, UserRepository};
use fintrack_shared::AppError;

/// Creates the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}", put(update_user))
        .route("/users/{id}", delete(deactivate_user))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for registering a user.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    /// Display name.
    pub name: String,
    /// Email (unique).
    pub email: String,
    /// Password (stored as-is; hashing is out of scope).
    pub password: String,
}

/// Request body for a partial user update.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// Response for a user. The password never leaves the service.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
}

impl From<fintrack_db::entities::users::Model> for UserResponse {
    fn from(user: fintrack_db::entities::users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/users` - Register a new user.
async fn register_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterUserRequest>,
) -> impl IntoResponse {
    for (field, value) in [
        ("name", &payload.name),
        ("email", &payload.email),
        ("password", &payload.password),
    ] {
        if value.trim().is_empty() {
            return error_response(&AppError::Validation(format!("{field} must not be blank")));
        }
    }

    let user_repo = UserRepository::new((*state.db).clone());

    let input = CreateUserInput {
        name: payload.name,
        email: payload.email,
        password: payload.password,
    };

    match user_repo.create(input).await {
        Ok(user) => {
            info!(user_id = %user.id, "User registered");
            (StatusCode::CREATED, Json(UserResponse::from(user))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/users` - List active users.
async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.list_active().await {
        Ok(users) => {
            let items: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (StatusCode::OK, Json(json!({ "users": items }))).into_response()
        }
        Err(e) => error_response(&AppError::Database(e.to_string())),
    }
}

/// GET `/users/{id}` - Get a user by ID, active or not.
async fn get_user(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.find_by_id(id).await {
        Ok(Some(user)) => (StatusCode::OK, Json(UserResponse::from(user))).into_response(),
        Ok(None) => error_response(&AppError::NotFound(format!("User not found with id: {id}"))),
        Err(e) => error_response(&AppError::Database(e.to_string())),
    }
}

/// PUT `/users/{id}` - Partially update a user.
///
/// Absent or blank fields keep their current value; `updated_at` is
/// refreshed either way.
async fn update_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let input = UpdateUserInput {
        name: payload.name,
        email: payload.email,
    };

    match user_repo.update(id, input).await {
        Ok(user) => {
            info!(user_id = %user.id, "User updated");
            (StatusCode::OK, Json(UserResponse::from(user))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/users/{id}` - Deactivate a user (soft delete).
async fn deactivate_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    match user_repo.deactivate(id).await {
        Ok(()) => {
            info!(user_id = %id, "User deactivated");
            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}
