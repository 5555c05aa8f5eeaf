//! Category management routes.

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
use fintrack_db::repositories::category::{
    CategoryRepository, CreateCategoryInput, UpdateCategoryInput,
};
use fintrack_shared::AppError;

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", post(create_category))
        .route("/categories", get(list_categories))
        .route("/categories/{id}", get(get_category))
        .route("/categories/{id}", put(update_category))
        .route("/categories/{id}", delete(deactivate_category))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Category name (unique, case-insensitive).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for a partial category update.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Response for a category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Category name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

impl From<fintrack_db::entities::categories::Model> for CategoryResponse {
    fn from(category: fintrack_db::entities::categories::Model) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/categories` - Create a new category.
async fn create_category(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCategoryRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return error_response(&AppError::Validation("name must not be blank".to_string()));
    }

    let category_repo = CategoryRepository::new((*state.db).clone());

    let input = CreateCategoryInput {
        name: payload.name,
        description: payload.description,
    };

    match category_repo.create(input).await {
        Ok(category) => {
            info!(category_id = %category.id, name = %category.name, "Category created");
            (StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/categories` - List active categories.
async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    let category_repo = CategoryRepository::new((*state.db).clone());

    match category_repo.list_active().await {
        Ok(categories) => {
            let items: Vec<CategoryResponse> = categories
                .into_iter()
                .map(CategoryResponse::from)
                .collect();
            (StatusCode::OK, Json(json!({ "categories": items }))).into_response()
        }
        Err(e) => error_response(&AppError::Database(e.to_string())),
    }
}

/// GET `/categories/{id}` - Get a category by ID, active or not.
async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> impl IntoResponse {
    let category_repo = CategoryRepository::new((*state.db).clone());

    match category_repo.find_by_id(id).await {
        Ok(Some(category)) => {
            (StatusCode::OK, Json(CategoryResponse::from(category))).into_response()
        }
        Ok(None) => {
            error_response(&AppError::NotFound(format!("Category not found with id: {id}")))
        }
        Err(e) => error_response(&AppError::Database(e.to_string())),
    }
}

/// PUT `/categories/{id}` - Partially update a category.
async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateCategoryRequest>,
) -> impl IntoResponse {
    let category_repo = CategoryRepository::new((*state.db).clone());

    let input = UpdateCategoryInput {
        name: payload.name,
        description: payload.description,
    };

    match category_repo.update(id, input).await {
        Ok(category) => {
            info!(category_id = %category.id, "Category updated");
            (StatusCode::OK, Json(CategoryResponse::from(category))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/categories/{id}` - Deactivate a category (soft delete).
async fn deactivate_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> impl IntoResponse {
    let category_repo = CategoryRepository::new((*state.db).clone());

    match category_repo.deactivate(id).await {
        Ok(()) => {
            info!(category_id = %id, "Category deactivated");
            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}
