//! Category repository for database operations.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use fintrack_shared::AppError;

use super::{is_unique_violation, non_blank};
use crate::entities::categories;

/// Error types for category operations.
#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    /// Category not found.
    #[error("Category not found with id: {0}")]
    NotFound(Uuid),

    /// A category with this name already exists (case-insensitive).
    #[error("A category named {0} already exists")]
    NameTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => Self::NotFound(err.to_string()),
            CategoryError::NameTaken(_) => Self::Conflict(err.to_string()),
            CategoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    /// Category name (unique, case-insensitive).
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Delta for a partial category update. Absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a category after checking no case-variant of the name
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `NameTaken` for a duplicate name, or a database error.
    pub async fn create(
        &self,
        input: CreateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let existing = self.find_by_name_ci(&input.name).await?;
        if existing.is_some() {
            return Err(CategoryError::NameTaken(input.name));
        }

        let now = chrono::Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            description: Set(input.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        category.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                CategoryError::NameTaken(input.name)
            } else {
                CategoryError::Database(e)
            }
        })
    }

    /// Finds a category by ID. Inactive categories are still
    /// addressable here.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a category whose name matches case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name_ci(&self, name: &str) -> Result<Option<categories::Model>, DbErr> {
        categories::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(categories::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .one(&self.db)
            .await
    }

    /// Lists active categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .filter(categories::Column::IsActive.eq(true))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Applies a partial update.
    ///
    /// Name uniqueness is not re-checked here; the unique index on
    /// `lower(name)` still rejects a rename onto an existing category,
    /// which surfaces as `NameTaken`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category does not exist, `NameTaken`
    /// if a rename collides, or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<categories::Model, CategoryError> {
        let category = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        let new_name = non_blank(input.name);

        let mut active: categories::ActiveModel = category.into();
        if let Some(name) = new_name.clone() {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                CategoryError::NameTaken(new_name.unwrap_or_default())
            } else {
                CategoryError::Database(e)
            }
        })
    }

    /// Deactivates a category (soft delete).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category does not exist, or a database
    /// error.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), CategoryError> {
        let category = categories::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CategoryError::NotFound(id))?;

        let mut active: categories::ActiveModel = category.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_errors_map_to_app_errors() {
        let id = Uuid::new_v4();
        let not_found: AppError = CategoryError::NotFound(id).into();
        assert_eq!(not_found.status_code(), 404);

        let taken: AppError = CategoryError::NameTaken("Groceries".to_string()).into();
        assert_eq!(taken.status_code(), 400);
        assert!(taken.to_string().contains("Groceries"));
    }
}
