//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use fintrack_shared::AppError;

use super::{is_unique_violation, non_blank};
use crate::entities::users;

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// User not found.
    #[error("User not found with id: {0}")]
    NotFound(Uuid),

    /// Email already registered to another user.
    #[error("A user with email {0} already exists")]
    EmailTaken(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::NotFound(err.to_string()),
            UserError::EmailTaken(_) => Self::Conflict(err.to_string()),
            UserError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for registering a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// Email (unique across users).
    pub email: String,
    /// Password, stored as-is. Hashing is out of scope.
    pub password: String,
}

/// Delta for a partial user update. Absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// New display name.
    pub name: Option<String>,
    /// New email; re-validated for uniqueness when it actually changes.
    pub email: Option<String>,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new user after checking the email is free.
    ///
    /// The read-then-write check can race with a concurrent
    /// registration; the unique index on `users(email)` decides the
    /// loser, and that rejection also maps to `EmailTaken`.
    ///
    /// # Errors
    ///
    /// Returns `EmailTaken` if the email is already registered, or a
    /// database error.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        let existing = self.find_by_email(&input.email).await?;
        if existing.is_some() {
            return Err(UserError::EmailTaken(input.email));
        }

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email.clone()),
            password: Set(input.password),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::EmailTaken(input.email)
            } else {
                UserError::Database(e)
            }
        })
    }

    /// Finds a user by ID. Inactive users are still addressable here.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Lists active users.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::IsActive.eq(true))
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Applies a partial update.
    ///
    /// A new email is re-validated for uniqueness only when it differs
    /// from the current one (case-insensitively); setting a user's own
    /// email back, in any case variant, is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist, `EmailTaken` if
    /// the new email belongs to a different user, or a database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateUserInput,
    ) -> Result<users::Model, UserError> {
        let user = users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let new_email = match non_blank(input.email) {
            Some(email) if !email.eq_ignore_ascii_case(&user.email) => {
                let existing = self.find_by_email(&email).await?;
                if let Some(other) = existing
                    && other.id != id
                {
                    return Err(UserError::EmailTaken(email));
                }
                Some(email)
            }
            _ => None,
        };

        let mut active: users::ActiveModel = user.into();
        if let Some(name) = non_blank(input.name) {
            active.name = Set(name);
        }
        if let Some(email) = new_email.clone() {
            active.email = Set(email);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                UserError::EmailTaken(new_email.unwrap_or_default())
            } else {
                UserError::Database(e)
            }
        })
    }

    /// Deactivates a user (soft delete).
    ///
    /// The row is kept; `is_active` goes false and `updated_at` is
    /// refreshed. Deactivating an already-inactive user succeeds.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist, or a database
    /// error.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), UserError> {
        let user = users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let mut active: users::ActiveModel = user.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }
}
