//! Transaction repository for database operations.
//!
//! Read paths return the denormalized `TransactionView` from
//! `fintrack-core`: the owner's and category's display names are
//! resolved with a follow-up lookup at this boundary, while the stored
//! row keeps plain id references.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use fintrack_core::transaction::{TransactionKind, TransactionView};
use fintrack_shared::AppError;

use crate::entities::{categories, transactions, users};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found with id: {0}")]
    NotFound(Uuid),

    /// Referenced user not found.
    #[error("User not found with id: {0}")]
    UserNotFound(Uuid),

    /// Referenced category not found.
    #[error("Category not found with id: {0}")]
    CategoryNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_)
            | TransactionError::UserNotFound(_)
            | TransactionError::CategoryNotFound(_) => Self::NotFound(err.to_string()),
            TransactionError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning user ID. Must resolve to an existing user.
    pub user_id: Uuid,
    /// Category ID. Must resolve to an existing category.
    pub category_id: Uuid,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Amount, strictly positive (validated upstream).
    pub amount: Decimal,
    /// Calendar date. No range restriction.
    pub date: NaiveDate,
    /// Optional description.
    pub description: Option<String>,
}

/// Delta for a partial transaction update. Absent fields keep their
/// value. The owning user is immutable, so there is no field for it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New category; must resolve to an existing category.
    pub category_id: Option<Uuid>,
    /// New kind.
    pub kind: Option<TransactionKind>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a transaction.
    ///
    /// Both references are resolved before the insert; there is no
    /// duplicate detection, so repeated identical transactions are
    /// allowed.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` / `CategoryNotFound` when a reference
    /// does not resolve, or a database error.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<TransactionView, TransactionError> {
        let user = users::Entity::find_by_id(input.user_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::UserNotFound(input.user_id))?;

        let category = categories::Entity::find_by_id(input.category_id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::CategoryNotFound(input.category_id))?;

        let now = chrono::Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            category_id: Set(input.category_id),
            kind: Set(input.kind.into()),
            amount: Set(input.amount),
            date: Set(input.date),
            description: Set(input.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = transaction.insert(&self.db).await?;
        Ok(to_view(model, user.name, category.name))
    }

    /// Finds a transaction by ID as a denormalized view. Inactive
    /// transactions are still addressable here.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_view_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<TransactionView>, TransactionError> {
        let Some(model) = transactions::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let user = users::Entity::find_by_id(model.user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| missing_reference("user", model.user_id))?;
        let category = categories::Entity::find_by_id(model.category_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| missing_reference("category", model.category_id))?;

        Ok(Some(to_view(model, user.name, category.name)))
    }

    /// Lists a user's active transactions as denormalized views.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_views_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TransactionView>, TransactionError> {
        let models = self.active_by_user(user_id).all(&self.db).await?;
        self.load_views(models).await
    }

    /// Lists a user's active transactions with a date inside the
    /// closed interval `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_views_by_user_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TransactionView>, TransactionError> {
        let models = self
            .active_by_user(user_id)
            .filter(transactions::Column::Date.between(start, end))
            .all(&self.db)
            .await?;
        self.load_views(models).await
    }

    /// Applies a partial update.
    ///
    /// A new category reference is resolved before anything is
    /// written; a failed update leaves the row untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the transaction does not exist,
    /// `CategoryNotFound` if a new category does not resolve, or a
    /// database error.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<TransactionView, TransactionError> {
        let transaction = transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        if let Some(category_id) = input.category_id {
            let category = categories::Entity::find_by_id(category_id)
                .one(&self.db)
                .await?;
            if category.is_none() {
                return Err(TransactionError::CategoryNotFound(category_id));
            }
        }

        let mut active: transactions::ActiveModel = transaction.into();
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(kind) = input.kind {
            active.kind = Set(kind.into());
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let model = active.update(&self.db).await?;

        let user = users::Entity::find_by_id(model.user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| missing_reference("user", model.user_id))?;
        let category = categories::Entity::find_by_id(model.category_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| missing_reference("category", model.category_id))?;

        Ok(to_view(model, user.name, category.name))
    }

    /// Deactivates a transaction (soft delete).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the transaction does not exist, or a
    /// database error.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), TransactionError> {
        let transaction = transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let mut active: transactions::ActiveModel = transaction.into();
        active.is_active = Set(false);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        Ok(())
    }

    /// Query for a user's active transactions, date then insertion order.
    fn active_by_user(&self, user_id: Uuid) -> sea_orm::Select<transactions::Entity> {
        transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::IsActive.eq(true))
            .order_by_asc(transactions::Column::Date)
            .order_by_asc(transactions::Column::CreatedAt)
    }

    /// Resolves display names for a batch of rows with one query per
    /// referenced table.
    async fn load_views(
        &self,
        models: Vec<transactions::Model>,
    ) -> Result<Vec<TransactionView>, TransactionError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<Uuid> = models.iter().map(|m| m.user_id).collect();
        let category_ids: Vec<Uuid> = models.iter().map(|m| m.category_id).collect();

        let user_names: HashMap<Uuid, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let category_names: HashMap<Uuid, String> = categories::Entity::find()
            .filter(categories::Column::Id.is_in(category_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        models
            .into_iter()
            .map(|m| {
                let user_name = user_names
                    .get(&m.user_id)
                    .cloned()
                    .ok_or_else(|| missing_reference("user", m.user_id))?;
                let category_name = category_names
                    .get(&m.category_id)
                    .cloned()
                    .ok_or_else(|| missing_reference("category", m.category_id))?;
                Ok(to_view(m, user_name, category_name))
            })
            .collect()
    }
}

/// A foreign key pointed at a missing row; the schema makes this
/// unreachable, so it surfaces as a store error rather than a 404.
fn missing_reference(entity: &str, id: Uuid) -> TransactionError {
    TransactionError::Database(DbErr::RecordNotFound(format!(
        "transaction references missing {entity} {id}"
    )))
}

/// Maps a stored row plus resolved names to the read model.
fn to_view(model: transactions::Model, user_name: String, category_name: String) -> TransactionView {
    TransactionView {
        id: model.id,
        user_id: model.user_id,
        user_name,
        category_id: model.category_id,
        category_name,
        kind: model.kind.into(),
        amount: model.amount,
        date: model.date,
        description: model.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_core::transaction::TransactionKind as CoreKind;
    use rust_decimal_macros::dec;

    fn model(kind: crate::entities::sea_orm_active_enums::TransactionKind) -> transactions::Model {
        let now = chrono::Utc::now().into();
        transactions::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            kind,
            amount: dec!(42.50),
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            description: Some("lunch".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_to_view_denormalizes_names() {
        let m = model(crate::entities::sea_orm_active_enums::TransactionKind::Expense);
        let id = m.id;

        let view = to_view(m, "Maria".to_string(), "Groceries".to_string());

        assert_eq!(view.id, id);
        assert_eq!(view.user_name, "Maria");
        assert_eq!(view.category_name, "Groceries");
        assert_eq!(view.kind, CoreKind::Expense);
        assert_eq!(view.amount, dec!(42.50));
    }

    #[test]
    fn test_transaction_errors_map_to_app_errors() {
        let id = Uuid::new_v4();
        assert_eq!(AppError::from(TransactionError::NotFound(id)).status_code(), 404);
        assert_eq!(AppError::from(TransactionError::UserNotFound(id)).status_code(), 404);
        assert_eq!(
            AppError::from(TransactionError::CategoryNotFound(id)).status_code(),
            404
        );
        assert_eq!(
            AppError::from(TransactionError::Database(DbErr::Custom("boom".to_string())))
                .status_code(),
            500
        );
    }
}
