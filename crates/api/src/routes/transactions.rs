//! Transaction management routes.
//!
//! All responses are denormalized views carrying the owner's and
//! category's display names, not just their ids.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::{AppState, error::error_response};
use fintrack_core::transaction::{TransactionKind, TransactionView};
use fintrack_db::repositories::transaction::{
    CreateTransactionInput, TransactionRepository, UpdateTransactionInput,
};
use fintrack_shared::AppError;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", post(create_transaction))
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}", put(update_transaction))
        .route("/transactions/{id}", delete(deactivate_transaction))
        .route("/transactions/users/{user_id}", get(list_by_user))
        .route("/transactions/users/{user_id}/range", get(list_by_user_and_range))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Owning user ID.
    pub user_id: Uuid,
    /// Category ID.
    pub category_id: Uuid,
    /// Kind: "INCOME" or "EXPENSE", any case.
    pub kind: String,
    /// Amount, strictly positive.
    pub amount: String,
    /// Transaction date (YYYY-MM-DD).
    pub date: NaiveDate,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for a partial transaction update.
///
/// The owning user is immutable; there is deliberately no field for it.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// New category ID.
    pub category_id: Option<Uuid>,
    /// New kind: "INCOME" or "EXPENSE", any case.
    pub kind: Option<String>,
    /// New amount, strictly positive.
    pub amount: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
}

/// Query parameters for the date-range listing.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Range start (inclusive).
    pub start: NaiveDate,
    /// Range end (inclusive).
    pub end: NaiveDate,
}

/// Response for a transaction (denormalized view).
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Owning user ID.
    pub user_id: Uuid,
    /// Owning user display name.
    pub user_name: String,
    /// Category ID.
    pub category_id: Uuid,
    /// Category display name.
    pub category_name: String,
    /// Kind, uppercase.
    pub kind: String,
    /// Amount.
    pub amount: String,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: Option<String>,
}

impl From<TransactionView> for TransactionResponse {
    fn from(view: TransactionView) -> Self {
        Self {
            id: view.id,
            user_id: view.user_id,
            user_name: view.user_name,
            category_id: view.category_id,
            category_name: view.category_name,
            kind: view.kind.to_string(),
            amount: view.amount.to_string(),
            date: view.date,
            description: view.description,
        }
    }
}

// ============================================================================
// Input Parsing
// ============================================================================

/// Parses a kind string, case-insensitively.
fn parse_kind(kind: &str) -> Result<TransactionKind, AppError> {
    TransactionKind::from_str(kind).map_err(|e| AppError::Validation(e.to_string()))
}

/// Parses an amount and rejects anything not strictly positive.
fn parse_amount(amount: &str) -> Result<Decimal, AppError> {
    let amount = Decimal::from_str(amount)
        .map_err(|_| AppError::Validation(format!("Invalid amount: {amount}")))?;
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }
    Ok(amount)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/transactions` - Create a new transaction.
///
/// Nothing is persisted when the kind or amount fails validation or a
/// reference does not resolve.
async fn create_transaction(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTransactionRequest>,
) -> impl IntoResponse {
    let kind = match parse_kind(&payload.kind) {
        Ok(kind) => kind,
        Err(e) => return error_response(&e),
    };
    let amount = match parse_amount(&payload.amount) {
        Ok(amount) => amount,
        Err(e) => return error_response(&e),
    };

    let tx_repo = TransactionRepository::new((*state.db).clone());

    let input = CreateTransactionInput {
        user_id: payload.user_id,
        category_id: payload.category_id,
        kind,
        amount,
        date: payload.date,
        description: payload.description,
    };

    match tx_repo.create(input).await {
        Ok(view) => {
            info!(transaction_id = %view.id, user_id = %view.user_id, "Transaction created");
            (StatusCode::CREATED, Json(TransactionResponse::from(view))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/transactions/{id}` - Get a transaction by ID, active or not.
async fn get_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> impl IntoResponse {
    let tx_repo = TransactionRepository::new((*state.db).clone());

    match tx_repo.find_view_by_id(id).await {
        Ok(Some(view)) => {
            (StatusCode::OK, Json(TransactionResponse::from(view))).into_response()
        }
        Ok(None) => {
            error_response(&AppError::NotFound(format!("Transaction not found with id: {id}")))
        }
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/transactions/users/{user_id}` - List a user's active transactions.
async fn list_by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> impl IntoResponse {
    let tx_repo = TransactionRepository::new((*state.db).clone());

    match tx_repo.list_views_by_user(user_id).await {
        Ok(views) => transaction_list(views),
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/transactions/users/{user_id}/range?start&end` - List a user's
/// active transactions inside a closed date interval.
async fn list_by_user_and_range(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<RangeQuery>,
) -> impl IntoResponse {
    let tx_repo = TransactionRepository::new((*state.db).clone());

    match tx_repo
        .list_views_by_user_in_range(user_id, query.start, query.end)
        .await
    {
        Ok(views) => transaction_list(views),
        Err(e) => error_response(&e.into()),
    }
}

/// PUT `/transactions/{id}` - Partially update a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateTransactionRequest>,
) -> impl IntoResponse {
    // A present but blank kind counts as absent, like every other
    // optional string field.
    let kind = match payload.kind.filter(|k| !k.trim().is_empty()) {
        Some(kind) => match parse_kind(&kind) {
            Ok(kind) => Some(kind),
            Err(e) => return error_response(&e),
        },
        None => None,
    };
    let amount = match payload.amount {
        Some(amount) => match parse_amount(&amount) {
            Ok(amount) => Some(amount),
            Err(e) => return error_response(&e),
        },
        None => None,
    };

    let tx_repo = TransactionRepository::new((*state.db).clone());

    let input = UpdateTransactionInput {
        category_id: payload.category_id,
        kind,
        amount,
        date: payload.date,
        description: payload.description,
    };

    match tx_repo.update(id, input).await {
        Ok(view) => {
            info!(transaction_id = %view.id, "Transaction updated");
            (StatusCode::OK, Json(TransactionResponse::from(view))).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/transactions/{id}` - Deactivate a transaction (soft delete).
async fn deactivate_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> impl IntoResponse {
    let tx_repo = TransactionRepository::new((*state.db).clone());

    match tx_repo.deactivate(id).await {
        Ok(()) => {
            info!(transaction_id = %id, "Transaction deactivated");
            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

fn transaction_list(views: Vec<TransactionView>) -> axum::response::Response {
    let items: Vec<TransactionResponse> =
        views.into_iter().map(TransactionResponse::from).collect();
    (StatusCode::OK, Json(json!({ "transactions": items }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_kind_accepts_any_case() {
        assert_eq!(parse_kind("income").unwrap(), TransactionKind::Income);
        assert_eq!(parse_kind("EXPENSE").unwrap(), TransactionKind::Expense);
    }

    #[test]
    fn test_parse_kind_rejects_unknown() {
        let err = parse_kind("invalid").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("INCOME or EXPENSE"));
    }

    #[test]
    fn test_parse_amount_positive_only() {
        assert_eq!(parse_amount("250.50").unwrap(), dec!(250.50));
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-10").is_err());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_response_uses_uppercase_kind_and_string_amount() {
        let view = TransactionView {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: "Maria".to_string(),
            category_id: Uuid::new_v4(),
            category_name: "Groceries".to_string(),
            kind: TransactionKind::Expense,
            amount: dec!(250.50),
            date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            description: None,
        };

        let response = TransactionResponse::from(view);

        assert_eq!(response.kind, "EXPENSE");
        assert_eq!(response.amount, "250.50");
    }
}
