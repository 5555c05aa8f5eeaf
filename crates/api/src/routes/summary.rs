//! Monthly summary routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::{ApiPath, ApiQuery};
use crate::routes::transactions::TransactionResponse;
use crate::{AppState, error::error_response};
use fintrack_core::summary::{MonthlySummary, SummaryService};
use fintrack_db::repositories::transaction::TransactionRepository;
use fintrack_db::repositories::user::UserRepository;
use fintrack_shared::AppError;

/// Creates the summary routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/summary/users/{user_id}", get(get_monthly_summary))
}

/// Query parameters for the monthly summary.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

/// Response for a monthly summary.
#[derive(Debug, Serialize)]
pub struct MonthlySummaryResponse {
    /// Sum of all INCOME amounts in the month.
    pub total_income: String,
    /// Sum of all EXPENSE amounts in the month.
    pub total_expenses: String,
    /// Income minus expenses; may be negative.
    pub balance: String,
    /// The contributing transactions.
    pub transactions: Vec<TransactionResponse>,
}

impl From<MonthlySummary> for MonthlySummaryResponse {
    fn from(summary: MonthlySummary) -> Self {
        Self {
            total_income: summary.total_income.to_string(),
            total_expenses: summary.total_expenses.to_string(),
            balance: summary.balance.to_string(),
            transactions: summary
                .transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect(),
        }
    }
}

/// GET `/summary/users/{user_id}?month&year` - Income, expense, and
/// balance totals for one user over one calendar month.
///
/// A month with no transactions is a valid summary with zero totals,
/// not an error.
async fn get_monthly_summary(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<SummaryQuery>,
) -> impl IntoResponse {
    // Out-of-range months are rejected, never normalized.
    let (first_day, last_day) = match SummaryService::month_bounds(query.year, query.month) {
        Ok(bounds) => bounds,
        Err(e) => return error_response(&e.into()),
    };

    let user_repo = UserRepository::new((*state.db).clone());
    match user_repo.find_by_id(user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(&AppError::NotFound(format!(
                "User not found with id: {user_id}"
            )));
        }
        Err(e) => return error_response(&AppError::Database(e.to_string())),
    }

    let tx_repo = TransactionRepository::new((*state.db).clone());

    match tx_repo
        .list_views_by_user_in_range(user_id, first_day, last_day)
        .await
    {
        Ok(views) => {
            let summary = SummaryService::summarize(views);
            (
                StatusCode::OK,
                Json(MonthlySummaryResponse::from(summary)),
            )
                .into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fintrack_core::transaction::{TransactionKind, TransactionView};
    use rust_decimal_macros::dec;

    fn view(kind: TransactionKind, amount: rust_decimal::Decimal) -> TransactionView {
        TransactionView {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user_name: "Maria".to_string(),
            category_id: Uuid::new_v4(),
            category_name: "Groceries".to_string(),
            kind,
            amount,
            date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            description: None,
        }
    }

    #[test]
    fn test_summary_response_totals_are_strings() {
        let summary = SummaryService::summarize(vec![
            view(TransactionKind::Income, dec!(1000.00)),
            view(TransactionKind::Expense, dec!(250.50)),
        ]);

        let response = MonthlySummaryResponse::from(summary);

        assert_eq!(response.total_income, "1000.00");
        assert_eq!(response.total_expenses, "250.50");
        assert_eq!(response.balance, "749.50");
        assert_eq!(response.transactions.len(), 2);
    }
}
