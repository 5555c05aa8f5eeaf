//! Monthly summary computation.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use super::error::SummaryError;
use super::types::MonthlySummary;
use crate::transaction::{TransactionKind, TransactionView};

/// Service for computing monthly summaries.
pub struct SummaryService;

impl SummaryService {
    /// Computes the closed date interval covering one calendar month.
    ///
    /// The last day is derived from the first day of the following month,
    /// so month lengths and leap years come from the calendar, not a
    /// lookup table.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidMonth` when the month is outside
    /// `[1, 12]` or the year is not representable. Out-of-range input is
    /// rejected, never normalized.
    pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), SummaryError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(SummaryError::InvalidMonth { month, year })?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or(SummaryError::InvalidMonth { month, year })?;

        Ok((first, last))
    }

    /// Partitions transactions by kind and sums each side exactly.
    ///
    /// Summation starts from `Decimal::ZERO`; an empty input yields zero
    /// totals and an empty list, which is a valid summary, not an error.
    #[must_use]
    pub fn summarize(transactions: Vec<TransactionView>) -> MonthlySummary {
        let total_income: Decimal = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();

        let total_expenses: Decimal = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        MonthlySummary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            transactions,
        }
    }
}
