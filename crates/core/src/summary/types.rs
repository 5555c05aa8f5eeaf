//! Summary result types.

use rust_decimal::Decimal;

use crate::transaction::TransactionView;

/// Aggregate of one user's activity over one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// Sum of all INCOME amounts.
    pub total_income: Decimal,
    /// Sum of all EXPENSE amounts.
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`; may be negative.
    pub balance: Decimal,
    /// The contributing transactions, in store retrieval order.
    pub transactions: Vec<TransactionView>,
}
