//! Tests for monthly summary computation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::error::SummaryError;
use super::service::SummaryService;
use crate::transaction::{TransactionKind, TransactionView};

fn view(kind: TransactionKind, amount: Decimal, date: NaiveDate) -> TransactionView {
    TransactionView {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        user_name: "Maria".to_string(),
        category_id: Uuid::new_v4(),
        category_name: "Groceries".to_string(),
        kind,
        amount,
        date,
        description: None,
    }
}

#[rstest]
#[case(2026, 1, 31)]
#[case(2026, 4, 30)]
#[case(2026, 6, 30)]
#[case(2026, 12, 31)]
#[case(2023, 2, 28)]
#[case(2024, 2, 29)] // leap year
#[case(2000, 2, 29)] // divisible by 400
#[case(1900, 2, 28)] // divisible by 100, not 400
fn test_month_bounds(#[case] year: i32, #[case] month: u32, #[case] last_day: u32) {
    let (first, last) = SummaryService::month_bounds(year, month).unwrap();
    assert_eq!(first, NaiveDate::from_ymd_opt(year, month, 1).unwrap());
    assert_eq!(last, NaiveDate::from_ymd_opt(year, month, last_day).unwrap());
}

#[rstest]
#[case(0)]
#[case(13)]
#[case(99)]
fn test_month_bounds_rejects_out_of_range(#[case] month: u32) {
    assert_eq!(
        SummaryService::month_bounds(2026, month),
        Err(SummaryError::InvalidMonth { month, year: 2026 })
    );
}

#[test]
fn test_summarize_partitions_by_kind() {
    // Worked example: two active March 2025 transactions.
    let march_5 = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
    let march_20 = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

    let summary = SummaryService::summarize(vec![
        view(TransactionKind::Income, dec!(1000.00), march_5),
        view(TransactionKind::Expense, dec!(250.50), march_20),
    ]);

    assert_eq!(summary.total_income, dec!(1000.00));
    assert_eq!(summary.total_expenses, dec!(250.50));
    assert_eq!(summary.balance, dec!(749.50));
    assert_eq!(summary.transactions.len(), 2);
}

#[test]
fn test_summarize_empty_is_zero_not_error() {
    let summary = SummaryService::summarize(vec![]);

    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.total_expenses, Decimal::ZERO);
    assert_eq!(summary.balance, Decimal::ZERO);
    assert!(summary.transactions.is_empty());
}

#[test]
fn test_summarize_balance_may_be_negative() {
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

    let summary = SummaryService::summarize(vec![
        view(TransactionKind::Income, dec!(100), date),
        view(TransactionKind::Expense, dec!(350.25), date),
    ]);

    assert_eq!(summary.balance, dec!(-250.25));
}

#[test]
fn test_summarize_keeps_input_order() {
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    let first = view(TransactionKind::Income, dec!(10), date);
    let second = view(TransactionKind::Expense, dec!(20), date);

    let summary = SummaryService::summarize(vec![first.clone(), second.clone()]);

    assert_eq!(summary.transactions, vec![first, second]);
}

/// Strategy for positive amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Income),
        Just(TransactionKind::Expense),
    ]
}

proptest! {
    /// For any set of transactions, income minus expenses equals the
    /// balance exactly. No rounding drift.
    #[test]
    fn prop_balance_identity(
        entries in proptest::collection::vec((kind_strategy(), amount_strategy()), 0..50),
    ) {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let transactions: Vec<TransactionView> = entries
            .into_iter()
            .map(|(kind, amount)| view(kind, amount, date))
            .collect();

        let expected_income: Decimal = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Income)
            .map(|t| t.amount)
            .sum();
        let expected_expenses: Decimal = transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .map(|t| t.amount)
            .sum();

        let summary = SummaryService::summarize(transactions);

        prop_assert_eq!(summary.total_income, expected_income);
        prop_assert_eq!(summary.total_expenses, expected_expenses);
        prop_assert_eq!(summary.balance, summary.total_income - summary.total_expenses);
    }

    /// Totals are never negative when every amount is positive.
    #[test]
    fn prop_totals_nonnegative(
        entries in proptest::collection::vec((kind_strategy(), amount_strategy()), 0..50),
    ) {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let transactions: Vec<TransactionView> = entries
            .into_iter()
            .map(|(kind, amount)| view(kind, amount, date))
            .collect();

        let summary = SummaryService::summarize(transactions);

        prop_assert!(summary.total_income >= Decimal::ZERO);
        prop_assert!(summary.total_expenses >= Decimal::ZERO);
    }
}
