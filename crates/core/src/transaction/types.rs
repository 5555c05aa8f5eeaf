//! Transaction kind and read-model types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Error returned when a kind string is neither INCOME nor EXPENSE.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid transaction kind: {0}. Must be INCOME or EXPENSE")]
pub struct ParseKindError(pub String);

/// Direction of a transaction.
///
/// Input is accepted case-insensitively; the canonical form is uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// Returns the canonical uppercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Denormalized transaction read model.
///
/// Carries the owner's and category's display names alongside their ids;
/// the write-side entity stays normalized (references by id only).
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionView {
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
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Amount (always positive).
    pub amount: Decimal,
    /// Calendar date, no time component.
    pub date: NaiveDate,
    /// Optional free-text description.
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_case_insensitive() {
        assert_eq!("INCOME".parse(), Ok(TransactionKind::Income));
        assert_eq!("income".parse(), Ok(TransactionKind::Income));
        assert_eq!("Expense".parse(), Ok(TransactionKind::Expense));
        assert_eq!("eXpEnSe".parse(), Ok(TransactionKind::Expense));
    }

    #[test]
    fn test_kind_parse_rejects_unknown() {
        let err = "transfer".parse::<TransactionKind>().unwrap_err();
        assert_eq!(err, ParseKindError("transfer".to_string()));
        assert!("".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_kind_display_is_uppercase() {
        assert_eq!(TransactionKind::Income.to_string(), "INCOME");
        assert_eq!(TransactionKind::Expense.to_string(), "EXPENSE");
    }
}
