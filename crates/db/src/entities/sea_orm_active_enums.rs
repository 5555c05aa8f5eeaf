//! Database enum types.

use fintrack_core::transaction::TransactionKind as CoreKind;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction direction, stored as the `transaction_kind` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
pub enum TransactionKind {
    /// Money coming in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<CoreKind> for TransactionKind {
    fn from(kind: CoreKind) -> Self {
        match kind {
            CoreKind::Income => Self::Income,
            CoreKind::Expense => Self::Expense,
        }
    }
}

impl From<TransactionKind> for CoreKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_core() {
        assert_eq!(TransactionKind::from(CoreKind::Income), TransactionKind::Income);
        assert_eq!(TransactionKind::from(CoreKind::Expense), TransactionKind::Expense);
        assert_eq!(CoreKind::from(TransactionKind::Income), CoreKind::Income);
        assert_eq!(CoreKind::from(TransactionKind::Expense), CoreKind::Expense);
    }
}
