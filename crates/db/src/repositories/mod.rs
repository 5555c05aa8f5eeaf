//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Update inputs are delta structs with optional fields:
//! present fields overwrite, absent fields keep their value, and blank
//! strings count as absent.

pub mod category;
pub mod transaction;
pub mod user;

pub use category::{CategoryError, CategoryRepository, CreateCategoryInput, UpdateCategoryInput};
pub use transaction::{
    CreateTransactionInput, TransactionError, TransactionRepository, UpdateTransactionInput,
};
pub use user::{CreateUserInput, UpdateUserInput, UserError, UserRepository};

use sea_orm::{DbErr, SqlErr};

/// Treats `None` and blank strings the same way: no value supplied.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// True when the store rejected a write over a unique constraint.
///
/// The read-then-write uniqueness checks in the repositories are racy;
/// the schema-level unique indexes are the backstop, and their
/// violations surface through here as duplicate errors.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_filters_empty_and_whitespace() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(Some("  \t\n".to_string())), None);
        assert_eq!(
            non_blank(Some("Groceries".to_string())),
            Some("Groceries".to_string())
        );
    }

    #[test]
    fn test_custom_errors_are_not_unique_violations() {
        let err = DbErr::Custom("duplicate key value violates unique constraint".to_string());
        assert!(!is_unique_violation(&err));
    }
}
