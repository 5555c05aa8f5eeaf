//! Transaction domain types.

pub mod types;

pub use types::{ParseKindError, TransactionKind, TransactionView};
