//! Summary error types.

use fintrack_shared::AppError;
use thiserror::Error;

/// Errors that can occur while building a monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// Month/year pair does not name a calendar month.
    #[error("Invalid month: {month}/{year}. Month must be between 1 and 12")]
    InvalidMonth {
        /// Requested month.
        month: u32,
        /// Requested year.
        year: i32,
    },
}

impl From<SummaryError> for AppError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::InvalidMonth { .. } => Self::Validation(err.to_string()),
        }
    }
}
