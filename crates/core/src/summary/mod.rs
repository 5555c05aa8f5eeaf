//! Monthly income/expense aggregation.
//!
//! Pure logic: month boundary computation and the partition-and-sum over
//! a user's active transactions. Fetching the transactions is the
//! repository's job.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::SummaryError;
pub use service::SummaryService;
pub use types::MonthlySummary;
