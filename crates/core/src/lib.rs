//! Core business logic for Fintrack.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies.
//!
//! # Modules
//!
//! - `transaction` - Transaction kind and the denormalized read model
//! - `summary` - Monthly income/expense aggregation
pub mod summary;
pub mod transaction;
