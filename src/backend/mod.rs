//! Income statement backend integration module.
//!
//! Provides the HTTP client, row model and filter query builder.

pub mod client;
pub mod models;
pub mod query;

#[cfg(test)]
pub mod test_server;

pub use client::{BackendClient, BackendError};
pub use models::IncomeStatement;
pub use query::FilterQuery;
