//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod filters;
pub mod table;

pub use filters::render_filters;
pub use table::{header_column_at, render_table};
