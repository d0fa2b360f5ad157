//! PDE Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the product data enrichment
//! workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`PdeError`] and the crate-wide [`Result`] alias
//! - **Types**: the tabular model ([`types::Table`], [`types::Record`]) and
//!   the per-run summary ([`types::RunStats`])
//! - **Logging**: `tracing` subscriber setup shared by every binary
//!
//! # Example
//!
//! ```no_run
//! use pde_common::types::Table;
//!
//! let mut table = Table::new(vec!["part_number".to_string()]);
//! table.push_row(vec!["MOT-5HP".to_string()]);
//! assert_eq!(table.len(), 1);
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{PdeError, Result};
