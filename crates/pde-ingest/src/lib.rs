//! PDE Ingest Library
//!
//! Enriches tabular product records with attributes inferred from their part
//! numbers and descriptions.
//!
//! # Components
//!
//! - **extract**: pattern rules pulling voltage, amperage, horsepower, phase,
//!   and RPM out of part numbers
//! - **categorize**: ordered keyword rules assigning a product category
//! - **enrich**: the pass that fills empty cells and records run statistics
//! - **rules**: JSON rule files replacing the built-in rule sets
//! - **table_io** / **pipeline**: CSV/TSV/Excel loading, output naming, and the
//!   file-to-file run used by the CLI
//!
//! # Example
//!
//! ```no_run
//! use pde_common::types::Table;
//! use pde_ingest::enrich::Enricher;
//!
//! fn main() -> pde_common::Result<()> {
//!     let mut table = Table::new(vec!["part_number".into(), "description".into()]);
//!     table.push_row(vec!["MOT-5HP-3PH-1750RPM".into(), "industrial motor".into()]);
//!
//!     let (table, stats) = Enricher::standard()?.enrich(table);
//!     assert_eq!(stats.enriched_products, 1);
//!     assert_eq!(table.record(0).and_then(|r| r.value("category")), Some("Motor"));
//!     Ok(())
//! }
//! ```

pub mod categorize;
pub mod config;
pub mod enrich;
pub mod extract;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod table_io;
