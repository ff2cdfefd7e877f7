//! supplystat - Selection-driven procurement and container metrics
//!
//! This library provides functionality to:
//! - Load SKU line items, supplier summaries and container records from CSV
//! - Aggregate procurement, shipping and total cost for any SKU/supplier selection
//! - Break order quantity and cost down per SKU and supplier
//! - Report container utilization per supplier
//! - Render results as tables or JSON, or serve them over stdio
//!
//! # Examples
//!
//! ```no_run
//! use supplystat::aggregation::Aggregator;
//! use supplystat::selection::Selection;
//! use supplystat_core::provider::DataSource;
//! use supplystat_csv::CsvDataSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> supplystat::Result<()> {
//!     let source = CsvDataSource::discover(None).await?;
//!     let aggregator = Aggregator::new(Arc::new(source.load().await?));
//!
//!     let selection = Selection::new().with_skus(["Slim Fit Jeans"]);
//!     let report = aggregator.report(&selection);
//!     println!("{} series", report.breakdown.series.len());
//!
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod output;
pub mod serve;

pub use supplystat_core::{aggregation_types, dataset, error, selection, types};

// Re-export commonly used types
pub use error::{Result, SupplystatError};
pub use selection::{Filter, Selection, SelectionScope};
pub use types::{SkuId, SkuName, SupplierName};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
