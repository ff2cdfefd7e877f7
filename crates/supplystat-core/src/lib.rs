//! Core types, traits, and utilities for supplystat
//!
//! This crate provides the foundational types shared by the other supplystat
//! crates: strongly-typed names, the selection model, the immutable
//! [`Dataset`](dataset::Dataset), the aggregation result records, and the
//! error type.

pub mod aggregation_types;
pub mod dataset;
pub mod error;
pub mod provider;
pub mod selection;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use dataset::Dataset;
pub use error::{Result, SupplystatError};
pub use selection::{Filter, Selection, SelectionScope};
pub use types::{SkuId, SkuName, SupplierName};
