//! Error types for supplystat
//!
//! This module defines the error types used throughout the supplystat crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Aggregation itself never fails: unavailable metrics and empty selections
//! are ordinary values. Every variant here comes from loading the dataset or
//! from parsing user input before the engine runs.
//!
//! # Example
//!
//! ```
//! use supplystat_core::error::{Result, SupplystatError};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to SupplystatError
//!     let _file = std::fs::read_to_string("nonexistent.csv")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for supplystat operations
#[derive(Error, Debug)]
pub enum SupplystatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// No data directory could be located
    #[error("No data directory found")]
    DataDirectoryNotFound,

    /// A required table file is missing from the data directory
    #[error("Missing table: {}", .0.display())]
    MissingTable(PathBuf),

    /// A row failed validation while loading
    #[error("Invalid record in {} at line {line}: {error}", .file.display())]
    InvalidRecord {
        /// The file containing the record
        file: PathBuf,
        /// 1-based line number of the record, header included
        line: u64,
        /// What was wrong with it
        error: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in supplystat
///
/// # Example
///
/// ```
/// use supplystat_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, SupplystatError>;
