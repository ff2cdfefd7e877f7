//! CSV data source for supplystat
//!
//! This crate implements the `DataSource` trait for a directory holding
//! `skus_suppliers.csv`, `suppliers.csv` and `containers.csv`, handling
//! directory discovery, parsing and load-time validation.

pub mod data_loader;

pub use data_loader::CsvDataSource;
