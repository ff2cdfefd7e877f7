//! Data source trait
//!
//! This module defines the `DataSource` trait that supplies the three input
//! tables. A data source runs once at process start; whatever it returns is
//! the immutable snapshot every aggregation reads from.

use crate::dataset::Dataset;
use crate::error::Result;
use async_trait::async_trait;

/// Trait for loaders that produce a [`Dataset`].
///
/// Loading either yields a fully validated dataset or fails; malformed rows
/// are reported here and never reach the aggregators.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Load and validate all tables.
    async fn load(&self) -> Result<Dataset>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::sample_dataset;

    struct InMemory;

    #[async_trait]
    impl DataSource for InMemory {
        async fn load(&self) -> Result<Dataset> {
            Ok(sample_dataset())
        }
    }

    #[tokio::test]
    async fn test_trait_object_loads() {
        let source: Box<dyn DataSource> = Box::new(InMemory);
        let dataset = source.load().await.unwrap();
        assert_eq!(dataset.skus().len(), 3);
    }
}
