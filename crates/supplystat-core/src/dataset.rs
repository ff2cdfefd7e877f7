//! The immutable dataset
//!
//! A [`Dataset`] holds the three source tables. It is built once by a
//! [`DataSource`](crate::provider::DataSource) at process start, is never
//! mutated afterwards, and is shared read-only by every aggregation call.
//! Row order is preserved exactly as loaded.

use crate::types::{SkuId, SkuName, SupplierName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One SKU ordered from one supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuLineItem {
    #[serde(rename = "SKU ID")]
    pub sku_id: SkuId,
    #[serde(rename = "SKU Name")]
    pub sku_name: SkuName,
    #[serde(rename = "Supplier Name")]
    pub supplier_name: SupplierName,
    #[serde(rename = "Order Quantity")]
    pub order_quantity: f64,
    /// Combined cost of the line, in currency units
    #[serde(rename = "Total Cost")]
    pub total_cost: f64,
}

/// Per-supplier cost and container summary
///
/// `total_cost` already equals procurement plus shipping in the source data
/// and is taken as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierSummary {
    #[serde(rename = "Supplier Name")]
    pub supplier_name: SupplierName,
    #[serde(rename = "Procurement Cost")]
    pub procurement_cost: f64,
    #[serde(rename = "Shipping Cost")]
    pub shipping_cost: f64,
    #[serde(rename = "Total Cost")]
    pub total_cost: f64,
    #[serde(rename = "Number Containers")]
    pub number_containers: u64,
    /// Ratio in `[0, 1]`
    #[serde(rename = "Container Utilization")]
    pub container_utilization: f64,
}

/// A container row, kept column by column in file order
///
/// Nothing aggregates containers yet, so no schema is imposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    fields: Vec<(String, String)>,
}

impl ContainerRecord {
    /// Build a record from `(column, value)` pairs
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Look up a value by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// All `(column, value)` pairs in file order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// The values offered by the two multi-select controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    /// Distinct SKU names, ascending
    pub skus: Vec<SkuName>,
    /// Distinct supplier names, ascending
    pub suppliers: Vec<SupplierName>,
}

/// Read-only snapshot of the three source tables
///
/// # Examples
/// ```
/// use supplystat_core::dataset::{Dataset, SupplierSummary};
/// use supplystat_core::types::SupplierName;
///
/// let dataset = Dataset::new(
///     vec![],
///     vec![SupplierSummary {
///         supplier_name: SupplierName::new("S1"),
///         procurement_cost: 100.0,
///         shipping_cost: 20.0,
///         total_cost: 120.0,
///         number_containers: 3,
///         container_utilization: 0.8,
///     }],
///     vec![],
/// );
/// assert_eq!(dataset.suppliers().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    skus: Vec<SkuLineItem>,
    suppliers: Vec<SupplierSummary>,
    containers: Vec<ContainerRecord>,
}

impl Dataset {
    /// Assemble a dataset from already-validated tables
    pub fn new(
        skus: Vec<SkuLineItem>,
        suppliers: Vec<SupplierSummary>,
        containers: Vec<ContainerRecord>,
    ) -> Self {
        Self {
            skus,
            suppliers,
            containers,
        }
    }

    /// SKU line items in load order
    pub fn skus(&self) -> &[SkuLineItem] {
        &self.skus
    }

    /// Supplier summaries in load order
    pub fn suppliers(&self) -> &[SupplierSummary] {
        &self.suppliers
    }

    /// Container records in load order
    pub fn containers(&self) -> &[ContainerRecord] {
        &self.containers
    }

    /// Distinct SKU names, sorted
    pub fn sku_names(&self) -> Vec<SkuName> {
        self.skus
            .iter()
            .map(|item| item.sku_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct supplier names from the supplier table, sorted
    pub fn supplier_names(&self) -> Vec<SupplierName> {
        self.suppliers
            .iter()
            .map(|supplier| supplier.supplier_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Both option lists at once
    pub fn options(&self) -> SelectionOptions {
        SelectionOptions {
            skus: self.sku_names(),
            suppliers: self.supplier_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{line_item, sample_dataset};

    #[test]
    fn test_options_are_sorted_and_distinct() {
        let dataset = Dataset::new(
            vec![
                line_item(2, "Gadget", "S2", 1.0, 1.0),
                line_item(1, "Widget", "S1", 1.0, 1.0),
                line_item(1, "Widget", "S2", 1.0, 1.0),
            ],
            vec![],
            vec![],
        );

        let options = dataset.options();
        assert_eq!(options.skus, vec![SkuName::new("Gadget"), SkuName::new("Widget")]);
        assert!(options.suppliers.is_empty());
    }

    #[test]
    fn test_supplier_names_come_from_supplier_table() {
        let dataset = sample_dataset();
        assert_eq!(
            dataset.supplier_names(),
            vec![SupplierName::new("S1"), SupplierName::new("S2")]
        );
    }

    #[test]
    fn test_container_record_lookup() {
        let record = ContainerRecord::new(vec![
            ("Container ID".to_string(), "C-01".to_string()),
            ("Supplier Name".to_string(), "S1".to_string()),
        ]);
        assert_eq!(record.get("Container ID"), Some("C-01"));
        assert_eq!(record.get("Weight"), None);
        assert_eq!(record.fields().len(), 2);
    }
}
