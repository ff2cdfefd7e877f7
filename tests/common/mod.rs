//! Common test utilities and helpers for supplystat tests
//!
//! Builders for in-memory rows plus a fixture writer that lays the three
//! CSV tables out in a temporary directory.

#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::sync::Arc;
use supplystat::aggregation::Aggregator;
use supplystat::dataset::{Dataset, SkuLineItem, SupplierSummary};
use supplystat::types::{SkuId, SkuName, SupplierName};
use supplystat_csv::data_loader::{CONTAINER_TABLE, SKU_TABLE, SUPPLIER_TABLE};
use tempfile::TempDir;
use tokio::fs;

/// Line-item table used by the end-to-end scenarios
pub const SAMPLE_SKUS_CSV: &str = "\
SKU ID,SKU Name,Supplier Name,Order Quantity,Total Cost
1,Widget,S1,10,40
1,Widget,S2,5,25
2,Gadget,S1,2,60
";

/// Supplier table used by the end-to-end scenarios
pub const SAMPLE_SUPPLIERS_CSV: &str = "\
Supplier Name,Procurement Cost,Shipping Cost,Total Cost,Number Containers,Container Utilization
S1,100,20,120,3,0.75
S2,50,10,60,1,0.5
";

/// Container table; loaded but never aggregated
pub const SAMPLE_CONTAINERS_CSV: &str = "\
Container ID,Supplier Name,Volume
C-1,S1,67.7
C-2,S2,33.2
";

/// Shared aggregator over the sample rows
pub static SAMPLE_AGGREGATOR: Lazy<Aggregator> =
    Lazy::new(|| Aggregator::new(Arc::new(sample_dataset())));

/// Builder for SKU line items
pub struct LineItemBuilder {
    sku_id: u32,
    sku_name: String,
    supplier_name: String,
    order_quantity: f64,
    total_cost: f64,
}

impl LineItemBuilder {
    pub fn new(sku_id: u32, sku_name: &str) -> Self {
        Self {
            sku_id,
            sku_name: sku_name.to_string(),
            supplier_name: "S1".to_string(),
            order_quantity: 1.0,
            total_cost: 0.0,
        }
    }

    pub fn supplier(mut self, name: &str) -> Self {
        self.supplier_name = name.to_string();
        self
    }

    pub fn quantity(mut self, quantity: f64) -> Self {
        self.order_quantity = quantity;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.total_cost = cost;
        self
    }

    pub fn build(self) -> SkuLineItem {
        SkuLineItem {
            sku_id: SkuId::new(self.sku_id),
            sku_name: SkuName::new(self.sku_name),
            supplier_name: SupplierName::new(self.supplier_name),
            order_quantity: self.order_quantity,
            total_cost: self.total_cost,
        }
    }
}

/// Supplier row whose total is procurement plus shipping
pub fn supplier(
    name: &str,
    procurement: f64,
    shipping: f64,
    containers: u64,
    utilization: f64,
) -> SupplierSummary {
    SupplierSummary {
        supplier_name: SupplierName::new(name),
        procurement_cost: procurement,
        shipping_cost: shipping,
        total_cost: procurement + shipping,
        number_containers: containers,
        container_utilization: utilization,
    }
}

/// In-memory equivalent of the sample CSV tables
pub fn sample_dataset() -> Dataset {
    Dataset::new(
        vec![
            LineItemBuilder::new(1, "Widget").supplier("S1").quantity(10.0).cost(40.0).build(),
            LineItemBuilder::new(1, "Widget").supplier("S2").quantity(5.0).cost(25.0).build(),
            LineItemBuilder::new(2, "Gadget").supplier("S1").quantity(2.0).cost(60.0).build(),
        ],
        vec![
            supplier("S1", 100.0, 20.0, 3, 0.75),
            supplier("S2", 50.0, 10.0, 1, 0.5),
        ],
        vec![],
    )
}

/// Write the three tables into a fresh temporary directory
pub async fn write_tables(skus: &str, suppliers: &str, containers: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(SKU_TABLE), skus).await.unwrap();
    fs::write(dir.path().join(SUPPLIER_TABLE), suppliers)
        .await
        .unwrap();
    fs::write(dir.path().join(CONTAINER_TABLE), containers)
        .await
        .unwrap();
    dir
}

/// Write the sample tables into a fresh temporary directory
pub async fn write_sample_tables() -> TempDir {
    write_tables(SAMPLE_SKUS_CSV, SAMPLE_SUPPLIERS_CSV, SAMPLE_CONTAINERS_CSV).await
}

/// Assert two floats agree to within rounding noise
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
