//! Shared test utilities for unit tests
//!
//! Integration tests cannot see this module because it is `#[cfg(test)]`;
//! they keep their own builders in `tests/common/mod.rs`.

use crate::dataset::{Dataset, SkuLineItem, SupplierSummary};
use crate::types::{SkuId, SkuName, SupplierName};

/// Build a line item
pub fn line_item(id: u32, sku: &str, supplier: &str, quantity: f64, cost: f64) -> SkuLineItem {
    SkuLineItem {
        sku_id: SkuId::new(id),
        sku_name: SkuName::new(sku),
        supplier_name: SupplierName::new(supplier),
        order_quantity: quantity,
        total_cost: cost,
    }
}

/// Build a supplier summary
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

/// Two suppliers and three line items
pub fn sample_dataset() -> Dataset {
    Dataset::new(
        vec![
            line_item(1, "Widget", "S1", 10.0, 40.0),
            line_item(1, "Widget", "S2", 5.0, 25.0),
            line_item(2, "Gadget", "S1", 2.0, 60.0),
        ],
        vec![
            supplier("S1", 100.0, 20.0, 3, 0.75),
            supplier("S2", 50.0, 10.0, 1, 0.5),
        ],
        vec![],
    )
}
