//! Aggregation result types for supplystat
//!
//! Fixed-shape records returned by the aggregators. An unavailable metric is
//! `None` (JSON `null`), never zero.

use crate::selection::Selection;
use crate::types::{SkuId, SkuName, SupplierName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which table answered a cost query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostSource {
    /// Per-supplier summary table, full cost breakdown available
    SupplierSummary,
    /// SKU line-item table, only the combined line cost is available
    SkuLineItems,
}

/// Headline cost numbers
///
/// Costs are in thousands of currency units. The container count is a plain
/// count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Procurement cost; always computable
    pub procurement: f64,
    /// Shipping cost, unavailable once a SKU filter is active
    pub shipping: Option<f64>,
    /// Total cost, unavailable once a SKU filter is active
    pub total: Option<f64>,
    /// Number of containers, unavailable once a SKU filter is active
    pub containers: Option<u64>,
    /// Table the numbers were taken from
    pub source: CostSource,
}

/// Per-supplier quantities and costs for one SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuSeries {
    /// Stable display identity
    pub sku_id: SkuId,
    pub sku_name: SkuName,
    /// Order quantity per supplier
    pub quantities: BTreeMap<SupplierName, f64>,
    /// Line cost per supplier, in currency units
    pub costs: BTreeMap<SupplierName, f64>,
}

/// Quantity and cost summed over every visible SKU of one supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierTotals {
    pub supplier: SupplierName,
    pub order_quantity: f64,
    pub total_cost: f64,
}

/// Quantity/cost breakdown by SKU and supplier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    /// One series per SKU, in order of first appearance
    pub series: Vec<SkuSeries>,
    /// One entry per supplier, sorted by name
    pub supplier_totals: Vec<SupplierTotals>,
}

impl Breakdown {
    /// Whether no rows survived filtering
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Every `(SKU, supplier)` cell present in the breakdown
    pub fn pairs(&self) -> Vec<(&SkuName, &SupplierName)> {
        self.series
            .iter()
            .flat_map(|series| {
                series
                    .quantities
                    .keys()
                    .map(move |supplier| (&series.sku_name, supplier))
            })
            .collect()
    }
}

/// Container utilization of one supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierUtilization {
    pub supplier: SupplierName,
    /// Ratio in `[0, 1]`
    pub utilization: f64,
}

/// Everything one interaction produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The selection the report was computed for
    pub selection: Selection,
    pub costs: CostSummary,
    pub breakdown: Breakdown,
    pub utilization: Vec<SupplierUtilization>,
}
