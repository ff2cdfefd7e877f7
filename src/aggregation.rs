//! Aggregation module for selection-driven metrics
//!
//! This module turns a [`Selection`] and the immutable [`Dataset`] into the
//! three result records the presentation layer renders:
//!
//! - [`CostSummary`]: procurement, shipping, total cost and container count;
//! - [`Breakdown`]: order quantity and cost per SKU and supplier;
//! - [`SupplierUtilization`]: container utilization per supplier.
//!
//! # Source table policy
//!
//! The supplier table carries a full cost breakdown but no SKU granularity;
//! the line-item table carries SKU granularity but only one combined cost.
//! As long as no SKU filter is active, costs come from the supplier table
//! and every field is filled in. Once a SKU filter is active, costs come from
//! the line-item table: the summed line cost is reported as procurement and
//! shipping, total and containers become unavailable.
//!
//! Cost sums are reported in thousands; container counts are not scaled.
//!
//! # Examples
//!
//! ```no_run
//! use supplystat::aggregation::Aggregator;
//! use supplystat_core::{provider::DataSource, Selection};
//! use supplystat_csv::CsvDataSource;
//! use std::sync::Arc;
//!
//! # async fn example() -> supplystat::Result<()> {
//! let dataset = CsvDataSource::discover(None).await?.load().await?;
//! let aggregator = Aggregator::new(Arc::new(dataset));
//!
//! let selection = Selection::new().with_suppliers(["Denim Works"]);
//! let costs = aggregator.costs(&selection);
//! println!("procurement: {:.1}k", costs.procurement);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use supplystat_core::aggregation_types::{
    Breakdown, CostSource, CostSummary, Report, SkuSeries, SupplierTotals, SupplierUtilization,
};
use supplystat_core::dataset::{Dataset, SkuLineItem, SupplierSummary};
use supplystat_core::selection::{Selection, SelectionScope};
use supplystat_core::types::{SkuId, SupplierName};
use tracing::debug;

/// Divisor applied to every cost sum
pub const THOUSANDS: f64 = 1000.0;

/// Accumulator for supplier-table cost sums
#[derive(Default)]
struct SupplierCostAccumulator {
    rows: usize,
    procurement: f64,
    shipping: f64,
    total: f64,
    containers: u64,
}

impl SupplierCostAccumulator {
    fn add(&mut self, supplier: &SupplierSummary) {
        self.rows += 1;
        self.procurement += supplier.procurement_cost;
        self.shipping += supplier.shipping_cost;
        self.total += supplier.total_cost;
        self.containers += supplier.number_containers;
    }

    fn into_summary(self) -> CostSummary {
        CostSummary {
            procurement: self.procurement / THOUSANDS,
            shipping: Some(self.shipping / THOUSANDS),
            total: Some(self.total / THOUSANDS),
            containers: Some(self.containers),
            source: CostSource::SupplierSummary,
        }
    }
}

/// Accumulator for line-item cost sums
#[derive(Default)]
struct LineItemCostAccumulator {
    rows: usize,
    cost: f64,
}

impl LineItemCostAccumulator {
    fn add(&mut self, item: &SkuLineItem) {
        self.rows += 1;
        self.cost += item.total_cost;
    }

    fn into_summary(self) -> CostSummary {
        CostSummary {
            procurement: self.cost / THOUSANDS,
            shipping: None,
            total: None,
            containers: None,
            source: CostSource::SkuLineItems,
        }
    }
}

/// Accumulator for the per-SKU / per-supplier breakdown
#[derive(Default)]
struct BreakdownAccumulator {
    series: Vec<SkuSeries>,
    slots: HashMap<SkuId, usize>,
    totals: BTreeMap<SupplierName, SupplierTotals>,
}

impl BreakdownAccumulator {
    fn add(&mut self, item: &SkuLineItem) {
        let series = &mut self.series;
        let slot = *self.slots.entry(item.sku_id).or_insert_with(|| {
            series.push(SkuSeries {
                sku_id: item.sku_id,
                sku_name: item.sku_name.clone(),
                quantities: BTreeMap::new(),
                costs: BTreeMap::new(),
            });
            series.len() - 1
        });

        let entry = &mut self.series[slot];
        *entry
            .quantities
            .entry(item.supplier_name.clone())
            .or_insert(0.0) += item.order_quantity;
        *entry
            .costs
            .entry(item.supplier_name.clone())
            .or_insert(0.0) += item.total_cost;

        let totals = self
            .totals
            .entry(item.supplier_name.clone())
            .or_insert_with(|| SupplierTotals {
                supplier: item.supplier_name.clone(),
                order_quantity: 0.0,
                total_cost: 0.0,
            });
        totals.order_quantity += item.order_quantity;
        totals.total_cost += item.total_cost;
    }

    fn into_breakdown(self) -> Breakdown {
        Breakdown {
            series: self.series,
            supplier_totals: self.totals.into_values().collect(),
        }
    }
}

/// Runs the three aggregations against one shared dataset
///
/// The aggregator holds no state besides the dataset, so a single instance
/// can serve any number of selections, from any number of threads.
#[derive(Debug, Clone)]
pub struct Aggregator {
    dataset: Arc<Dataset>,
}

impl Aggregator {
    /// Create an aggregator over a loaded dataset
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// The dataset being aggregated
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Headline cost numbers for a selection
    pub fn costs(&self, selection: &Selection) -> CostSummary {
        Self::compute_costs(selection, self.dataset.suppliers(), self.dataset.skus())
    }

    /// Quantity/cost breakdown for a selection
    pub fn breakdown(&self, selection: &Selection) -> Breakdown {
        Self::compute_breakdown(selection, self.dataset.skus())
    }

    /// Container utilization per supplier
    pub fn utilization(&self) -> Vec<SupplierUtilization> {
        Self::compute_utilization(self.dataset.suppliers())
    }

    /// All three results for one interaction
    pub fn report(&self, selection: &Selection) -> Report {
        Report {
            selection: selection.clone(),
            costs: self.costs(selection),
            breakdown: self.breakdown(selection),
            utilization: self.utilization(),
        }
    }

    /// Compute headline costs from the two tables
    ///
    /// | supplier filter | SKU filter | source | shipping / total / containers |
    /// |---|---|---|---|
    /// | none | none | all suppliers | summed |
    /// | set | none | matching suppliers | summed |
    /// | none | set | matching line items | unavailable |
    /// | set | set | line items matching both | unavailable |
    pub fn compute_costs(
        selection: &Selection,
        suppliers: &[SupplierSummary],
        skus: &[SkuLineItem],
    ) -> CostSummary {
        let scope = selection.scope();

        match scope {
            SelectionScope::Everything => {
                let mut acc = SupplierCostAccumulator::default();
                suppliers.iter().for_each(|supplier| acc.add(supplier));
                debug!("Costs over {}: {} supplier rows", scope.label(), acc.rows);
                acc.into_summary()
            }
            SelectionScope::SuppliersOnly(names) => {
                let mut acc = SupplierCostAccumulator::default();
                suppliers
                    .iter()
                    .filter(|supplier| names.contains(&supplier.supplier_name))
                    .for_each(|supplier| acc.add(supplier));
                debug!("Costs over {}: {} supplier rows", scope.label(), acc.rows);
                acc.into_summary()
            }
            SelectionScope::SkusOnly(_) | SelectionScope::Both { .. } => {
                let mut acc = LineItemCostAccumulator::default();
                skus.iter()
                    .filter(|item| scope.matches(item))
                    .for_each(|item| acc.add(item));
                debug!("Costs over {}: {} line items", scope.label(), acc.rows);
                acc.into_summary()
            }
        }
    }

    /// Group the matching line items by SKU and by supplier
    ///
    /// Series keep the order in which each SKU ID first appears; supplier
    /// totals are sorted by supplier name. Costs here are not scaled.
    pub fn compute_breakdown(selection: &Selection, skus: &[SkuLineItem]) -> Breakdown {
        let scope = selection.scope();
        let mut acc = BreakdownAccumulator::default();

        skus.iter()
            .filter(|item| scope.matches(item))
            .for_each(|item| acc.add(item));

        let breakdown = acc.into_breakdown();
        debug!(
            "Breakdown over {}: {} series, {} suppliers",
            scope.label(),
            breakdown.series.len(),
            breakdown.supplier_totals.len()
        );
        breakdown
    }

    /// Project the supplier table onto utilization, in table order
    pub fn compute_utilization(suppliers: &[SupplierSummary]) -> Vec<SupplierUtilization> {
        suppliers
            .iter()
            .map(|supplier| SupplierUtilization {
                supplier: supplier.supplier_name.clone(),
                utilization: supplier.container_utilization,
            })
            .collect()
    }
}
