//! Output formatting module for supplystat
//!
//! This module provides formatters for the aggregation results:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! Unavailable metrics are rendered as blank cells in tables and as `null`
//! in JSON, never as zero.
//!
//! # Examples
//!
//! ```
//! use supplystat::output::get_formatter;
//! use supplystat_core::aggregation_types::{CostSource, CostSummary};
//!
//! let costs = CostSummary {
//!     procurement: 1_250.0,
//!     shipping: None,
//!     total: None,
//!     containers: None,
//!     source: CostSource::SkuLineItems,
//! };
//!
//! // Get table formatter for human-readable output
//! let formatter = get_formatter(false, false);
//! println!("{}", formatter.format_costs(&costs));
//!
//! // Get JSON formatter for machine-readable output
//! let json_formatter = get_formatter(true, false);
//! assert!(json_formatter.format_costs(&costs).contains("\"shipping\": null"));
//! ```

use colored::{Color, Colorize};
use prettytable::{Cell, Row, Table, format, row};
use serde::Serialize;
use supplystat_core::aggregation_types::{Breakdown, CostSummary, Report, SupplierUtilization};
use supplystat_core::dataset::SelectionOptions;
use supplystat_core::types::SkuId;

/// Fixed series palette, indexed by [`SkuId::palette_slot`]
pub const PALETTE: [Color; 9] = [
    Color::TrueColor { r: 251, g: 180, b: 174 },
    Color::TrueColor { r: 179, g: 205, b: 227 },
    Color::TrueColor { r: 204, g: 235, b: 197 },
    Color::TrueColor { r: 222, g: 203, b: 228 },
    Color::TrueColor { r: 254, g: 217, b: 166 },
    Color::TrueColor { r: 255, g: 255, b: 204 },
    Color::TrueColor { r: 229, g: 216, b: 189 },
    Color::TrueColor { r: 253, g: 218, b: 236 },
    Color::TrueColor { r: 242, g: 242, b: 242 },
];

/// Palette colour for a SKU series
pub fn series_color(sku_id: SkuId) -> Color {
    PALETTE[sku_id.palette_slot(PALETTE.len())]
}

/// Trait for output formatters
///
/// # Example Implementation
///
/// ```
/// use supplystat::output::OutputFormatter;
/// use supplystat_core::aggregation_types::{Breakdown, CostSummary, Report, SupplierUtilization};
/// use supplystat_core::dataset::SelectionOptions;
///
/// struct CountFormatter;
///
/// impl OutputFormatter for CountFormatter {
///     fn format_costs(&self, costs: &CostSummary) -> String {
///         format!("procurement: {}", costs.procurement)
///     }
///
///     fn format_breakdown(&self, breakdown: &Breakdown) -> String {
///         format!("{} series", breakdown.series.len())
///     }
///
///     fn format_utilization(&self, data: &[SupplierUtilization]) -> String {
///         format!("{} suppliers", data.len())
///     }
///
///     fn format_report(&self, report: &Report) -> String {
///         self.format_costs(&report.costs)
///     }
///
///     fn format_options(&self, options: &SelectionOptions) -> String {
///         format!("{} skus", options.skus.len())
///     }
/// }
/// ```
pub trait OutputFormatter {
    /// Format the headline cost numbers
    fn format_costs(&self, costs: &CostSummary) -> String;

    /// Format the per-SKU / per-supplier breakdown
    fn format_breakdown(&self, breakdown: &Breakdown) -> String;

    /// Format container utilization per supplier
    fn format_utilization(&self, data: &[SupplierUtilization]) -> String;

    /// Format all three results of one interaction
    fn format_report(&self, report: &Report) -> String;

    /// Format the selectable SKU and supplier names
    fn format_options(&self, options: &SelectionOptions) -> String;
}

/// Table formatter for human-readable output
///
/// Costs in thousands are shown as `$1,234k`; raw costs as `$1,234`.
pub struct TableFormatter {
    /// Whether to paint SKU names in their palette colour
    pub colored_output: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(colored_output: bool) -> Self {
        Self { colored_output }
    }

    /// Format a number with thousands separators
    fn format_number(n: u64) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    /// Round a non-negative amount and add separators
    fn format_amount(amount: f64) -> String {
        Self::format_number(amount.max(0.0).round() as u64)
    }

    /// Format a raw currency amount
    fn format_currency(amount: f64) -> String {
        format!("${}", Self::format_amount(amount))
    }

    /// Format an amount already expressed in thousands
    fn format_thousands(amount: Option<f64>) -> String {
        amount
            .map(|value| format!("${}k", Self::format_amount(value)))
            .unwrap_or_default()
    }

    fn paint_sku(&self, sku_id: SkuId, name: &str) -> String {
        if self.colored_output {
            name.color(series_color(sku_id)).to_string()
        } else {
            name.to_string()
        }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_costs(&self, costs: &CostSummary) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "Total cost",
            b -> "Shipping cost",
            b -> "Procurement cost",
            b -> "No. of Containers"
        ]);

        table.add_row(row![
            r -> Self::format_thousands(costs.total),
            r -> Self::format_thousands(costs.shipping),
            r -> Self::format_thousands(Some(costs.procurement)),
            r -> costs.containers.map(Self::format_number).unwrap_or_default()
        ]);

        table.to_string()
    }

    fn format_breakdown(&self, breakdown: &Breakdown) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![
            b -> "SKU",
            b -> "Supplier",
            b -> "Quantity",
            b -> "Cost"
        ]);

        for series in &breakdown.series {
            let name = self.paint_sku(series.sku_id, series.sku_name.as_str());
            for (supplier, quantity) in &series.quantities {
                let cost = series.costs.get(supplier).copied().unwrap_or_default();
                table.add_row(row![
                    name,
                    supplier.as_str(),
                    r -> Self::format_amount(*quantity),
                    r -> Self::format_currency(cost)
                ]);
            }
        }

        // Add separator
        table.add_row(Row::new(vec![Cell::new(""); 4]));

        for totals in &breakdown.supplier_totals {
            table.add_row(row![
                b -> "TOTAL",
                b -> totals.supplier.as_str(),
                b -> Self::format_amount(totals.order_quantity),
                b -> Self::format_currency(totals.total_cost)
            ]);
        }

        table.to_string()
    }

    fn format_utilization(&self, data: &[SupplierUtilization]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![b -> "Supplier", b -> "Container Utilization"]);

        for entry in data {
            table.add_row(row![
                entry.supplier.as_str(),
                r -> format!("{:.2}", entry.utilization)
            ]);
        }

        table.to_string()
    }

    fn format_report(&self, report: &Report) -> String {
        let mut output = String::new();

        output.push_str("Costs\n");
        output.push_str(&self.format_costs(&report.costs));
        if report.selection.scope().has_sku_filter() {
            output.push_str("Shipping, total and containers are not tracked per SKU\n");
        }
        output.push_str("\nQuantity and Cost per SKU per Supplier\n");
        output.push_str(&self.format_breakdown(&report.breakdown));
        output.push_str("\nContainer Utilization per Supplier\n");
        output.push_str(&self.format_utilization(&report.utilization));

        output
    }

    fn format_options(&self, options: &SelectionOptions) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        table.set_titles(row![b -> "SKU Name", b -> "Supplier Name"]);

        let rows = options.skus.len().max(options.suppliers.len());
        for i in 0..rows {
            table.add_row(row![
                options.skus.get(i).map(|s| s.as_str()).unwrap_or(""),
                options.suppliers.get(i).map(|s| s.as_str()).unwrap_or("")
            ]);
        }

        table.to_string()
    }
}

/// JSON formatter for machine-readable output
///
/// Emits the result records as they serialize, so the shape matches the
/// request server's responses.
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_costs(&self, costs: &CostSummary) -> String {
        Self::to_json(costs)
    }

    fn format_breakdown(&self, breakdown: &Breakdown) -> String {
        Self::to_json(breakdown)
    }

    fn format_utilization(&self, data: &[SupplierUtilization]) -> String {
        Self::to_json(&serde_json::json!({ "utilization": data }))
    }

    fn format_report(&self, report: &Report) -> String {
        Self::to_json(report)
    }

    fn format_options(&self, options: &SelectionOptions) -> String {
        Self::to_json(options)
    }
}

/// Factory function to get the appropriate formatter
pub fn get_formatter(json: bool, colored_output: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(colored_output))
    }
}
