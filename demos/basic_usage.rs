//! Basic usage example for supplystat library
//!
//! This example loads the CSV tables and walks through a few selections the
//! way a user drilling into the data would.

use std::sync::Arc;
use supplystat::{Result, aggregation::Aggregator, selection::Selection};
use supplystat_core::provider::DataSource;
use supplystat_csv::CsvDataSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Uses ./data or the platform data directory
    let source = CsvDataSource::discover(None).await?;
    println!("Loading tables from {}", source.data_dir().display());

    let dataset = Arc::new(source.load().await?);
    let aggregator = Aggregator::new(Arc::clone(&dataset));
    let options = dataset.options();

    println!("\nCosts (all suppliers):");
    println!("======================");
    let costs = aggregator.costs(&Selection::new());
    println!("Procurement: ${:.1}k", costs.procurement);
    if let (Some(shipping), Some(total)) = (costs.shipping, costs.total) {
        println!("Shipping:    ${shipping:.1}k");
        println!("Total:       ${total:.1}k");
    }

    // Drill into the first supplier
    if let Some(first) = options.suppliers.first() {
        let selection = Selection::new().with_suppliers([first.clone()]);
        let breakdown = aggregator.breakdown(&selection);

        println!("\nSKUs ordered from {first}:");
        for series in &breakdown.series {
            let quantity: f64 = series.quantities.values().sum();
            println!("  {} (#{}): {quantity:.0} units", series.sku_name, series.sku_id);
        }
    }

    println!("\nContainer utilization:");
    for row in aggregator.utilization() {
        println!("  {:<24} {:>5.1}%", row.supplier.as_str(), row.utilization * 100.0);
    }

    Ok(())
}
