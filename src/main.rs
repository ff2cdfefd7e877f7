//! supplystat - Selection-driven procurement and container metrics

use clap::Parser;
use std::sync::Arc;
use supplystat::{
    aggregation::Aggregator,
    cli::{Cli, Command, resolve_command},
    dataset::Dataset,
    error::Result,
    output::get_formatter,
    selection::Selection,
    serve::RequestServer,
};
use supplystat_core::provider::DataSource;
use supplystat_csv::CsvDataSource;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Warn about selected names that match nothing in the loaded tables
fn warn_unknown_names(dataset: &Dataset, selection: &Selection) {
    let options = dataset.options();
    if let Some(skus) = selection.skus.as_set() {
        for sku in skus.iter().filter(|sku| !options.skus.contains(sku)) {
            warn!("Selected SKU '{}' does not appear in the data", sku);
        }
    }
    if let Some(suppliers) = selection.suppliers.as_set() {
        for supplier in suppliers
            .iter()
            .filter(|supplier| !options.suppliers.contains(supplier))
        {
            warn!("Selected supplier '{}' does not appear in the data", supplier);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Quiet by default; --verbose shows info, RUST_LOG overrides both.
    let default_level = if cli.verbose { "supplystat=info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr so stdout stays clean for tables, JSON and `serve`.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let use_color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && is_terminal::is_terminal(std::io::stdout());
    colored::control::set_override(use_color);

    let source = CsvDataSource::discover(cli.data_dir.clone()).await?;
    info!("Using data directory: {}", source.data_dir().display());
    let dataset = Arc::new(source.load().await?);
    let aggregator = Aggregator::new(Arc::clone(&dataset));

    let formatter = get_formatter(cli.json, use_color);

    match resolve_command(cli.command) {
        Command::Report(args) => {
            let selection = args.to_selection();
            warn_unknown_names(&dataset, &selection);
            info!("Running report for {}", selection.scope().label());
            let report = aggregator.report(&selection);
            println!("{}", formatter.format_report(&report));
        }
        Command::Costs(args) => {
            let selection = args.to_selection();
            warn_unknown_names(&dataset, &selection);
            let costs = aggregator.costs(&selection);
            println!("{}", formatter.format_costs(&costs));
        }
        Command::Breakdown(args) => {
            let selection = args.to_selection();
            warn_unknown_names(&dataset, &selection);
            let breakdown = aggregator.breakdown(&selection);
            println!("{}", formatter.format_breakdown(&breakdown));
        }
        Command::Utilization => {
            let utilization = aggregator.utilization();
            println!("{}", formatter.format_utilization(&utilization));
        }
        Command::Options => {
            println!("{}", formatter.format_options(&dataset.options()));
        }
        Command::Serve => {
            RequestServer::new(aggregator).run_stdio().await?;
        }
    }

    Ok(())
}
