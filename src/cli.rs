//! CLI interface for supplystat
//!
//! This module defines the command-line interface using clap. Each
//! aggregator has its own subcommand, `report` runs all three for one
//! selection, and running without a subcommand is the same as `report`
//! with no filters.
//!
//! Selection flags distinguish "no filter" from "filter to nothing":
//! leaving `--sku` out keeps every SKU, while `--sku` given with no value
//! selects none of them.
//!
//! # Example
//!
//! ```bash
//! # Costs for two suppliers
//! supplystat costs --supplier "Denim Works" --supplier "Blue Cotton"
//!
//! # Full report for one SKU, as JSON
//! supplystat --json report --sku "Slim Fit Jeans"
//!
//! # Serve selections over stdio
//! supplystat --data-dir ./data serve
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use supplystat_core::selection::{Filter, Selection};

/// Selection-driven procurement and container metrics
#[derive(Parser, Debug, Clone)]
#[command(name = "supplystat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory containing skus_suppliers.csv, suppliers.csv and containers.csv
    #[arg(long, global = true, env = "SUPPLYSTAT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// SKU and supplier filters shared by the selection-aware commands
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionArgs {
    /// Keep only these SKU names (repeatable); give the flag alone to select none
    #[arg(long = "sku", num_args = 0..)]
    pub skus: Option<Vec<String>>,

    /// Keep only these supplier names (repeatable, commas are part of the name);
    /// give the flag alone to select none
    #[arg(long = "supplier", num_args = 0..)]
    pub suppliers: Option<Vec<String>>,
}

impl SelectionArgs {
    /// Convert the parsed flags into a [`Selection`]
    pub fn to_selection(&self) -> Selection {
        Selection {
            skus: to_filter(self.skus.as_deref()),
            suppliers: to_filter(self.suppliers.as_deref()),
        }
    }
}

fn to_filter<T>(names: Option<&[String]>) -> Filter<T>
where
    T: Ord + for<'a> From<&'a str>,
{
    match names {
        Some(names) => Filter::only(names.iter().map(String::as_str)),
        None => Filter::Unfiltered,
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Costs, breakdown and utilization for one selection
    Report(SelectionArgs),

    /// Procurement, shipping and total cost plus container count
    Costs(SelectionArgs),

    /// Order quantity and cost per SKU and supplier
    Breakdown(SelectionArgs),

    /// Container utilization per supplier (ignores selections)
    Utilization,

    /// List the selectable SKU and supplier names
    Options,

    /// Answer line-delimited JSON requests on stdin
    Serve,
}

/// The command to run, with a bare invocation meaning an unfiltered report
pub fn resolve_command(command: Option<Command>) -> Command {
    command.unwrap_or_else(|| Command::Report(SelectionArgs::default()))
}
