//! Data loader module for discovering and parsing the CSV tables
//!
//! # Directory discovery
//!
//! The data directory is resolved in this order:
//! 1. an explicit path (the `--data-dir` flag or `SUPPLYSTAT_DATA_DIR`);
//! 2. `./data` relative to the working directory;
//! 3. `<platform data dir>/supplystat`, e.g. `~/.local/share/supplystat`.
//!
//! # Validation
//!
//! Rows are validated as they are read, and the first bad row aborts the
//! load with an error naming its file and line. Costs and quantities must be
//! non-negative, utilization must lie in `[0, 1]`, SKU IDs start at 1 and
//! map one-to-one onto SKU names, and supplier names in the
//! supplier table must be unique.
//!
//! # Examples
//!
//! ```no_run
//! use supplystat_core::provider::DataSource;
//! use supplystat_csv::CsvDataSource;
//!
//! # async fn example() -> supplystat_core::Result<()> {
//! let source = CsvDataSource::discover(None).await?;
//! let dataset = source.load().await?;
//! println!("{} suppliers", dataset.suppliers().len());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use csv::StringRecord;
use supplystat_core::dataset::{ContainerRecord, Dataset, SkuLineItem, SupplierSummary};
use supplystat_core::error::{Result, SupplystatError};
use supplystat_core::provider::DataSource;
use supplystat_core::types::{SkuId, SkuName, SupplierName};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// SKU line-item table file name
pub const SKU_TABLE: &str = "skus_suppliers.csv";
/// Supplier summary table file name
pub const SUPPLIER_TABLE: &str = "suppliers.csv";
/// Container table file name
pub const CONTAINER_TABLE: &str = "containers.csv";

const SKU_COLUMNS: &[&str] = &[
    "SKU ID",
    "SKU Name",
    "Supplier Name",
    "Order Quantity",
    "Total Cost",
];

const SUPPLIER_COLUMNS: &[&str] = &[
    "Supplier Name",
    "Procurement Cost",
    "Shipping Cost",
    "Total Cost",
    "Number Containers",
    "Container Utilization",
];

/// Loads the three tables from one directory
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    data_dir: PathBuf,
}

impl CsvDataSource {
    /// Create a data source reading from `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if an explicit directory does not exist and
    /// `DataDirectoryNotFound` if no default location exists either.
    pub async fn discover(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_dir() {
                return Err(SupplystatError::InvalidArgument(format!(
                    "data directory {} does not exist",
                    path.display()
                )));
            }
            return Ok(Self::new(path));
        }

        let mut candidates = vec![PathBuf::from("data")];
        if let Some(data_dir) = dirs::data_dir() {
            candidates.push(data_dir.join("supplystat"));
        }

        for candidate in candidates {
            if candidate.is_dir() {
                debug!("Using data directory {}", candidate.display());
                return Ok(Self::new(candidate));
            }
        }

        Err(SupplystatError::DataDirectoryNotFound)
    }

    /// The directory tables are read from
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_table(&self, name: &str) -> Result<(PathBuf, String)> {
        let path = self.data_dir.join(name);
        if !path.is_file() {
            return Err(SupplystatError::MissingTable(path));
        }
        let contents = tokio::fs::read_to_string(&path).await?;
        Ok((path, contents))
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn load(&self) -> Result<Dataset> {
        let (skus, suppliers, containers) = tokio::try_join!(
            self.read_table(SKU_TABLE),
            self.read_table(SUPPLIER_TABLE),
            self.read_table(CONTAINER_TABLE),
        )?;

        let skus = parse_sku_line_items(&skus.0, &skus.1)?;
        let suppliers = parse_supplier_summaries(&suppliers.0, &suppliers.1)?;
        let containers = parse_containers(&containers.0, &containers.1)?;

        let known: HashSet<&SupplierName> = suppliers.iter().map(|s| &s.supplier_name).collect();
        for item in skus.iter().filter(|item| !known.contains(&item.supplier_name)) {
            debug!(
                "Line item {} references unknown supplier {}",
                item.sku_name, item.supplier_name
            );
        }

        for container in &containers {
            if let Some(name) = container.get("Supplier Name") {
                if !known.contains(&SupplierName::new(name)) {
                    debug!("Container references unknown supplier {}", name);
                }
            }
        }

        info!(
            "Loaded {} line items, {} suppliers, {} containers from {}",
            skus.len(),
            suppliers.len(),
            containers.len(),
            self.data_dir.display()
        );

        Ok(Dataset::new(skus, suppliers, containers))
    }
}

fn reader(contents: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes())
}

fn invalid(file: &Path, line: u64, error: impl Into<String>) -> SupplystatError {
    SupplystatError::InvalidRecord {
        file: file.to_path_buf(),
        line,
        error: error.into(),
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |position| position.line())
}

fn ensure_columns(file: &Path, headers: &StringRecord, required: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(invalid(
            file,
            1,
            format!("missing column(s): {}", missing.join(", ")),
        ))
    }
}

fn non_negative(column: &str, value: f64) -> std::result::Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{column} must be a non-negative number, got {value}"))
    }
}

/// Parse and validate `skus_suppliers.csv`
pub fn parse_sku_line_items(file: &Path, contents: &str) -> Result<Vec<SkuLineItem>> {
    let mut reader = reader(contents);
    let headers = reader.headers()?.clone();
    ensure_columns(file, &headers, SKU_COLUMNS)?;

    let mut items = Vec::new();
    let mut ids: HashMap<SkuName, SkuId> = HashMap::new();
    let mut names: HashMap<SkuId, SkuName> = HashMap::new();
    let mut seen: HashSet<(SkuName, SupplierName)> = HashSet::new();

    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        let item: SkuLineItem = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid(file, line, e.to_string()))?;

        if item.sku_id.get() == 0 {
            return Err(invalid(file, line, "SKU ID must start at 1"));
        }
        non_negative("Order Quantity", item.order_quantity).map_err(|e| invalid(file, line, e))?;
        non_negative("Total Cost", item.total_cost).map_err(|e| invalid(file, line, e))?;

        match ids.get(&item.sku_name) {
            Some(existing) if *existing != item.sku_id => {
                return Err(invalid(
                    file,
                    line,
                    format!(
                        "SKU {} has ID {} but was first seen with ID {}",
                        item.sku_name, item.sku_id, existing
                    ),
                ));
            }
            Some(_) => {}
            None => {
                ids.insert(item.sku_name.clone(), item.sku_id);
            }
        }

        match names.get(&item.sku_id) {
            Some(existing) if *existing != item.sku_name => {
                return Err(invalid(
                    file,
                    line,
                    format!(
                        "SKU ID {} is named {} but was first seen as {}",
                        item.sku_id, item.sku_name, existing
                    ),
                ));
            }
            Some(_) => {}
            None => {
                names.insert(item.sku_id, item.sku_name.clone());
            }
        }

        if !seen.insert((item.sku_name.clone(), item.supplier_name.clone())) {
            warn!(
                "Duplicate line item for SKU {} from {} at {}:{}",
                item.sku_name,
                item.supplier_name,
                file.display(),
                line
            );
        }

        items.push(item);
    }

    Ok(items)
}

/// Parse and validate `suppliers.csv`
pub fn parse_supplier_summaries(file: &Path, contents: &str) -> Result<Vec<SupplierSummary>> {
    let mut reader = reader(contents);
    let headers = reader.headers()?.clone();
    ensure_columns(file, &headers, SUPPLIER_COLUMNS)?;

    let mut suppliers = Vec::new();
    let mut names: HashSet<SupplierName> = HashSet::new();

    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        let supplier: SupplierSummary = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid(file, line, e.to_string()))?;

        for (column, value) in [
            ("Procurement Cost", supplier.procurement_cost),
            ("Shipping Cost", supplier.shipping_cost),
            ("Total Cost", supplier.total_cost),
        ] {
            non_negative(column, value).map_err(|e| invalid(file, line, e))?;
        }

        let utilization = supplier.container_utilization;
        if !(0.0..=1.0).contains(&utilization) {
            return Err(invalid(
                file,
                line,
                format!("Container Utilization must be within [0, 1], got {utilization}"),
            ));
        }

        if !names.insert(supplier.supplier_name.clone()) {
            return Err(invalid(
                file,
                line,
                format!("duplicate supplier {}", supplier.supplier_name),
            ));
        }

        suppliers.push(supplier);
    }

    Ok(suppliers)
}

/// Parse `containers.csv` without imposing a schema
pub fn parse_containers(_file: &Path, contents: &str) -> Result<Vec<ContainerRecord>> {
    let mut reader = reader(contents);
    let headers = reader.headers()?.clone();

    let mut containers = Vec::new();
    for result in reader.records() {
        let record = result?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        containers.push(ContainerRecord::new(fields));
    }

    Ok(containers)
}
