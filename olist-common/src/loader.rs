//! Source table loading
//!
//! Reads the six Olist CSV files from one directory. Any missing or
//! malformed file aborts the whole load; there are no partial datasets.

use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::model::Dataset;
use crate::{Error, Result};

/// File names of the six source tables inside the data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub orders: String,
    pub customers: String,
    pub items: String,
    pub products: String,
    pub reviews: String,
    pub sellers: String,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            orders: "olist_orders_dataset.csv".to_string(),
            customers: "olist_customers_dataset.csv".to_string(),
            items: "olist_order_items_dataset.csv".to_string(),
            products: "olist_products_dataset.csv".to_string(),
            reviews: "olist_order_reviews_dataset.csv".to_string(),
            sellers: "olist_sellers_dataset.csv".to_string(),
        }
    }
}

impl SourceFiles {
    /// All file names, in load order
    pub fn names(&self) -> [&str; 6] {
        [
            self.orders.as_str(),
            self.customers.as_str(),
            self.items.as_str(),
            self.products.as_str(),
            self.reviews.as_str(),
            self.sellers.as_str(),
        ]
    }
}

/// Load all six tables using the default Olist file names
pub fn load_dataset(dir: &Path) -> Result<Dataset> {
    load_dataset_with(dir, &SourceFiles::default())
}

/// Load all six tables from `dir`
///
/// Every file is checked for existence before anything is parsed, so a
/// missing table is reported without reading the (large) others first.
pub fn load_dataset_with(dir: &Path, files: &SourceFiles) -> Result<Dataset> {
    let started = Instant::now();

    for name in files.names() {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(Error::MissingSource(path));
        }
    }

    let dataset = Dataset {
        orders: read_table(&dir.join(&files.orders))?,
        customers: read_table(&dir.join(&files.customers))?,
        items: read_table(&dir.join(&files.items))?,
        products: read_table(&dir.join(&files.products))?,
        reviews: read_table(&dir.join(&files.reviews))?,
        sellers: read_table(&dir.join(&files.sellers))?,
    };

    let counts = dataset.counts();
    info!(
        "Loaded dataset from {}: {} orders, {} customers, {} items, {} products, {} reviews, {} sellers ({:.1?})",
        dir.display(),
        counts.orders,
        counts.customers,
        counts.items,
        counts.products,
        counts.reviews,
        counts.sellers,
        started.elapsed()
    );

    Ok(dataset)
}

/// Read one CSV table into typed records
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.is_file() {
        return Err(Error::MissingSource(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| Error::csv(path, e))?;

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| Error::csv(path, e))?;

    debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
