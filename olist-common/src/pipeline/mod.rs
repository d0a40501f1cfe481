//! Join → filter → aggregate pipeline
//!
//! Stateless: every call recomputes everything from the raw tables.

pub mod aggregate;
pub mod filter;
pub mod join;

use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;
use tracing::debug;

use crate::model::Dataset;
use crate::Result;

pub use aggregate::{
    delivered_reviewed, delivery_vs_review, monthly_volume, top_sellers, DeliveryReview,
    MonthlyVolume, SellerSummary, TOP_SELLERS,
};
pub use filter::{apply_filters, FilterOptions, Selection};
pub use join::join_tables;

/// Everything one dashboard refresh produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub options: FilterOptions,
    pub joined_rows: usize,
    pub filtered_rows: usize,
    pub filtered_orders: usize,
    pub monthly_volume: Vec<MonthlyVolume>,
    /// (review score, delivery days) per delivered and reviewed row
    pub delivery_vs_review: Vec<(u8, i64)>,
    pub top_sellers: Vec<SellerSummary>,
}

/// Run one full refresh for `selection`
pub fn run_pipeline(dataset: &Dataset, selection: &Selection) -> Result<DashboardView> {
    let started = Instant::now();

    let joined = join_tables(dataset);
    let options = FilterOptions::from_rows(&joined);
    selection.validate(&options)?;
    let filtered = apply_filters(&joined, selection);

    let filtered_orders = filtered
        .iter()
        .map(|row| row.order_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let monthly = monthly_volume(&filtered);
    let pairs = delivered_reviewed(&filtered);
    let sellers = top_sellers(&pairs, TOP_SELLERS);

    debug!(
        "Pipeline: {} joined, {} filtered, {} delivered+reviewed ({:.1?})",
        joined.len(),
        filtered.len(),
        pairs.len(),
        started.elapsed()
    );

    Ok(DashboardView {
        selection: selection.clone(),
        options,
        joined_rows: joined.len(),
        filtered_rows: filtered.len(),
        filtered_orders,
        monthly_volume: monthly,
        delivery_vs_review: delivery_vs_review(&pairs),
        top_sellers: sellers,
    })
}

/// Filter option lists for the sidebar, without aggregating
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    FilterOptions::from_rows(&join_tables(dataset))
}
