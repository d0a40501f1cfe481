//! # Olist Common Library
//!
//! Shared code for the Olist sales dashboard:
//! - Source table models and CSV loading
//! - Process-lifetime dataset cache
//! - Join / filter / aggregate pipeline
//! - Configuration loading
//! - Timestamp and diagnostics utilities

pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod time;

pub use cache::{DatasetCache, DatasetVersion};
pub use error::{Error, Result};
pub use model::{Dataset, SaleRecord};
pub use pipeline::{run_pipeline, DashboardView, Selection};
