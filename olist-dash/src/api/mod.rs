//! HTTP API handlers for olist-dash

pub mod buildinfo;
pub mod dashboard;
pub mod diagnostics;
pub mod error;
pub mod filters;
pub mod health;
pub mod ui;

pub use buildinfo::get_build_info;
pub use dashboard::{get_dashboard, post_dashboard};
pub use diagnostics::get_diagnostics;
pub use error::ApiError;
pub use filters::get_filter_options;
pub use health::health_routes;
pub use ui::{serve_app_js, serve_index};
