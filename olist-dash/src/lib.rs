//! olist-dash library - Sales dashboard service
//!
//! Serves a single-page dashboard over the Olist e-commerce dataset. The
//! raw tables are loaded once into a `DatasetCache`; every filter change
//! re-runs the pipeline against that cache.

use axum::Router;
use olist_common::DatasetCache;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Raw tables, loaded once per process
    pub cache: Arc<DatasetCache>,
}

impl AppState {
    /// Create new application state
    pub fn new(cache: Arc<DatasetCache>) -> Self {
        Self { cache }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/filters", get(api::get_filter_options))
        .route(
            "/api/dashboard",
            get(api::get_dashboard).post(api::post_dashboard),
        )
        .route("/api/diagnostics", get(api::get_diagnostics));

    let ui = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(ui)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
