//! Deployment troubleshooting: what the service can see on disk

use axum::{extract::State, Json};

use olist_common::diagnostics::{directory_report, DirectoryReport};

use super::error::ApiError;
use crate::AppState;

/// GET /api/diagnostics
///
/// Lists the working directory and the data directory. A missing data
/// directory is reported (`data_dir_exists: false`), not an error.
pub async fn get_diagnostics(
    State(state): State<AppState>,
) -> Result<Json<DirectoryReport>, ApiError> {
    let report = directory_report(state.cache.data_dir(), state.cache.source_files())?;
    Ok(Json(report))
}
