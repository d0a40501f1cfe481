//! Sidebar filter options
//!
//! Option lists come from the joined table itself, so every value a user
//! can pick is guaranteed to exist.

use axum::{extract::State, Json};

use olist_common::pipeline::{filter_options, FilterOptions};

use super::error::ApiError;
use crate::AppState;

/// GET /api/filters
///
/// States and categories (both sorted) plus the number of rows with no
/// category, which no selection can include.
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, ApiError> {
    let dataset = state.cache.get_or_load()?;
    Ok(Json(filter_options(&dataset)))
}
