//! Featured bloom regions for the map page

use axum::{
    extract::{Path, State},
    Json,
};
use shared::FeaturedRegion;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all featured regions
pub async fn list_regions(State(state): State<AppState>) -> Json<Vec<FeaturedRegion>> {
    Json(state.regions.all().to_vec())
}

/// Get a featured region by country name
pub async fn get_region(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> AppResult<Json<FeaturedRegion>> {
    state
        .regions
        .find(&country)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Region {}", country)))
}
