//! Species observations endpoint

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use shared::{DataSource, ObservationRecord};

use super::parse_location_request;
use crate::error::AppResult;
use crate::services::BloomService;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ObservationsResponse {
    pub success: bool,
    pub source: DataSource,
    pub count: usize,
    pub observations: Vec<ObservationRecord>,
}

/// Get species observations around a location
pub async fn get_observations(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ObservationsResponse>> {
    let request = parse_location_request(&body)?;
    let radius = request.radius;
    let query = request.into_query()?;
    let service = BloomService::new(state.providers.clone(), state.config.observations.radius_km);

    let batch = service
        .observations_or_fallback(&query.location.point, radius, &query.date_range)
        .await;

    Ok(Json(ObservationsResponse {
        success: true,
        source: batch.source,
        count: batch.records.len(),
        observations: batch.records,
    }))
}
