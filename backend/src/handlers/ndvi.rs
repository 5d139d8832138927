//! NDVI time series endpoint used by the trends page

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use shared::{DataSource, VegetationSample};

use super::parse_location_request;
use crate::error::AppResult;
use crate::services::BloomService;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct NdviResponse {
    pub success: bool,
    pub source: DataSource,
    pub data: Vec<VegetationSample>,
}

/// Get the NDVI series for a location, live when possible
pub async fn get_ndvi(State(state): State<AppState>, body: Bytes) -> AppResult<Json<NdviResponse>> {
    let query = parse_location_request(&body)?.into_query()?;
    let service = BloomService::new(state.providers.clone(), state.config.observations.radius_km);

    let series = service
        .vegetation_or_fallback(&query.location.point, &query.date_range)
        .await;

    Ok(Json(NdviResponse {
        success: true,
        source: series.source,
        data: series.samples,
    }))
}
