//! HTTP handlers

pub mod bloom;
pub mod health;
pub mod ndvi;
pub mod observations;
pub mod regions;

pub use bloom::bloom_status;
pub use health::health_check;
pub use ndvi::get_ndvi;
pub use observations::get_observations;
pub use regions::{get_region, list_regions};

use axum::body::Bytes;
use shared::LocationRequest;

use crate::error::{AppError, AppResult};

/// Parse a location request body
///
/// Bodies are taken as raw bytes so malformed JSON is reported in the same
/// shape as every other request error.
pub(crate) fn parse_location_request(body: &Bytes) -> AppResult<LocationRequest> {
    serde_json::from_slice(body).map_err(|e| AppError::InvalidBody(e.to_string()))
}
