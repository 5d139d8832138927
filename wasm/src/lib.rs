//! WebAssembly module for Bloom Watch
//!
//! Provides client-side computation for:
//! - Bloom scoring from climate metrics and NDVI
//! - Climate metrics over a daily series
//! - Date formatting for provider requests

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

/// Calculate the bloom score from current and historical metrics JSON
#[wasm_bindgen]
pub fn calculate_bloom_score(
    current_json: &str,
    historical_json: &str,
    avg_ndvi: Option<f64>,
) -> Result<u32, JsValue> {
    let current: ClimateMetrics = serde_json::from_str(current_json)
        .map_err(|e| js_error("Invalid current metrics JSON", e))?;
    let historical: ClimateMetrics = serde_json::from_str(historical_json)
        .map_err(|e| js_error("Invalid historical metrics JSON", e))?;

    Ok(shared::calculate_bloom_score(&current, &historical, avg_ndvi))
}

/// Bloom status label for a score
#[wasm_bindgen]
pub fn bloom_status_for_score(score: u32) -> String {
    format!("{}", verdict_for_score(score).status)
}

/// Confidence (0-100) reported for a score
#[wasm_bindgen]
pub fn bloom_confidence_for_score(score: u32) -> u32 {
    verdict_for_score(score).confidence.min(MAX_CONFIDENCE)
}

/// Compute climate metrics for a daily series given as JSON
#[wasm_bindgen]
pub fn calculate_climate_metrics_json(series_json: &str) -> Result<String, JsValue> {
    let series: ClimateSeries = serde_json::from_str(series_json)
        .map_err(|e| js_error("Invalid climate series JSON", e))?;

    serde_json::to_string(&calculate_climate_metrics(&series))
        .map_err(|e| js_error("Failed to encode metrics", e))
}

/// Reformat a `YYYY-MM-DD` date as `MM/DD/YYYY`
#[wasm_bindgen]
pub fn format_date_mdy(date: &str) -> Result<String, JsValue> {
    let parsed = parse_query_date("date", date).map_err(|e| js_error("Invalid date", e))?;
    Ok(format_mdy(parsed))
}

fn format_mdy(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}
