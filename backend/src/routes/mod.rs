//! Route definitions for the Bloom Watch backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Bloom aggregation (always 200)
        .route("/bloom-status", post(handlers::bloom_status))
        // Trends page
        .route("/ndvi", post(handlers::get_ndvi))
        .route("/observations", post(handlers::get_observations))
        // Map page reference data
        .route("/regions", get(handlers::list_regions))
        .route("/regions/:name", get(handlers::get_region))
}
