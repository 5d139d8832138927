//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub providers: ProviderStatus,
}

/// Whether optional providers are live or always served synthetically
#[derive(Serialize)]
pub struct ProviderStatus {
    pub vegetation: String,
    pub species_text: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = |configured: bool| {
        if configured {
            "live".to_string()
        } else {
            "fallback".to_string()
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: ProviderStatus {
            vegetation: mode(state.providers.vegetation.is_configured()),
            species_text: mode(state.providers.species_text.is_configured()),
        },
    })
}
