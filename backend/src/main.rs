//! Bloom Watch - Backend Server
//!
//! Aggregates climate, vegetation index and species observation providers
//! into a single bloom status answer for the map, trends and insights pages.

use axum::{routing::get, Router};
use shared::RegionCatalog;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;
use external::Providers;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub providers: Providers,
    pub regions: Arc<RegionCatalog>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloom_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Bloom Watch Server");
    tracing::info!("Environment: {}", config.environment);

    let providers = Providers::from_config(&config)?;
    if !providers.vegetation.is_configured() {
        tracing::warn!("No vegetation index endpoint configured, NDVI will be synthetic");
    }
    if !providers.species_text.is_configured() {
        tracing::warn!("No Gemini API key configured, species descriptions will be placeholders");
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        providers,
        regions: Arc::new(RegionCatalog::featured()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Bloom Watch API is running"
}
