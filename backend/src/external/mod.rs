//! External API integrations
//!
//! Each upstream data source sits behind a trait so the bloom pipeline can be
//! exercised against stub providers.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use shared::{ClimateSeries, DateRange, GeoPoint, ObservationRecord, VegetationSeries};

use crate::config::Config;

pub mod fetch;
pub mod gemini;
pub mod inaturalist;
pub mod nasa_power;
pub mod vegetation;

#[cfg(test)]
pub(crate) mod testing;

pub use fetch::{FetchError, FetchPolicy};
pub use gemini::GeminiClient;
pub use inaturalist::INaturalistClient;
pub use nasa_power::NasaPowerClient;
pub use vegetation::VegetationClient;

/// Daily temperature and precipitation for a point
#[async_trait]
pub trait ClimateProvider: Send + Sync {
    async fn daily_climate(
        &self,
        location: &GeoPoint,
        range: &DateRange,
    ) -> Result<ClimateSeries, FetchError>;
}

/// Monthly NDVI/EVI samples for a point
#[async_trait]
pub trait VegetationProvider: Send + Sync {
    async fn ndvi_series(
        &self,
        location: &GeoPoint,
        range: &DateRange,
    ) -> Result<VegetationSeries, FetchError>;

    /// False when the provider can only ever fail, e.g. no endpoint set
    fn is_configured(&self) -> bool {
        true
    }
}

/// Community species observations around a point
#[async_trait]
pub trait ObservationProvider: Send + Sync {
    async fn observations(
        &self,
        location: &GeoPoint,
        radius_km: f64,
        range: &DateRange,
    ) -> Result<Vec<ObservationRecord>, FetchError>;
}

/// Short natural-language plant descriptions
#[async_trait]
pub trait SpeciesDescriber: Send + Sync {
    async fn describe_species(&self, common_name: &str) -> Result<String, FetchError>;

    async fn describe_region(&self, point: &GeoPoint) -> Result<String, FetchError>;

    fn is_configured(&self) -> bool {
        true
    }
}

/// Provider handles shared by every request
#[derive(Clone)]
pub struct Providers {
    pub climate: Arc<dyn ClimateProvider>,
    pub vegetation: Arc<dyn VegetationProvider>,
    pub observations: Arc<dyn ObservationProvider>,
    pub species_text: Arc<dyn SpeciesDescriber>,
}

impl Providers {
    /// Build the live clients over one pooled HTTP client
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("bloom-watch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            climate: Arc::new(NasaPowerClient::new(
                client.clone(),
                config.climate.base_url.clone(),
                config.climate.policy(),
            )),
            vegetation: Arc::new(VegetationClient::new(
                client.clone(),
                config.vegetation.endpoint.clone(),
                config.vegetation.policy(),
            )),
            observations: Arc::new(INaturalistClient::new(
                client.clone(),
                config.observations.base_url.clone(),
                config.observations.per_page,
                config.observations.policy(),
            )),
            species_text: Arc::new(GeminiClient::new(
                client,
                config.species_text.base_url.clone(),
                config.species_text.model.clone(),
                config.species_text.api_key.clone(),
                config.species_text.policy(),
            )),
        })
    }
}
