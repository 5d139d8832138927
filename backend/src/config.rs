//! Configuration management for the Bloom Watch backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with BLOOM_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::external::FetchPolicy;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// NASA POWER climate API
    pub climate: ClimateConfig,

    /// Vegetation index (NDVI) provider
    pub vegetation: VegetationConfig,

    /// iNaturalist observations API
    pub observations: ObservationsConfig,

    /// Gemini generative text API
    pub species_text: SpeciesTextConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClimateConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VegetationConfig {
    /// Point-sample endpoint; synthetic NDVI is served when unset
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservationsConfig {
    pub base_url: String,

    /// Default search radius when the request does not give one
    pub radius_km: f64,

    pub per_page: u32,
    pub timeout_secs: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpeciesTextConfig {
    pub base_url: String,
    pub model: String,

    /// Gemini API key; placeholder descriptions are used when unset
    pub api_key: Option<String>,

    pub timeout_secs: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("BLOOM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("climate.base_url", "https://power.larc.nasa.gov")?
            .set_default("climate.timeout_secs", 15)?
            .set_default("climate.retries", 2)?
            .set_default("climate.backoff_ms", 1000)?
            .set_default("vegetation.timeout_secs", 10)?
            .set_default("vegetation.retries", 3)?
            .set_default("vegetation.backoff_ms", 1000)?
            .set_default("observations.base_url", "https://api.inaturalist.org")?
            .set_default("observations.radius_km", 10.0)?
            .set_default("observations.per_page", 200)?
            .set_default("observations.timeout_secs", 10)?
            .set_default("observations.retries", 3)?
            .set_default("observations.backoff_ms", 1000)?
            .set_default(
                "species_text.base_url",
                "https://generativelanguage.googleapis.com",
            )?
            .set_default("species_text.model", "gemini-1.5-flash")?
            .set_default("species_text.timeout_secs", 10)?
            .set_default("species_text.retries", 3)?
            .set_default("species_text.backoff_ms", 1000)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BLOOM_ prefix)
            .add_source(
                Environment::with_prefix("BLOOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl ClimateConfig {
    pub fn policy(&self) -> FetchPolicy {
        FetchPolicy::new(self.timeout_secs, self.retries, self.backoff_ms)
    }
}

impl VegetationConfig {
    pub fn policy(&self) -> FetchPolicy {
        FetchPolicy::new(self.timeout_secs, self.retries, self.backoff_ms)
    }
}

impl ObservationsConfig {
    pub fn policy(&self) -> FetchPolicy {
        FetchPolicy::new(self.timeout_secs, self.retries, self.backoff_ms)
    }
}

impl SpeciesTextConfig {
    pub fn policy(&self) -> FetchPolicy {
        FetchPolicy::new(self.timeout_secs, self.retries, self.backoff_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            climate: ClimateConfig {
                base_url: "https://power.larc.nasa.gov".to_string(),
                timeout_secs: 15,
                retries: 2,
                backoff_ms: 1000,
            },
            vegetation: VegetationConfig {
                endpoint: None,
                timeout_secs: 10,
                retries: 3,
                backoff_ms: 1000,
            },
            observations: ObservationsConfig {
                base_url: "https://api.inaturalist.org".to_string(),
                radius_km: 10.0,
                per_page: 200,
                timeout_secs: 10,
                retries: 3,
                backoff_ms: 1000,
            },
            species_text: SpeciesTextConfig {
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-1.5-flash".to_string(),
                api_key: None,
                timeout_secs: 10,
                retries: 3,
                backoff_ms: 1000,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
