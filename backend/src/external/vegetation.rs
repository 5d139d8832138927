//! Vegetation index (NDVI/EVI) provider client
//!
//! Talks to an AppEEARS-backed point-sample endpoint that returns monthly
//! `{date, ndvi, evi}` samples. When no endpoint is configured every call
//! fails fast and callers use synthetic data.

use async_trait::async_trait;
use reqwest::Client;
use shared::{DataSource, DateRange, GeoPoint, VegetationSample, VegetationSeries};

use super::fetch::{fetch_json, FetchError, FetchPolicy};
use super::VegetationProvider;

/// Vegetation index client
#[derive(Clone)]
pub struct VegetationClient {
    client: Client,
    endpoint: Option<String>,
    policy: FetchPolicy,
}

impl VegetationClient {
    pub fn new(client: Client, endpoint: Option<String>, policy: FetchPolicy) -> Self {
        Self {
            client,
            endpoint: endpoint
                .map(|e| e.trim().trim_end_matches('/').to_string())
                .filter(|e| !e.is_empty()),
            policy,
        }
    }
}

#[async_trait]
impl VegetationProvider for VegetationClient {
    async fn ndvi_series(
        &self,
        location: &GeoPoint,
        range: &DateRange,
    ) -> Result<VegetationSeries, FetchError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(FetchError::NotConfigured("Vegetation index endpoint"))?;

        let url = format!(
            "{}?latitude={}&longitude={}&start={}&end={}",
            endpoint, location.latitude, location.longitude, range.start, range.end
        );
        let mut samples: Vec<VegetationSample> =
            fetch_json(&self.client, "Vegetation index", &url, &self.policy).await?;
        samples.sort_by_key(|s| s.date);

        Ok(VegetationSeries {
            samples,
            source: DataSource::AppEears,
        })
    }

    fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}
