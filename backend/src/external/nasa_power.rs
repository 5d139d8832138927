//! NASA POWER daily point API client
//!
//! Fetches mean/max/min temperature and corrected precipitation for a point.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{ClimateSeries, DataSource, DateRange, GeoPoint};

use super::fetch::{fetch_json, FetchError, FetchPolicy};
use super::ClimateProvider;

/// Value POWER uses for days it has no data for
const POWER_FILL_VALUE: f64 = -999.0;

/// NASA POWER API client
#[derive(Clone)]
pub struct NasaPowerClient {
    client: Client,
    base_url: String,
    policy: FetchPolicy,
}

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    parameter: PowerParameters,
}

#[derive(Debug, Deserialize)]
struct PowerParameters {
    #[serde(rename = "T2M", default)]
    temperature: BTreeMap<String, f64>,
    #[serde(rename = "T2M_MAX", default)]
    temperature_max: BTreeMap<String, f64>,
    #[serde(rename = "T2M_MIN", default)]
    temperature_min: BTreeMap<String, f64>,
    #[serde(rename = "PRECTOTCORR", default)]
    precipitation: BTreeMap<String, f64>,
}

impl NasaPowerClient {
    pub fn new(client: Client, base_url: String, policy: FetchPolicy) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
        }
    }

    fn request_url(&self, location: &GeoPoint, range: &DateRange) -> String {
        format!(
            "{}/api/temporal/daily/point?parameters=T2M,T2M_MAX,T2M_MIN,PRECTOTCORR\
             &community=AG&longitude={}&latitude={}&start={}&end={}&format=JSON",
            self.base_url,
            location.longitude,
            location.latitude,
            range.start.format("%Y%m%d"),
            range.end.format("%Y%m%d"),
        )
    }

    fn convert_response(
        data: PowerResponse,
        location: &GeoPoint,
        range: &DateRange,
    ) -> ClimateSeries {
        let parameters = data.properties.parameter;
        ClimateSeries {
            location: *location,
            date_range: *range,
            temperature: drop_fill_values(parameters.temperature),
            temperature_max: drop_fill_values(parameters.temperature_max),
            temperature_min: drop_fill_values(parameters.temperature_min),
            precipitation: drop_fill_values(parameters.precipitation),
            source: DataSource::NasaPower,
        }
    }
}

fn drop_fill_values(values: BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    values
        .into_iter()
        .filter(|(_, v)| *v > POWER_FILL_VALUE && v.is_finite())
        .collect()
}

#[async_trait]
impl ClimateProvider for NasaPowerClient {
    async fn daily_climate(
        &self,
        location: &GeoPoint,
        range: &DateRange,
    ) -> Result<ClimateSeries, FetchError> {
        tracing::debug!(
            "Fetching climate data for lat: {}, lon: {} ({} to {})",
            location.latitude,
            location.longitude,
            range.start,
            range.end
        );
        let url = self.request_url(location, range);
        let data: PowerResponse = fetch_json(&self.client, "NASA POWER", &url, &self.policy).await?;
        Ok(Self::convert_response(data, location, range))
    }
}
