//! Stub providers for pipeline and handler tests

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{
    climate_date_key, ClimateSeries, DataSource, DateRange, GeoPoint, ObservationRecord,
    SpeciesRef, VegetationSample, VegetationSeries,
};

use super::{
    ClimateProvider, FetchError, ObservationProvider, Providers, SpeciesDescriber,
    VegetationProvider,
};

/// Every call fails as if the upstream timed out
pub struct FailingProvider;

#[async_trait]
impl ClimateProvider for FailingProvider {
    async fn daily_climate(
        &self,
        _: &GeoPoint,
        _: &DateRange,
    ) -> Result<ClimateSeries, FetchError> {
        Err(FetchError::Timeout(Duration::from_secs(15)))
    }
}

#[async_trait]
impl VegetationProvider for FailingProvider {
    async fn ndvi_series(
        &self,
        _: &GeoPoint,
        _: &DateRange,
    ) -> Result<VegetationSeries, FetchError> {
        Err(FetchError::Timeout(Duration::from_secs(10)))
    }
}

#[async_trait]
impl ObservationProvider for FailingProvider {
    async fn observations(
        &self,
        _: &GeoPoint,
        _: f64,
        _: &DateRange,
    ) -> Result<Vec<ObservationRecord>, FetchError> {
        Err(FetchError::Timeout(Duration::from_secs(10)))
    }
}

#[async_trait]
impl SpeciesDescriber for FailingProvider {
    async fn describe_species(&self, _: &str) -> Result<String, FetchError> {
        Err(FetchError::EmptyResponse)
    }

    async fn describe_region(&self, _: &GeoPoint) -> Result<String, FetchError> {
        Err(FetchError::EmptyResponse)
    }
}

/// Climate provider that panics mid-pipeline
pub struct PanickingClimate;

#[async_trait]
impl ClimateProvider for PanickingClimate {
    async fn daily_climate(
        &self,
        _: &GeoPoint,
        _: &DateRange,
    ) -> Result<ClimateSeries, FetchError> {
        panic!("climate provider blew up");
    }
}

/// Constant daily climate; windows ending on or after `pivot` get `recent`
/// temperatures, earlier windows get `prior`
pub struct FixedClimate {
    pub recent: f64,
    pub prior: f64,
    pub pivot: NaiveDate,
    pub rain_mm: f64,
}

#[async_trait]
impl ClimateProvider for FixedClimate {
    async fn daily_climate(
        &self,
        location: &GeoPoint,
        range: &DateRange,
    ) -> Result<ClimateSeries, FetchError> {
        let temperature = if range.end >= self.pivot {
            self.recent
        } else {
            self.prior
        };
        let mut series = ClimateSeries::empty(*location, *range, DataSource::NasaPower);
        for day in range.days() {
            let key = climate_date_key(day);
            series.temperature.insert(key.clone(), temperature);
            series.temperature_max.insert(key.clone(), temperature + 6.0);
            series.temperature_min.insert(key.clone(), temperature - 6.0);
            series.precipitation.insert(key, self.rain_mm);
        }
        Ok(series)
    }
}

/// Same NDVI value every month
pub struct FixedVegetation(pub f64);

#[async_trait]
impl VegetationProvider for FixedVegetation {
    async fn ndvi_series(
        &self,
        _: &GeoPoint,
        range: &DateRange,
    ) -> Result<VegetationSeries, FetchError> {
        Ok(VegetationSeries {
            samples: vec![VegetationSample {
                date: range.start,
                ndvi: self.0,
                evi: self.0 - 0.2,
            }],
            source: DataSource::AppEears,
        })
    }
}

/// Fixed observation list regardless of query
pub struct FixedObservations(pub Vec<ObservationRecord>);

#[async_trait]
impl ObservationProvider for FixedObservations {
    async fn observations(
        &self,
        _: &GeoPoint,
        _: f64,
        _: &DateRange,
    ) -> Result<Vec<ObservationRecord>, FetchError> {
        Ok(self.0.clone())
    }
}

/// Echoes what it was asked to describe
pub struct EchoDescriber;

#[async_trait]
impl SpeciesDescriber for EchoDescriber {
    async fn describe_species(&self, common_name: &str) -> Result<String, FetchError> {
        Ok(format!("About {}", common_name))
    }

    async fn describe_region(&self, point: &GeoPoint) -> Result<String, FetchError> {
        Ok(format!("Plants near {}, {}", point.latitude, point.longitude))
    }
}

pub fn observation(
    date: NaiveDate,
    id: i64,
    name: &str,
    common_name: &str,
) -> ObservationRecord {
    ObservationRecord {
        date,
        species: Some(SpeciesRef {
            id,
            name: name.to_string(),
            common_name: Some(common_name.to_string()),
            photo_url: Some(format!("https://example.org/{}.jpg", id)),
        }),
        confidence: 0.9,
        flowering: None,
        point: None,
    }
}

/// Every provider fails
pub fn failing_providers() -> Providers {
    let failing = Arc::new(FailingProvider);
    Providers {
        climate: failing.clone(),
        vegetation: failing.clone(),
        observations: failing.clone(),
        species_text: failing,
    }
}

/// Every provider answers with the given fixtures
pub fn healthy_providers(
    climate: FixedClimate,
    ndvi: f64,
    observations: Vec<ObservationRecord>,
) -> Providers {
    Providers {
        climate: Arc::new(climate),
        vegetation: Arc::new(FixedVegetation(ndvi)),
        observations: Arc::new(FixedObservations(observations)),
        species_text: Arc::new(EchoDescriber),
    }
}
