//! Bloom status aggregation
//!
//! Fetches climate, vegetation and observation data concurrently, swaps in
//! synthetic data for any provider that fails, then scores the result.

use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{
    calculate_bloom_score, calculate_climate_metrics, synthetic, top_species, verdict_for_score,
    BloomQuery, BloomReport, ClimateSeries, DataSource, DataSources, DateRange, GeoPoint,
    ObservationRecord, VegetationSeries,
};

use crate::error::{AppError, AppResult};
use crate::external::Providers;
use crate::services::SpeciesService;

/// Days of climate history fetched before the requested start date
pub const CLIMATE_LEAD_IN_DAYS: u64 = 30;

/// Offset between the current and historical climate windows
pub const HISTORICAL_OFFSET_DAYS: u64 = 365;

/// Observations for a query and where they came from
#[derive(Debug, Clone)]
pub struct ObservationBatch {
    pub source: DataSource,
    pub records: Vec<ObservationRecord>,
}

/// Current and historical climate windows for a query
pub fn climate_windows(range: &DateRange) -> Option<(DateRange, DateRange)> {
    let current = range.with_lead_in(CLIMATE_LEAD_IN_DAYS)?;
    let historical = current.shifted_back(HISTORICAL_OFFSET_DAYS)?;
    Some((current, historical))
}

/// Bloom status service
#[derive(Clone)]
pub struct BloomService {
    providers: Providers,
    species: SpeciesService,
    default_radius_km: f64,
}

impl BloomService {
    pub fn new(providers: Providers, default_radius_km: f64) -> Self {
        let species = SpeciesService::new(providers.species_text.clone());
        Self {
            providers,
            species,
            default_radius_km,
        }
    }

    /// Run the full aggregation for one query
    pub async fn assess(&self, query: &BloomQuery) -> AppResult<BloomReport> {
        let point = query.location.point;
        let (current_window, historical_window) = climate_windows(&query.date_range)
            .ok_or_else(|| {
                AppError::ValidationError("Date range is outside the supported calendar".into())
            })?;

        tracing::info!(
            "Assessing bloom status for {} ({}, {}) from {} to {}",
            query.location.display_name(),
            point.latitude,
            point.longitude,
            query.date_range.start,
            query.date_range.end
        );

        let ((current_climate, historical_climate), vegetation, observations) = tokio::join!(
            async {
                tokio::join!(
                    self.climate_or_fallback(&point, &current_window),
                    self.climate_or_fallback(&point, &historical_window)
                )
            },
            self.vegetation_or_fallback(&point, &query.date_range),
            self.observations_or_fallback(&point, None, &query.date_range)
        );

        let current_metrics = calculate_climate_metrics(&current_climate);
        let historical_metrics = calculate_climate_metrics(&historical_climate);
        let score = calculate_bloom_score(
            &current_metrics,
            &historical_metrics,
            vegetation.average_ndvi(),
        );
        let verdict = verdict_for_score(score);

        let ranked = top_species(&observations.records);
        let featured = self.species.featured(&ranked, &point).await;

        let climate_source =
            if current_climate.source.is_synthetic() || historical_climate.source.is_synthetic() {
                DataSource::MockData
            } else {
                current_climate.source
            };

        let report = BloomReport::new(
            verdict,
            current_metrics,
            historical_metrics,
            &vegetation,
            featured,
            DataSources {
                climate: climate_source,
                ndvi: vegetation.source,
                species: observations.source,
            },
        );

        tracing::info!(
            "Bloom status for {}: {} (score {}, confidence {})",
            query.location.display_name(),
            report.bloom_status,
            report.score,
            report.confidence
        );

        Ok(report)
    }

    /// Live daily climate, or a synthetic series covering the same window
    pub async fn climate_or_fallback(&self, point: &GeoPoint, range: &DateRange) -> ClimateSeries {
        match self.providers.climate.daily_climate(point, range).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(
                    "Climate data unavailable for {} to {}, using synthetic data: {}",
                    range.start,
                    range.end,
                    e
                );
                synthetic::climate_series(point, range, &mut StdRng::from_entropy())
            }
        }
    }

    /// Live NDVI series, or synthetic monthly samples
    pub async fn vegetation_or_fallback(
        &self,
        point: &GeoPoint,
        range: &DateRange,
    ) -> VegetationSeries {
        match self.providers.vegetation.ndvi_series(point, range).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!("NDVI data unavailable, using synthetic data: {}", e);
                synthetic::vegetation_series(range, &mut StdRng::from_entropy())
            }
        }
    }

    /// Live species observations, or synthetic ground observations.
    ///
    /// An empty live result is not a failure; the featured species then
    /// comes from the text provider instead.
    pub async fn observations_or_fallback(
        &self,
        point: &GeoPoint,
        radius_km: Option<f64>,
        range: &DateRange,
    ) -> ObservationBatch {
        let radius = radius_km.unwrap_or(self.default_radius_km);
        match self.providers.observations.observations(point, radius, range).await {
            Ok(records) if records.is_empty() => ObservationBatch {
                source: DataSource::GeminiAi,
                records,
            },
            Ok(records) => ObservationBatch {
                source: DataSource::INaturalist,
                records,
            },
            Err(e) => {
                tracing::warn!(
                    "Species observations unavailable, using ground observations: {}",
                    e
                );
                let mut rng = StdRng::from_entropy();
                ObservationBatch {
                    source: DataSource::MockData,
                    records: synthetic::ground_observations(point, range, &mut rng),
                }
            }
        }
    }
}
