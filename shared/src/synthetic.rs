//! Synthetic fallback data generators
//!
//! Used when a live provider is unavailable. Output has the same shape as the
//! live payloads (full date span, full field set) with randomized but
//! plausible values, and is always tagged [`DataSource::MockData`].
//! None of these functions can fail.

use chrono::{Datelike, Months};
use rand::Rng;

use crate::models::{
    climate_date_key, ClimateSeries, ObservationRecord, VegetationSample, VegetationSeries,
};
use crate::types::{round_to, DataSource, DateRange, GeoPoint};

/// Chance that a synthetic day has rain
pub const RAIN_PROBABILITY: f64 = 0.3;

/// Chance that a synthetic day has a ground observation
pub const OBSERVATION_PROBABILITY: f64 = 0.3;

/// Width in degrees of the box ground observations are scattered over
pub const OBSERVATION_JITTER_DEGREES: f64 = 0.01;

/// Base temperature band (min, width) for a latitude
fn temperature_band(latitude: f64) -> (f64, f64) {
    match latitude.abs() {
        lat if lat < 23.5 => (25.0, 10.0), // tropical
        lat if lat < 35.0 => (15.0, 15.0), // subtropical
        lat if lat < 55.0 => (10.0, 15.0), // temperate
        _ => (-5.0, 10.0),                 // polar
    }
}

/// Winter in the hemisphere of `location` for the given month
fn is_winter(location: &GeoPoint, month: u32) -> bool {
    if location.is_northern_hemisphere() {
        month >= 11 || month <= 2
    } else {
        (5..=8).contains(&month)
    }
}

/// Daily climate series covering every day of `range`
pub fn climate_series<R: Rng>(
    location: &GeoPoint,
    range: &DateRange,
    rng: &mut R,
) -> ClimateSeries {
    let (band_min, band_width) = temperature_band(location.latitude);
    let mut base = band_min + rng.gen::<f64>() * band_width;
    if is_winter(location, range.start.month()) {
        base -= 10.0;
    }

    let mut series = ClimateSeries::empty(*location, *range, DataSource::MockData);
    for day in range.days() {
        let key = climate_date_key(day);
        let mean = base + (rng.gen::<f64>() * 8.0 - 4.0);
        let max = mean + 5.0 + rng.gen::<f64>() * 5.0;
        let min = mean - 5.0 - rng.gen::<f64>() * 5.0;
        let rain = if rng.gen_bool(RAIN_PROBABILITY) {
            round_to(rng.gen::<f64>() * 15.0, 1)
        } else {
            0.0
        };

        series.temperature.insert(key.clone(), round_to(mean, 1));
        series.temperature_max.insert(key.clone(), round_to(max, 1));
        series.temperature_min.insert(key.clone(), round_to(min, 1));
        series.precipitation.insert(key, rain);
    }
    series
}

/// One vegetation sample per month from `range.start` while still in range
pub fn vegetation_series<R: Rng>(range: &DateRange, rng: &mut R) -> VegetationSeries {
    let samples = (0u32..)
        .map_while(|offset| range.start.checked_add_months(Months::new(offset)))
        .take_while(|date| *date <= range.end)
        .map(|date| VegetationSample {
            date,
            ndvi: 0.5 + rng.gen::<f64>() * 0.3,
            evi: 0.3 + rng.gen::<f64>() * 0.4,
        })
        .collect();

    VegetationSeries {
        samples,
        source: DataSource::MockData,
    }
}

/// Sparse land-cover observations with no species identity, scattered
/// around `location`
pub fn ground_observations<R: Rng>(
    location: &GeoPoint,
    range: &DateRange,
    rng: &mut R,
) -> Vec<ObservationRecord> {
    range
        .days()
        .filter_map(|date| {
            if !rng.gen_bool(OBSERVATION_PROBABILITY) {
                return None;
            }
            Some(ObservationRecord {
                date,
                species: None,
                confidence: 0.5 + rng.gen::<f64>() * 0.5,
                flowering: Some(rng.gen_bool(0.5)),
                point: Some(GeoPoint::new(
                    location.latitude + (rng.gen::<f64>() - 0.5) * OBSERVATION_JITTER_DEGREES,
                    location.longitude + (rng.gen::<f64>() - 0.5) * OBSERVATION_JITTER_DEGREES,
                )),
            })
        })
        .collect()
}
