//! Bloom scoring integration tests
//!
//! Tests for the bloom heuristic including:
//! - Score composition from temperature, precipitation and NDVI
//! - Score to status/confidence bands
//! - Confidence clamping on the assembled report

use proptest::prelude::*;
use shared::{
    calculate_bloom_score, verdict_for_score, verdict_from_bands, BloomReport, BloomStatus,
    ClimateMetrics, DataSource, DataSources, ScoreBand, SpeciesHighlight, VegetationSeries,
    BLOOM_SCORE_BANDS, MAX_CONFIDENCE,
};

fn metrics(avg_temperature: Option<f64>, total_precipitation: f64) -> ClimateMetrics {
    ClimateMetrics {
        avg_temperature,
        total_precipitation,
        avg_precipitation: None,
        days_above_15c: 0,
        days_with_rain: 0,
    }
}

fn sources() -> DataSources {
    DataSources {
        climate: DataSource::NasaPower,
        ndvi: DataSource::AppEears,
        species: DataSource::INaturalist,
    }
}

fn empty_vegetation() -> VegetationSeries {
    VegetationSeries {
        samples: Vec::new(),
        source: DataSource::MockData,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Warmer by more than 1°C, similar rain, lush vegetation
    #[test]
    fn test_maximum_score_is_likely_to_bloom() {
        let score = calculate_bloom_score(
            &metrics(Some(20.0), 100.0),
            &metrics(Some(18.0), 100.0),
            Some(0.7),
        );
        assert_eq!(score, 6);

        let verdict = verdict_for_score(score);
        assert_eq!(verdict.status, BloomStatus::LikelyToBloom);
        assert_eq!(verdict.confidence, 80);
    }

    /// Cooler, far drier, sparse vegetation
    #[test]
    fn test_zero_score_is_unlikely_to_bloom() {
        let score = calculate_bloom_score(
            &metrics(Some(15.0), 40.0),
            &metrics(Some(18.0), 100.0),
            Some(0.3),
        );
        assert_eq!(score, 0);

        let verdict = verdict_for_score(score);
        assert_eq!(verdict.status, BloomStatus::UnlikelyToBloom);
        assert_eq!(verdict.confidence, 20);
    }

    #[test]
    fn test_slightly_warmer_scores_one() {
        let score = calculate_bloom_score(
            &metrics(Some(18.5), 10.0),
            &metrics(Some(18.0), 100.0),
            None,
        );
        assert_eq!(score, 1);
        assert_eq!(verdict_for_score(score).status, BloomStatus::LimitedBloomPotential);
    }

    #[test]
    fn test_precipitation_band_is_inclusive() {
        let historical = metrics(None, 100.0);
        assert_eq!(calculate_bloom_score(&metrics(None, 80.0), &historical, None), 1);
        assert_eq!(calculate_bloom_score(&metrics(None, 120.0), &historical, None), 1);
        assert_eq!(calculate_bloom_score(&metrics(None, 79.9), &historical, None), 0);
        assert_eq!(calculate_bloom_score(&metrics(None, 120.1), &historical, None), 0);
    }

    #[test]
    fn test_ndvi_thresholds() {
        let dry = metrics(None, 0.0);
        let wet = metrics(None, 100.0);
        assert_eq!(calculate_bloom_score(&dry, &wet, Some(0.61)), 3);
        assert_eq!(calculate_bloom_score(&dry, &wet, Some(0.6)), 1);
        assert_eq!(calculate_bloom_score(&dry, &wet, Some(0.4)), 0);
    }

    /// Undefined averages contribute nothing
    #[test]
    fn test_missing_temperature_contributes_nothing() {
        let score = calculate_bloom_score(
            &metrics(None, 50.0),
            &metrics(Some(10.0), 100.0),
            None,
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(verdict_for_score(5).status, BloomStatus::LikelyToBloom);
        assert_eq!(verdict_for_score(4).status, BloomStatus::PossiblyBlooming);
        assert_eq!(verdict_for_score(3).confidence, 60);
        assert_eq!(verdict_for_score(2).confidence, 40);
        assert_eq!(verdict_for_score(1).status, BloomStatus::LimitedBloomPotential);
    }

    /// A misconfigured table cannot push confidence past the maximum
    #[test]
    fn test_report_clamps_misconfigured_confidence() {
        let bands = [ScoreBand {
            min_score: 0,
            status: BloomStatus::LikelyToBloom,
            confidence: 150,
        }];
        let verdict = verdict_from_bands(2, &bands);
        assert_eq!(verdict.confidence, 150);

        let report = BloomReport::new(
            verdict,
            metrics(Some(20.0), 10.0),
            metrics(Some(19.0), 10.0),
            &empty_vegetation(),
            SpeciesHighlight::regional("Regional Plants", "Various".to_string()),
            sources(),
        );
        assert_eq!(report.confidence, MAX_CONFIDENCE);
        assert!(report.success);
        assert_eq!(report.avg_ndvi, None);
    }

    #[test]
    fn test_report_serializes_wire_names() {
        let report = BloomReport::new(
            verdict_for_score(3),
            metrics(Some(20.0), 10.0),
            metrics(None, 0.0),
            &empty_vegetation(),
            SpeciesHighlight::regional("Regional Plants", "Various".to_string()),
            sources(),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["bloomStatus"], "Possibly Blooming");
        assert_eq!(json["avgNDVI"], serde_json::Value::Null);
        assert_eq!(json["historicalMetrics"]["avgTemperature"], serde_json::Value::Null);
        assert_eq!(json["dataSources"]["climate"], "NASA_POWER");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_fallback_report() {
        let report = BloomReport::fallback();
        assert!(!report.success);
        assert_eq!(report.bloom_status, BloomStatus::DataUnavailable);
        assert_eq!(report.confidence, 0);
        assert_eq!(report.avg_ndvi, Some(0.5));
        assert_eq!(report.current_metrics.total_precipitation, 45.2);
        assert_eq!(report.data_sources.species, DataSource::Fallback);
        assert_eq!(report.error.as_deref(), Some("Service temporarily unavailable"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn temperature_strategy() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-30.0f64..45.0)
}

fn precipitation_strategy() -> impl Strategy<Value = f64> {
    0.0f64..500.0
}

fn ndvi_strategy() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(-0.2f64..1.0)
}

proptest! {
    /// The score never exceeds the sum of the maximum component weights
    #[test]
    fn test_score_is_bounded(
        current_temp in temperature_strategy(),
        historical_temp in temperature_strategy(),
        current_rain in precipitation_strategy(),
        historical_rain in precipitation_strategy(),
        ndvi in ndvi_strategy(),
    ) {
        let score = calculate_bloom_score(
            &metrics(current_temp, current_rain),
            &metrics(historical_temp, historical_rain),
            ndvi,
        );
        prop_assert!(score <= 6);
    }

    /// Every score maps to one of the four standard verdicts with the
    /// confidence from its band
    #[test]
    fn test_verdict_matches_band_table(score in 0u32..20) {
        let verdict = verdict_for_score(score);
        let expected = BLOOM_SCORE_BANDS
            .iter()
            .find(|band| score >= band.min_score)
            .map(|band| band.confidence)
            .unwrap_or(20);

        prop_assert_eq!(verdict.confidence, expected);
        prop_assert_eq!(verdict.score, score);
        prop_assert!(verdict.status != BloomStatus::DataUnavailable);
    }

    /// Reported confidence never exceeds the maximum whatever the table says
    #[test]
    fn test_confidence_always_clamped(confidence in 0u32..1000, score in 0u32..10) {
        let bands = [ScoreBand { min_score: 0, status: BloomStatus::PossiblyBlooming, confidence }];
        let report = BloomReport::new(
            verdict_from_bands(score, &bands),
            metrics(None, 0.0),
            metrics(None, 0.0),
            &empty_vegetation(),
            SpeciesHighlight::regional("Regional Plants", String::new()),
            sources(),
        );
        prop_assert!(report.confidence <= MAX_CONFIDENCE);
    }

    /// Higher NDVI never lowers the score
    #[test]
    fn test_ndvi_is_monotonic(low in 0.0f64..1.0, delta in 0.0f64..0.5) {
        let current = metrics(Some(20.0), 100.0);
        let historical = metrics(Some(19.5), 100.0);
        let a = calculate_bloom_score(&current, &historical, Some(low));
        let b = calculate_bloom_score(&current, &historical, Some(low + delta));
        prop_assert!(b >= a);
    }
}
