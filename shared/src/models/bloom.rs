//! Bloom scoring and the bloom status report

use serde::{Deserialize, Serialize};

use super::climate::ClimateMetrics;
use super::observation::SpeciesHighlight;
use super::vegetation::{TrendPoint, VegetationSeries};
use crate::types::DataSource;

/// Upper bound for any confidence reported to clients
pub const MAX_CONFIDENCE: u32 = 100;

/// Bloom likelihood verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BloomStatus {
    #[serde(rename = "Likely to Bloom")]
    LikelyToBloom,
    #[serde(rename = "Possibly Blooming")]
    PossiblyBlooming,
    #[serde(rename = "Limited Bloom Potential")]
    LimitedBloomPotential,
    #[serde(rename = "Unlikely to Bloom")]
    UnlikelyToBloom,
    /// Only produced by the outer failure boundary
    #[serde(rename = "Data Unavailable")]
    DataUnavailable,
}

impl std::fmt::Display for BloomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BloomStatus::LikelyToBloom => write!(f, "Likely to Bloom"),
            BloomStatus::PossiblyBlooming => write!(f, "Possibly Blooming"),
            BloomStatus::LimitedBloomPotential => write!(f, "Limited Bloom Potential"),
            BloomStatus::UnlikelyToBloom => write!(f, "Unlikely to Bloom"),
            BloomStatus::DataUnavailable => write!(f, "Data Unavailable"),
        }
    }
}

/// One row of the score → verdict table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBand {
    pub min_score: u32,
    pub status: BloomStatus,
    pub confidence: u32,
}

/// Score bands, evaluated from the highest threshold down
pub const BLOOM_SCORE_BANDS: [ScoreBand; 3] = [
    ScoreBand {
        min_score: 5,
        status: BloomStatus::LikelyToBloom,
        confidence: 80,
    },
    ScoreBand {
        min_score: 3,
        status: BloomStatus::PossiblyBlooming,
        confidence: 60,
    },
    ScoreBand {
        min_score: 1,
        status: BloomStatus::LimitedBloomPotential,
        confidence: 40,
    },
];

/// Verdict when no band matches
pub const DEFAULT_BAND: ScoreBand = ScoreBand {
    min_score: 0,
    status: BloomStatus::UnlikelyToBloom,
    confidence: 20,
};

/// Scored verdict before it is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloomVerdict {
    pub status: BloomStatus,
    pub confidence: u32,
    pub score: u32,
}

/// Heuristic bloom score from climate anomalies and greenness.
///
/// - +2 when current mean temperature is more than 1°C above the prior
///   year, +1 when it is merely above
/// - +1 when total precipitation is within ±20% of the prior year
/// - +3 when mean NDVI is above 0.6, +1 when above 0.4
///
/// Missing averages contribute nothing.
pub fn calculate_bloom_score(
    current: &ClimateMetrics,
    historical: &ClimateMetrics,
    avg_ndvi: Option<f64>,
) -> u32 {
    let mut score: i32 = 0;

    if let (Some(now), Some(before)) = (current.avg_temperature, historical.avg_temperature) {
        if now > before + 1.0 {
            score += 2;
        } else if now > before {
            score += 1;
        }
    }

    let lower = historical.total_precipitation * 0.8;
    let upper = historical.total_precipitation * 1.2;
    if current.total_precipitation >= lower && current.total_precipitation <= upper {
        score += 1;
    }

    match avg_ndvi {
        Some(ndvi) if ndvi > 0.6 => score += 3,
        Some(ndvi) if ndvi > 0.4 => score += 1,
        _ => {}
    }

    score.max(0) as u32
}

/// Map a score through the standard band table
pub fn verdict_for_score(score: u32) -> BloomVerdict {
    verdict_from_bands(score, &BLOOM_SCORE_BANDS)
}

/// Map a score through an arbitrary band table; first matching band wins
pub fn verdict_from_bands(score: u32, bands: &[ScoreBand]) -> BloomVerdict {
    let band = bands
        .iter()
        .find(|band| score >= band.min_score)
        .copied()
        .unwrap_or(DEFAULT_BAND);

    BloomVerdict {
        status: band.status,
        confidence: band.confidence,
        score,
    }
}

/// Per-category provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSources {
    pub climate: DataSource,
    pub ndvi: DataSource,
    pub species: DataSource,
}

/// Bloom status response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BloomReport {
    pub success: bool,
    pub bloom_status: BloomStatus,
    pub confidence: u32,
    pub current_metrics: ClimateMetrics,
    pub historical_metrics: ClimateMetrics,
    #[serde(rename = "avgNDVI")]
    pub avg_ndvi: Option<f64>,
    pub ndvi_trend: Vec<TrendPoint>,
    pub score: u32,
    pub top_species: Vec<SpeciesHighlight>,
    pub data_sources: DataSources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BloomReport {
    /// Assemble a successful report. Confidence is clamped here regardless
    /// of what the band table produced.
    pub fn new(
        verdict: BloomVerdict,
        current_metrics: ClimateMetrics,
        historical_metrics: ClimateMetrics,
        vegetation: &VegetationSeries,
        featured: SpeciesHighlight,
        data_sources: DataSources,
    ) -> Self {
        Self {
            success: true,
            bloom_status: verdict.status,
            confidence: verdict.confidence.min(MAX_CONFIDENCE),
            current_metrics,
            historical_metrics,
            avg_ndvi: vegetation.reported_average_ndvi(),
            ndvi_trend: vegetation.trend(),
            score: verdict.score,
            top_species: vec![featured],
            data_sources,
            error: None,
        }
    }

    /// Fixed degraded payload returned when the pipeline fails outright
    pub fn fallback() -> Self {
        Self {
            success: false,
            bloom_status: BloomStatus::DataUnavailable,
            confidence: 0,
            current_metrics: ClimateMetrics::placeholder(),
            historical_metrics: ClimateMetrics::placeholder(),
            avg_ndvi: Some(0.5),
            ndvi_trend: Vec::new(),
            score: 0,
            top_species: vec![SpeciesHighlight::regional(
                "Regional Plants",
                "Bloom data is temporarily unavailable. Please try again later.".to_string(),
            )],
            data_sources: DataSources {
                climate: DataSource::Fallback,
                ndvi: DataSource::Fallback,
                species: DataSource::Fallback,
            },
            error: Some("Service temporarily unavailable".to_string()),
        }
    }
}
