//! Community species observations and species ranking

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// Number of ranked species kept before picking the featured one
pub const TOP_SPECIES_LIMIT: usize = 5;

/// Species identity attached to an observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesRef {
    pub id: i64,
    pub name: String,
    pub common_name: Option<String>,
    pub photo_url: Option<String>,
}

/// A single ground observation
///
/// Synthetic ground observations carry no species identity, only whether
/// flowers were seen and roughly where.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservationRecord {
    pub date: NaiveDate,
    pub species: Option<SpeciesRef>,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flowering: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<GeoPoint>,
}

/// Species aggregated over a batch of observations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesSummary {
    pub id: i64,
    pub name: String,
    pub common_name: String,
    pub observation_count: u32,
    pub photos: Vec<String>,
}

/// Species shown to the user, with its description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeciesHighlight {
    pub id: Option<i64>,
    pub name: String,
    pub common_name: String,
    pub details: String,
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation_count: Option<u32>,
}

impl SpeciesHighlight {
    pub fn from_summary(summary: &SpeciesSummary, details: String) -> Self {
        Self {
            id: Some(summary.id),
            name: summary.name.clone(),
            common_name: summary.common_name.clone(),
            details,
            photos: summary.photos.clone(),
            observation_count: Some(summary.observation_count),
        }
    }

    /// Generic regional entry used when no species was observed
    pub fn regional(common_name: &str, details: String) -> Self {
        Self {
            id: None,
            name: "Local Flora".to_string(),
            common_name: common_name.to_string(),
            details,
            photos: Vec::new(),
            observation_count: None,
        }
    }
}

/// Rank species by observation count, most observed first.
///
/// Observations without a species identity are ignored. Ties are broken by
/// scientific name so the ranking is stable.
pub fn rank_species(observations: &[ObservationRecord]) -> Vec<SpeciesSummary> {
    let mut by_id: HashMap<i64, SpeciesSummary> = HashMap::new();

    for species in observations.iter().filter_map(|o| o.species.as_ref()) {
        let entry = by_id.entry(species.id).or_insert_with(|| SpeciesSummary {
            id: species.id,
            name: species.name.clone(),
            common_name: species
                .common_name
                .clone()
                .unwrap_or_else(|| species.name.clone()),
            observation_count: 0,
            photos: Vec::new(),
        });
        entry.observation_count += 1;
        if let Some(url) = &species.photo_url {
            if !entry.photos.contains(url) {
                entry.photos.push(url.clone());
            }
        }
    }

    let mut ranked: Vec<SpeciesSummary> = by_id.into_values().collect();
    ranked.sort_by(|a, b| {
        b.observation_count
            .cmp(&a.observation_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked
}

/// Top species, capped at [`TOP_SPECIES_LIMIT`]
pub fn top_species(observations: &[ObservationRecord]) -> Vec<SpeciesSummary> {
    let mut ranked = rank_species(observations);
    ranked.truncate(TOP_SPECIES_LIMIT);
    ranked
}
