//! Featured bloom regions shown on the map page

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// Relative bloom intensity of a featured region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BloomIntensity {
    Low,
    Medium,
    High,
}

/// A well-known bloom hotspot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedRegion {
    pub country: String,
    pub name: String,
    pub ndvi: f64,
    pub peak_bloom: NaiveDate,
    pub species: String,
    pub coordinates: GeoPoint,
    pub bloom_intensity: BloomIntensity,
}

/// Reference dataset of featured regions, keyed by country
///
/// Built once at startup and handed to the router; tests build their own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegionCatalog {
    regions: Vec<FeaturedRegion>,
}

impl RegionCatalog {
    pub fn new(regions: Vec<FeaturedRegion>) -> Self {
        Self { regions }
    }

    pub fn all(&self) -> &[FeaturedRegion] {
        &self.regions
    }

    /// Case-insensitive lookup by country name
    pub fn find(&self, country: &str) -> Option<&FeaturedRegion> {
        let wanted = country.trim();
        self.regions
            .iter()
            .find(|r| r.country.eq_ignore_ascii_case(wanted))
    }

    /// The built-in set of featured regions
    pub fn featured() -> Self {
        Self::new(vec![
            region(
                "Brazil",
                "Amazon Basin, Brazil",
                0.85,
                (2024, 3, 15),
                "Tropical Rainforest",
                (-10.0, -55.0),
                BloomIntensity::High,
            ),
            region(
                "United States",
                "California, USA",
                0.72,
                (2024, 4, 20),
                "Wildflowers & Chaparral",
                (37.0, -119.0),
                BloomIntensity::Medium,
            ),
            region(
                "Japan",
                "Kyoto, Japan",
                0.78,
                (2024, 4, 5),
                "Cherry Blossoms",
                (35.0, 135.0),
                BloomIntensity::High,
            ),
            region(
                "South Africa",
                "Western Cape, South Africa",
                0.68,
                (2024, 8, 30),
                "Fynbos & Proteas",
                (-33.0, 19.0),
                BloomIntensity::Medium,
            ),
            region(
                "Australia",
                "Western Australia",
                0.75,
                (2024, 9, 15),
                "Wildflowers",
                (-25.0, 122.0),
                BloomIntensity::High,
            ),
            region(
                "France",
                "Provence, France",
                0.70,
                (2024, 6, 20),
                "Lavender Fields",
                (44.0, 6.0),
                BloomIntensity::Medium,
            ),
            region(
                "Netherlands",
                "Keukenhof, Netherlands",
                0.73,
                (2024, 4, 15),
                "Tulips",
                (52.0, 5.0),
                BloomIntensity::High,
            ),
            region(
                "India",
                "Valley of Flowers, India",
                0.80,
                (2024, 7, 25),
                "Alpine Flowers",
                (30.0, 79.0),
                BloomIntensity::High,
            ),
        ])
    }
}

fn region(
    country: &str,
    name: &str,
    ndvi: f64,
    (year, month, day): (i32, u32, u32),
    species: &str,
    (latitude, longitude): (f64, f64),
    bloom_intensity: BloomIntensity,
) -> FeaturedRegion {
    FeaturedRegion {
        country: country.to_string(),
        name: name.to_string(),
        ndvi,
        peak_bloom: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        species: species.to_string(),
        coordinates: GeoPoint::new(latitude, longitude),
        bloom_intensity,
    }
}
