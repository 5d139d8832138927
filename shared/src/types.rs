//! Common types used across the platform

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Geographic point in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_northern_hemisphere(&self) -> bool {
        self.latitude > 0.0
    }
}

/// A point with an optional human-readable name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub point: GeoPoint,
    pub name: Option<String>,
}

impl Location {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed location")
    }
}

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of calendar days covered, both endpoints included
    pub fn len_days(&self) -> usize {
        if self.end < self.start {
            return 0;
        }
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every day in the range, both endpoints included
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }

    /// Move the start date earlier, keeping the end date
    pub fn with_lead_in(&self, days: u64) -> Option<Self> {
        Some(Self {
            start: self.start.checked_sub_days(Days::new(days))?,
            end: self.end,
        })
    }

    /// Shift both endpoints earlier by the same number of days
    pub fn shifted_back(&self, days: u64) -> Option<Self> {
        Some(Self {
            start: self.start.checked_sub_days(Days::new(days))?,
            end: self.end.checked_sub_days(Days::new(days))?,
        })
    }
}

/// Provenance marker attached to every provider payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataSource {
    #[serde(rename = "NASA_POWER")]
    NasaPower,
    #[serde(rename = "NASA_AppEEARS")]
    AppEears,
    #[serde(rename = "iNaturalist")]
    INaturalist,
    #[serde(rename = "Gemini_AI")]
    GeminiAi,
    /// Synthetic data produced after a provider failed
    #[serde(rename = "MOCK_DATA")]
    MockData,
    /// Fixed placeholder payload from the outer failure boundary
    #[serde(rename = "FALLBACK")]
    Fallback,
}

impl DataSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataSource::MockData | DataSource::Fallback)
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::NasaPower => write!(f, "NASA_POWER"),
            DataSource::AppEears => write!(f, "NASA_AppEEARS"),
            DataSource::INaturalist => write!(f, "iNaturalist"),
            DataSource::GeminiAi => write!(f, "Gemini_AI"),
            DataSource::MockData => write!(f, "MOCK_DATA"),
            DataSource::Fallback => write!(f, "FALLBACK"),
        }
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
