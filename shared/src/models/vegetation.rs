//! Vegetation index (NDVI/EVI) series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{round_to, DataSource};

/// One periodic vegetation index sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VegetationSample {
    pub date: NaiveDate,
    pub ndvi: f64,
    pub evi: f64,
}

/// Ordered vegetation samples, monthly cadence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VegetationSeries {
    pub samples: Vec<VegetationSample>,
    pub source: DataSource,
}

/// NDVI point on the trend chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl VegetationSeries {
    /// Mean NDVI, `None` when there are no samples
    pub fn average_ndvi(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let total: f64 = self.samples.iter().map(|s| s.ndvi).sum();
        Some(total / self.samples.len() as f64)
    }

    /// Mean NDVI rounded to three decimals for display
    pub fn reported_average_ndvi(&self) -> Option<f64> {
        self.average_ndvi().map(|avg| round_to(avg, 3))
    }

    pub fn trend(&self) -> Vec<TrendPoint> {
        self.samples
            .iter()
            .map(|s| TrendPoint {
                date: s.date,
                value: s.ndvi,
            })
            .collect()
    }
}
