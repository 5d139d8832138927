//! Inbound request bodies and the validated query they turn into

use serde::{de, Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::types::{DateRange, GeoPoint, Location};
use crate::validation::{
    is_valid_latitude, is_valid_longitude, parse_query_date, validate_date_range, RequestError,
};

/// Location + date window sent by the map, trends and insights pages
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(deserialize_with = "number_or_string")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[serde(deserialize_with = "number_or_string")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    #[serde(default)]
    pub location_name: Option<String>,
    /// Search radius in km, observation lookups only
    #[serde(default)]
    #[validate(range(min = 0.1, max = 200.0))]
    pub radius: Option<f64>,
}

/// Validated, immutable bloom query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloomQuery {
    pub location: Location,
    pub date_range: DateRange,
}

impl LocationRequest {
    pub fn into_query(self) -> Result<BloomQuery, RequestError> {
        self.validate()
            .map_err(|e| RequestError::InvalidCoordinates(e.to_string()))?;
        // range checks pass NaN through
        if !is_valid_latitude(self.lat) || !is_valid_longitude(self.lon) {
            return Err(RequestError::InvalidCoordinates(format!(
                "({}, {}) is not a point on Earth",
                self.lat, self.lon
            )));
        }

        let start = parse_query_date("startDate", &self.start_date)?;
        let end = parse_query_date("endDate", &self.end_date)?;
        let date_range = validate_date_range(start, end)?;

        let name = self
            .location_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(BloomQuery {
            location: Location {
                point: GeoPoint::new(self.lat, self.lon),
                name,
            },
            date_range,
        })
    }
}

/// Accept coordinates sent either as JSON numbers or numeric strings
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got {:?}", s))),
    }
}
