//! Validation utilities for incoming bloom queries

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

use crate::types::DateRange;

/// Longest accepted query window, in days (inclusive of both ends)
pub const MAX_RANGE_DAYS: i64 = 5 * 366;

/// Reasons a request cannot be turned into a query
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("{field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Date range is inverted: {start} is after {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("Date range spans {days} days, the limit is {max}")]
    RangeTooLong { days: i64, max: i64 },

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Parse an ISO-like date. Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp,
/// in which case only the date part is kept.
pub fn parse_query_date(field: &'static str, value: &str) -> Result<NaiveDate, RequestError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.date_naive());
    }
    Err(RequestError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Validate that the range is ordered and no longer than [`MAX_RANGE_DAYS`]
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, RequestError> {
    if start > end {
        return Err(RequestError::InvertedRange { start, end });
    }
    let days = (end - start).num_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(RequestError::RangeTooLong {
            days,
            max: MAX_RANGE_DAYS,
        });
    }
    Ok(DateRange::new(start, end))
}

/// Check latitude is within [-90, 90]
pub fn is_valid_latitude(latitude: f64) -> bool {
    latitude.is_finite() && (-90.0..=90.0).contains(&latitude)
}

/// Check longitude is within [-180, 180]
pub fn is_valid_longitude(longitude: f64) -> bool {
    longitude.is_finite() && (-180.0..=180.0).contains(&longitude)
}
