use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::models::Sport;

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_sport(value: &str) -> Result<Sport> {
    Sport::from_str(value)
}

/// SQLite stores NaN as NULL; map non-finite samples to NULL explicitly on
/// the way in and back to NaN on the way out so gaps survive a round-trip.
pub fn finite_or_null(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

pub fn null_as_nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}
