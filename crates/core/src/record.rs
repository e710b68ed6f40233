//! Raw observation rows and the metric columns derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::error::EngineError;

/// Date formats accepted for observation rows. The nominal format is ISO
/// (`2024-03-04`, a Monday), but import layers feed us whatever the
/// tracker exported.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// One raw statistics row as supplied by the import/persistence layer.
///
/// Numeric fields are deserialized leniently: numbers, numeric strings,
/// and null/missing values are all accepted, with anything unusable
/// coerced to `0.0`. The `date` string is validated later, during weekly
/// aggregation, so a row with a broken date can still be carried around
/// by callers and is only dropped at the engine boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawObservation {
    /// Reporting date, nominally the Monday of the observed week
    #[serde(default)]
    pub date: String,

    /// Items completed during the observed period
    #[serde(default, deserialize_with = "lenient_f64")]
    pub completed_items: f64,

    /// Story points completed during the observed period
    #[serde(default, deserialize_with = "lenient_f64")]
    pub completed_points: f64,

    /// Items created (scope added) during the observed period
    #[serde(default, deserialize_with = "lenient_f64")]
    pub created_items: f64,

    /// Story points created during the observed period
    #[serde(default, deserialize_with = "lenient_f64")]
    pub created_points: f64,
}

impl RawObservation {
    /// Create a row from already-known values.
    pub fn new(
        date: impl Into<String>,
        completed_items: f64,
        completed_points: f64,
        created_items: f64,
        created_points: f64,
    ) -> Self {
        Self {
            date: date.into(),
            completed_items,
            completed_points,
            created_items,
            created_points,
        }
    }
}

/// A raw row whose date has been parsed successfully.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Parsed reporting date
    pub date: NaiveDate,
    /// Items completed
    pub completed_items: f64,
    /// Points completed
    pub completed_points: f64,
    /// Items created
    pub created_items: f64,
    /// Points created
    pub created_points: f64,
}

/// Parse an observation date, trying each accepted format in turn.
pub fn parse_observation_date(raw: &str) -> Result<NaiveDate, EngineError> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(EngineError::InvalidDate(raw.to_string()))
}

/// The four numeric columns an observation row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Items completed per week
    CompletedItems,
    /// Points completed per week
    CompletedPoints,
    /// Items created per week
    CreatedItems,
    /// Points created per week
    CreatedPoints,
}

impl Metric {
    /// Column name as it appears in raw row mappings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::CompletedItems => "completed_items",
            Metric::CompletedPoints => "completed_points",
            Metric::CreatedItems => "created_items",
            Metric::CreatedPoints => "created_points",
        }
    }
}

impl FromStr for Metric {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed_items" => Ok(Metric::CompletedItems),
            "completed_points" => Ok(Metric::CompletedPoints),
            "created_items" => Ok(Metric::CreatedItems),
            "created_points" => Ok(Metric::CreatedPoints),
            other => Err(EngineError::UnknownMetric(other.to_string())),
        }
    }
}

/// Deserialize a numeric field tolerantly, coercing junk to `0.0`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

fn coerce_f64(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date = parse_observation_date("2024-03-04").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn test_parse_alternate_formats() {
        assert!(parse_observation_date("2024/03/04").is_ok());
        assert!(parse_observation_date("03/04/2024").is_ok());
        assert!(parse_observation_date("04.03.2024").is_ok());
        assert!(parse_observation_date(" 2024-03-04 ").is_ok());
    }

    #[test]
    fn test_parse_invalid_date() {
        let err = parse_observation_date("not a date").unwrap_err();
        assert!(matches!(err, EngineError::InvalidDate(_)));
    }

    #[test]
    fn test_metric_round_trip() {
        for metric in [
            Metric::CompletedItems,
            Metric::CompletedPoints,
            Metric::CreatedItems,
            Metric::CreatedPoints,
        ] {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_unknown_metric_is_missing_column() {
        let err = "velocity".parse::<Metric>().unwrap_err();
        assert!(matches!(err, EngineError::UnknownMetric(name) if name == "velocity"));
    }

    #[test]
    fn test_lenient_deserialization() {
        let row: RawObservation = serde_json::from_str(
            r#"{"date": "2024-03-04", "completed_items": "7", "completed_points": null, "created_items": 2}"#,
        )
        .unwrap();
        assert_eq!(row.completed_items, 7.0);
        assert_eq!(row.completed_points, 0.0);
        assert_eq!(row.created_items, 2.0);
        assert_eq!(row.created_points, 0.0);
    }

    #[test]
    fn test_non_numeric_coerced_to_zero() {
        let row: RawObservation = serde_json::from_str(
            r#"{"date": "2024-03-04", "completed_items": "lots", "completed_points": [1, 2]}"#,
        )
        .unwrap();
        assert_eq!(row.completed_items, 0.0);
        assert_eq!(row.completed_points, 0.0);
    }
}
