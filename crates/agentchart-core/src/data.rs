// File: crates/agentchart-core/src/data.rs
// Summary: Wire records served by the metrics endpoints and their converted forms.
// Notes:
// - `y` is optional on the wire; agents report `null` for missed polls.
// - `group` is required for stacked rows so a malformed payload fails to
//   decode instead of collapsing into one unnamed group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// One sample of a single metric stream, `x` in unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    #[serde(default)]
    pub y: Option<f64>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }
}

/// One sample of one series of a stacked metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupedDataPoint {
    pub x: f64,
    #[serde(default)]
    pub y: Option<f64>,
    pub group: String,
}

impl GroupedDataPoint {
    pub fn new(x: f64, y: f64, group: impl Into<String>) -> Self {
        Self { x, y: Some(y), group: group.into() }
    }
}

/// A `DataPoint` with its timestamp converted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub t: DateTime<Utc>,
    pub y: Option<f64>,
}

impl Sample {
    /// Whether the sample takes part in the line and area.
    /// Missing, zero and NaN values all break the path.
    pub fn is_defined(&self) -> bool {
        matches!(self.y, Some(v) if v != 0.0 && !v.is_nan())
    }
}

/// A `GroupedDataPoint` with its timestamp converted.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupedSample {
    pub t: DateTime<Utc>,
    pub y: Option<f64>,
    pub group: String,
}

/// Convert unix seconds to a UTC timestamp at millisecond precision.
pub fn to_datetime(secs: f64, index: usize) -> Result<DateTime<Utc>, LayoutError> {
    if !secs.is_finite() {
        return Err(LayoutError::NonFiniteX { index });
    }
    let millis = (secs * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return Err(LayoutError::TimestampRange { secs });
    }
    DateTime::from_timestamp_millis(millis as i64).ok_or(LayoutError::TimestampRange { secs })
}

/// Unix seconds of a timestamp, as the scales consume them.
pub fn to_secs(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 1000.0
}
