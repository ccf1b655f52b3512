use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::serde_utils::serialize_fields_as_map;

/// Insertion-ordered `column name -> original value` map.
///
/// Inserting a key that already exists replaces the value in place, so the
/// column keeps the position where it first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(String, String)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.entries
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl Serialize for Fields {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_fields_as_map(&self.entries, serializer)
    }
}

/// One validated data row.
///
/// Only the sample builder can construct a `Sample`, and it does so all at
/// once: every required value has been parsed and every required column is
/// present in `raw`. There are no setters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    /// Always UTC; serializes as RFC 3339
    pub(super) time: DateTime<Utc>,
    pub(super) latitude: f64,
    pub(super) longitude: f64,
    #[serde(rename = "heightMSL")]
    pub(super) height_msl: f64,
    pub(super) velocity_north: f64,
    pub(super) velocity_east: f64,
    pub(super) velocity_down: f64,
    pub(super) horizontal_accuracy: Option<f64>,
    pub(super) vertical_accuracy: Option<f64>,
    pub(super) speed_accuracy: Option<f64>,
    pub(super) gps_fix: Option<i32>,
    pub(super) satellite_count: Option<i32>,
    pub(super) raw: Fields,
    pub(super) extra: Fields,
}

impl Sample {
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Height above mean sea level
    pub fn height_msl(&self) -> f64 {
        self.height_msl
    }

    pub fn velocity_north(&self) -> f64 {
        self.velocity_north
    }

    pub fn velocity_east(&self) -> f64 {
        self.velocity_east
    }

    pub fn velocity_down(&self) -> f64 {
        self.velocity_down
    }

    pub fn horizontal_accuracy(&self) -> Option<f64> {
        self.horizontal_accuracy
    }

    pub fn vertical_accuracy(&self) -> Option<f64> {
        self.vertical_accuracy
    }

    pub fn speed_accuracy(&self) -> Option<f64> {
        self.speed_accuracy
    }

    pub fn gps_fix(&self) -> Option<i32> {
        self.gps_fix
    }

    pub fn satellite_count(&self) -> Option<i32> {
        self.satellite_count
    }

    /// Every column present on the source line, in column order
    pub fn raw(&self) -> &Fields {
        &self.raw
    }

    /// Columns beyond the 12 canonical positions, in column order
    pub fn extra(&self) -> &Fields {
        &self.extra
    }

    /// Magnitude of the 3D velocity vector
    pub fn speed_3d(&self) -> f64 {
        (self.velocity_north.powi(2) + self.velocity_east.powi(2) + self.velocity_down.powi(2)).sqrt()
    }
}

/// Why a line did not produce a sample.
///
/// These are diagnostics, never surfaced as errors to the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("Blank line")]
    Blank,

    #[error("Comment line")]
    Comment,

    #[error("Header line")]
    Header,

    #[error("Line too large: {0} bytes (max: {1} bytes)")]
    LineTooLarge(usize, usize),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid number in field: {0}")]
    InvalidNumber(&'static str),

    #[error("Invalid timestamp")]
    InvalidTime,
}

impl SkipReason {
    /// True for rows that held data but could not be turned into a sample.
    pub fn is_dropped_row(&self) -> bool {
        !matches!(self, SkipReason::Blank | SkipReason::Comment | SkipReason::Header)
    }
}

/// Per-line result of the engine: emit exactly one sample, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Emit(Sample),
    Skip(SkipReason),
}

impl RowOutcome {
    pub fn into_sample(self) -> Option<Sample> {
        match self {
            RowOutcome::Emit(sample) => Some(sample),
            RowOutcome::Skip(_) => None,
        }
    }
}
