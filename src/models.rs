//! Row and response types

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// A single row of the `measurement` table.
///
/// One reading per station per date. `date` is an ISO-8601 `YYYY-MM-DD` string, so dates
/// order correctly when compared as text.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Measurement {
    /// Station identifier
    pub station: String,
    /// Observation date
    pub date: String,
    /// Precipitation amount, if recorded
    pub prcp: Option<f64>,
    /// Observed temperature
    pub tobs: f64,
}

/// A single row of the `station` table.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Station {
    /// Station identifier
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Precipitation for each date of the most recent year.
///
/// Keyed by date alone: when several stations report on the same date, the value from the
/// last row read for that date is kept.
pub type Precipitation = BTreeMap<String, Option<f64>>;

/// A single temperature observation, serialised as `[date, tobs]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

impl From<Measurement> for TemperatureObservation {
    fn from(measurement: Measurement) -> Self {
        Self {
            date: measurement.date,
            tobs: measurement.tobs,
        }
    }
}

impl Serialize for TemperatureObservation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.date)?;
        tuple.serialize_element(&self.tobs)?;
        tuple.end()
    }
}

/// Minimum, mean and maximum temperature observed on a date, serialised as
/// `[date, min, avg, max]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureStats {
    pub date: String,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl From<(String, f64, f64, f64)> for TemperatureStats {
    fn from((date, min, avg, max): (String, f64, f64, f64)) -> Self {
        Self {
            date,
            min,
            avg,
            max,
        }
    }
}

impl Serialize for TemperatureStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(4)?;
        tuple.serialize_element(&self.date)?;
        tuple.serialize_element(&self.min)?;
        tuple.serialize_element(&self.avg)?;
        tuple.serialize_element(&self.max)?;
        tuple.end()
    }
}

/// Inclusive date bounds for a temperature statistics query.
///
/// Bounds are passed through to the store as given and compared as text.
#[derive(Clone, Debug, PartialEq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    /// Return a range covering `start` onwards.
    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Return a range covering `start` to `end`, both inclusive.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }
}
