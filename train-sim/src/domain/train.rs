//! Trains and their stop schedules.
//!
//! A `Train` runs a schedule of `Stop`s. Stop times are minute offsets from
//! the start of the simulation window; `None` means the stop has no
//! constraint at that end (an origin has no arrival, a terminus has no
//! departure).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a train (e.g. "T1").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainId(String);

impl TrainId {
    /// Creates a train id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A scheduled stop of a train at one station.
///
/// # Time Semantics
///
/// - Origin stop: only the departure is meaningful
/// - Terminus stop: only the arrival is meaningful
/// - Intermediate stops: both times present; equal times mean the train
///   passes through without dwelling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Name of the station this stop refers to
    #[serde(alias = "stationName")]
    pub station: String,
    /// Arrival offset in minutes
    #[serde(default)]
    pub arrival: Option<f64>,
    /// Departure offset in minutes
    #[serde(default)]
    pub departure: Option<f64>,
}

impl Stop {
    /// Creates a stop with the given times.
    pub fn new(station: impl Into<String>, arrival: Option<f64>, departure: Option<f64>) -> Self {
        Self {
            station: station.into(),
            arrival,
            departure,
        }
    }

    /// Origin stop: departs at `departure`, no arrival.
    pub fn origin(station: impl Into<String>, departure: f64) -> Self {
        Self::new(station, None, Some(departure))
    }

    /// Intermediate stop: arrives then departs.
    pub fn call(station: impl Into<String>, arrival: f64, departure: f64) -> Self {
        Self::new(station, Some(arrival), Some(departure))
    }

    /// Terminus stop: arrives at `arrival`, no departure.
    pub fn terminus(station: impl Into<String>, arrival: f64) -> Self {
        Self::new(station, Some(arrival), None)
    }

    /// The dwell interval `[arrival, departure)`, when both times exist.
    pub fn dwell(&self) -> Option<(f64, f64)> {
        Some((self.arrival?, self.departure?))
    }

    /// Earliest known time at this stop.
    pub fn earliest(&self) -> Option<f64> {
        self.arrival.or(self.departure)
    }

    /// Latest known time at this stop.
    pub fn latest(&self) -> Option<f64> {
        self.departure.or(self.arrival)
    }
}

/// A train and its schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    /// Unique train id
    pub id: TrainId,
    /// Colour identifier passed through to renderers
    pub color: String,
    /// Stops in chronological order
    pub schedule: Vec<Stop>,
}

impl Train {
    /// Creates a train.
    pub fn new(id: impl Into<String>, color: impl Into<String>, schedule: Vec<Stop>) -> Self {
        Self {
            id: TrainId::new(id),
            color: color.into(),
            schedule,
        }
    }
}
