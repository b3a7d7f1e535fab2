//! Clock time handling for the simulation window.
//!
//! The simulation runs over a window that starts at a wall-clock time of day
//! (e.g. "06:00") and lasts a fixed number of minutes. Schedules are written
//! as minute offsets from the window start; this module converts between
//! those offsets and the "HH:MM" labels shown to users.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A wall-clock time expressed as minutes since midnight.
///
/// Unlike `NaiveTime`, a `ClockTime` is allowed to run past midnight: a
/// window starting at 22:00 that lasts three hours ends at "25:00". Labels
/// keep counting hours rather than wrapping, so a time–distance diagram never
/// shows its axis going backwards.
///
/// # Examples
///
/// ```
/// use train_sim::domain::ClockTime;
///
/// let start = ClockTime::parse_hhmm("06:00").unwrap();
/// assert_eq!(start.minutes(), 360);
/// assert_eq!(start.offset_by(25).to_string(), "06:25");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Create a clock time from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// Hours must be 0-23 and minutes 0-59.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_sim::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("0600").is_err());
    /// assert!(ClockTime::parse_hhmm("6:00").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // chrono accepts single-digit fields; insist on HH:MM
        if s.len() != 5 || s.as_bytes()[2] != b':' {
            return Err(TimeError::new("expected HH:MM format"));
        }

        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self::from)
            .map_err(|_| TimeError::new("not a valid time of day"))
    }

    /// Returns minutes since midnight.
    pub fn minutes(&self) -> u32 {
        self.0
    }

    /// Returns the hour component. May exceed 23 past midnight.
    pub fn hour(&self) -> u32 {
        self.0 / 60
    }

    /// Returns the minute component (0-59).
    pub fn minute(&self) -> u32 {
        self.0 % 60
    }

    /// Returns this time shifted forward by a number of simulated minutes.
    pub fn offset_by(&self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Number of minutes from `earlier` to `self`, if `self` is not before it.
    pub fn minutes_since(&self, earlier: Self) -> Option<u32> {
        self.0.checked_sub(earlier.0)
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self(time.hour() * 60 + time.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A labelled tick on the time axis of a time–distance diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisTick {
    /// Offset from the window start, in minutes.
    pub minutes: u32,
    /// Wall-clock label ("HH:MM").
    pub label: String,
}

/// Build the time-axis ticks for a window, every `step` minutes.
///
/// Ticks start at offset 0 and include `total` itself when it falls on a
/// step boundary. A zero step yields no ticks.
///
/// # Examples
///
/// ```
/// use train_sim::domain::{ClockTime, axis_ticks};
///
/// let start = ClockTime::parse_hhmm("06:00").unwrap();
/// let ticks = axis_ticks(start, 60, 30);
/// let labels: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
/// assert_eq!(labels, ["06:00", "06:30", "07:00"]);
/// ```
pub fn axis_ticks(start: ClockTime, total: u32, step: u32) -> Vec<AxisTick> {
    if step == 0 {
        return Vec::new();
    }

    (0..=total)
        .step_by(step as usize)
        .map(|minutes| AxisTick {
            minutes,
            label: start.offset_by(minutes).to_string(),
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any valid HH:MM string parses and displays back unchanged
        #[test]
        fn parse_display_roundtrip(hour in 0u32..24, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            let t = ClockTime::parse_hhmm(&s).unwrap();
            prop_assert_eq!(t.to_string(), s);
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s).is_err());
        }

        /// Label arithmetic matches floor division and remainder
        #[test]
        fn offset_label_matches_division(start in 0u32..1440, offset in 0u32..1440) {
            let label = ClockTime::from_minutes(start).offset_by(offset).to_string();
            let total = start + offset;
            prop_assert_eq!(label, format!("{:02}:{:02}", total / 60, total % 60));
        }
    }
}
