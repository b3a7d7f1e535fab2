//! Domain types for the train line simulation.
//!
//! This module contains the core model: stations on a linear track, trains
//! with their stop schedules, and the validated timetable that ties them
//! together. Types enforce their invariants at construction time, so the
//! engine can trust what it receives.

mod error;
mod station;
mod time;
mod timetable;
mod train;

pub use error::DomainError;
pub use station::{Station, Topology};
pub use time::{AxisTick, ClockTime, TimeError, axis_ticks};
pub use timetable::Timetable;
pub use train::{Stop, Train, TrainId};
