//! Schedule-to-position engine.
//!
//! Two pure computations over a [`Timetable`](crate::domain::Timetable):
//! static path geometry for the time–distance diagram, built once at load,
//! and per-instant position resolution, evaluated on every clock tick.

mod paths;
mod resolve;

pub use paths::{PathSegment, SegmentKind, TrainPath, build_paths};
pub use resolve::{PositionCase, TrainPosition, resolve_position};
