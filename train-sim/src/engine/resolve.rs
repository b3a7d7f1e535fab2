//! Position resolution: where is a train at simulation time `t`?
//!
//! The resolver walks a train's schedule once, front to back, and stops at
//! the first case that matches. At each stop index the cases are tried in
//! a fixed priority:
//!
//! 1. [`PositionCase::Dwelling`]: `arrival <= t < departure` at this stop.
//! 2. [`PositionCase::InTransit`]: `prev.departure <= t < arrival`, moving
//!    from the previous stop to this one.
//! 3. [`PositionCase::PreDeparture`]: at the origin, `0 <= t < departure`.
//!    This result is only provisional; the scan carries on and a later
//!    match replaces it.
//! 4. [`PositionCase::Terminated`]: at the terminus, `t >= arrival` with no
//!    departure. The train stays there for the rest of the run.
//!
//! Nothing matching gives [`PositionCase::Hidden`]. Intervals are half-open,
//! so at the exact departure minute a train has already left.
//!
//! Stops at unknown stations are skipped entirely, and a leg whose previous
//! stop is at an unknown station cannot be interpolated.

use serde::Serialize;

use crate::domain::{Topology, Train};

/// Which schedule case placed the train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "case", rename_all = "snake_case")]
pub enum PositionCase {
    /// Held at stop `stop` between its arrival and departure
    Dwelling { stop: usize },
    /// Travelling from stop `from` to stop `to`
    InTransit { from: usize, to: usize },
    /// Waiting at the origin before the first departure
    PreDeparture,
    /// Arrived at the terminus
    Terminated,
    /// Not on the line
    Hidden,
}

/// A train's resolved position at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainPosition {
    visible: bool,
    distance: Option<f64>,
    #[serde(flatten)]
    case: PositionCase,
}

impl TrainPosition {
    fn at(case: PositionCase, distance: f64) -> Self {
        Self {
            visible: true,
            distance: Some(distance),
            case,
        }
    }

    /// A position for a train that is not shown.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            distance: None,
            case: PositionCase::Hidden,
        }
    }

    /// Whether the train should be drawn.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Distance along the line, when visible.
    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    /// The case that produced this position.
    pub fn case(&self) -> PositionCase {
        self.case
    }
}

/// Resolve where `train` is at simulation minute `t`.
///
/// Pure: the same train, topology and time always give the same answer.
///
/// # Examples
///
/// ```
/// use train_sim::domain::{Station, Stop, Topology, Train};
/// use train_sim::engine::{PositionCase, resolve_position};
///
/// let topology = Topology::new(vec![
///     Station::new("Station A", 0.0),
///     Station::new("Station B", 30.0),
/// ])
/// .unwrap();
/// let train = Train::new(
///     "T1",
///     "blue",
///     vec![Stop::origin("Station A", 10.0), Stop::terminus("Station B", 40.0)],
/// );
///
/// // Halfway through the leg
/// let pos = resolve_position(&train, &topology, 25.0);
/// assert_eq!(pos.distance(), Some(15.0));
///
/// // Still waiting at the origin
/// let pos = resolve_position(&train, &topology, 9.0);
/// assert_eq!(pos.case(), PositionCase::PreDeparture);
/// assert_eq!(pos.distance(), Some(0.0));
/// ```
pub fn resolve_position(train: &Train, topology: &Topology, t: f64) -> TrainPosition {
    let schedule = &train.schedule;
    let last = schedule.len().saturating_sub(1);
    let mut provisional = None;

    for (idx, stop) in schedule.iter().enumerate() {
        let Some(distance) = topology.distance_of(&stop.station) else {
            continue;
        };

        // Case 1: held at this station
        if let Some((arrival, departure)) = stop.dwell() {
            if arrival <= t && t < departure {
                return TrainPosition::at(PositionCase::Dwelling { stop: idx }, distance);
            }
        }

        // Case 2: running in from the previous stop
        if idx > 0 {
            let prev = &schedule[idx - 1];
            if let (Some(prev_distance), Some(departure), Some(arrival)) = (
                topology.distance_of(&prev.station),
                prev.departure,
                stop.arrival,
            ) {
                if departure <= t && t < arrival {
                    let progress = leg_progress(departure, arrival, t);
                    let position = prev_distance + (distance - prev_distance) * progress;
                    return TrainPosition::at(
                        PositionCase::InTransit {
                            from: idx - 1,
                            to: idx,
                        },
                        position,
                    );
                }
            }
        }

        // Case 3: waiting at the origin; keep scanning
        if idx == 0 {
            if let Some(departure) = stop.departure {
                if 0.0 <= t && t < departure {
                    provisional = Some(TrainPosition::at(PositionCase::PreDeparture, distance));
                }
            }
        }

        // Case 4: arrived at the terminus for good
        if idx == last && stop.departure.is_none() {
            if let Some(arrival) = stop.arrival {
                if t >= arrival {
                    return TrainPosition::at(PositionCase::Terminated, distance);
                }
            }
        }
    }

    provisional.unwrap_or_else(TrainPosition::hidden)
}

/// Fraction of a leg completed at `t`. A zero-length leg counts as not
/// started.
fn leg_progress(departure: f64, arrival: f64, t: f64) -> f64 {
    let duration = arrival - departure;
    if duration > 0.0 {
        (t - departure) / duration
    } else {
        0.0
    }
}
