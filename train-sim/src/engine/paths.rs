//! Static path geometry for the time–distance diagram.
//!
//! Each train's schedule becomes a polyline in (time, distance) space: a
//! sloped travel segment for every leg between stations and a flat dwell
//! segment for every stop where the train waits.

use serde::Serialize;

use crate::domain::{Timetable, Topology, Train, TrainId};

/// What a path segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Moving between two stations
    Travel,
    /// Held at a station
    Dwell,
}

/// A straight line in time–distance space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSegment {
    pub kind: SegmentKind,
    pub from_distance: f64,
    pub to_distance: f64,
    pub from_time: f64,
    pub to_time: f64,
}

impl PathSegment {
    fn travel(from: (f64, f64), to: (f64, f64)) -> Self {
        Self {
            kind: SegmentKind::Travel,
            from_time: from.0,
            from_distance: from.1,
            to_time: to.0,
            to_distance: to.1,
        }
    }

    fn dwell(distance: f64, arrival: f64, departure: f64) -> Self {
        Self {
            kind: SegmentKind::Dwell,
            from_distance: distance,
            to_distance: distance,
            from_time: arrival,
            to_time: departure,
        }
    }
}

/// All segments for one train.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainPath {
    pub train: TrainId,
    pub color: String,
    pub segments: Vec<PathSegment>,
}

/// Build the path segments for one train.
///
/// Stops whose station is not in the topology are skipped without
/// disturbing the leg being built, so the train's line joins the stops on
/// either side of them. A stop without a departure ends the chain: nothing
/// travels on from it.
///
/// Segments are not clipped to the simulation window. One that starts or
/// ends outside `[0, total]` is emitted whole, and cropping it to the
/// visible axis is left to the renderer.
///
/// # Examples
///
/// ```
/// use train_sim::domain::{Station, Stop, Topology, Train};
/// use train_sim::engine::{SegmentKind, build_paths};
///
/// let topology = Topology::new(vec![
///     Station::new("Station A", 0.0),
///     Station::new("Station B", 30.0),
///     Station::new("Station C", 80.0),
/// ])
/// .unwrap();
/// let train = Train::new(
///     "T1",
///     "blue",
///     vec![
///         Stop::origin("Station A", 10.0),
///         Stop::call("Station B", 40.0, 45.0),
///         Stop::terminus("Station C", 80.0),
///     ],
/// );
///
/// let kinds: Vec<_> = build_paths(&train, &topology).iter().map(|s| s.kind).collect();
/// assert_eq!(kinds, [SegmentKind::Travel, SegmentKind::Dwell, SegmentKind::Travel]);
/// ```
pub fn build_paths(train: &Train, topology: &Topology) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    // (departure time, distance) of the stop the current leg starts from
    let mut prev: Option<(f64, f64)> = None;

    for stop in &train.schedule {
        let Some(distance) = topology.distance_of(&stop.station) else {
            continue;
        };

        if let (Some(from), Some(arrival)) = (prev, stop.arrival) {
            segments.push(PathSegment::travel(from, (arrival, distance)));
        }

        if let Some((arrival, departure)) = stop.dwell() {
            if arrival != departure {
                segments.push(PathSegment::dwell(distance, arrival, departure));
            }
        }

        prev = stop.departure.map(|departure| (departure, distance));
    }

    segments
}

impl Timetable {
    /// Path geometry for every train, in load order.
    pub fn paths(&self) -> Vec<TrainPath> {
        self.trains()
            .iter()
            .map(|train| TrainPath {
                train: train.id.clone(),
                color: train.color.clone(),
                segments: build_paths(train, self.topology()),
            })
            .collect()
    }
}
