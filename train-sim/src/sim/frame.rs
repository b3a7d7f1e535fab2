//! Per-tick output handed to render sinks.

use serde::Serialize;

use crate::domain::{ClockTime, Timetable, TrainId};
use crate::engine::{PositionCase, resolve_position};

use super::clock::{ClockPhase, SimulationClock};

/// Which controls make sense in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub can_start: bool,
    pub can_stop: bool,
    pub can_reset: bool,
}

impl Controls {
    fn for_running(running: bool) -> Self {
        Self {
            can_start: !running,
            can_stop: running,
            can_reset: !running,
        }
    }
}

/// One train's state within a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainFrame {
    pub id: TrainId,
    pub color: String,
    pub visible: bool,
    pub distance: Option<f64>,
    /// Distance as a fraction of the line's span, for scaling onto a track
    pub fraction: Option<f64>,
    #[serde(flatten)]
    pub case: PositionCase,
}

/// Everything a renderer needs for one instant of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Simulated minutes since the window start
    pub minutes: u32,
    /// Wall-clock label, "HH:MM"
    pub label: String,
    pub phase: ClockPhase,
    pub speed: i32,
    pub controls: Controls,
    pub trains: Vec<TrainFrame>,
}

impl Frame {
    /// Resolve every train at the clock's current minute.
    pub fn capture(timetable: &Timetable, clock: &SimulationClock, window_start: ClockTime) -> Self {
        let topology = timetable.topology();
        let t = f64::from(clock.current());

        let trains = timetable
            .trains()
            .iter()
            .map(|train| {
                let position = resolve_position(train, topology, t);
                TrainFrame {
                    id: train.id.clone(),
                    color: train.color.clone(),
                    visible: position.visible(),
                    distance: position.distance(),
                    fraction: position.distance().map(|d| topology.fraction(d)),
                    case: position.case(),
                }
            })
            .collect();

        Self {
            minutes: clock.current(),
            label: window_start.offset_by(clock.current()).to_string(),
            phase: clock.phase(),
            speed: clock.speed(),
            controls: Controls::for_running(clock.is_running()),
            trains,
        }
    }

    /// Look up a train's state by id.
    pub fn train(&self, id: &str) -> Option<&TrainFrame> {
        self.trains.iter().find(|t| t.id.as_str() == id)
    }
}
