//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::SimConfig;
use crate::domain::Timetable;
use crate::engine::TrainPath;
use crate::sim::{FanoutSink, Frame, RenderSink, SimulationClock, SimulationDriver, WatchSink};

/// Shared application state.
///
/// Handlers control the run through `driver` and read the latest frame
/// from `frames`; they never touch the clock directly.
#[derive(Clone)]
pub struct AppState {
    /// Control surface for the simulation run
    pub driver: SimulationDriver,

    /// Latest frame pushed by the driver
    pub frames: watch::Receiver<Arc<Frame>>,

    /// The timetable being simulated
    pub timetable: Arc<Timetable>,

    /// Static path geometry, computed once at load
    pub paths: Arc<Vec<TrainPath>>,

    /// Simulation configuration
    pub config: Arc<SimConfig>,
}

impl AppState {
    /// Create a new app state.
    ///
    /// Frames go to the web layer's watch channel and then to `extra`.
    pub fn new(timetable: Timetable, config: SimConfig, extra: impl RenderSink) -> Self {
        let timetable = Arc::new(timetable);
        let paths = Arc::new(timetable.paths());

        let idle = SimulationClock::new(config.total_minutes(), config.initial_speed);
        let (watch_sink, frames) =
            WatchSink::new(Frame::capture(&timetable, &idle, config.window_start));
        let sink = FanoutSink::new().with(watch_sink).with(extra);

        let driver = SimulationDriver::new(timetable.clone(), &config, sink);

        Self {
            driver,
            frames,
            timetable,
            paths,
            config: Arc::new(config),
        }
    }

    /// The most recently pushed frame.
    pub fn latest_frame(&self) -> Frame {
        self.frames.borrow().as_ref().clone()
    }
}
