//! Simulation clock, driver and render sinks.
//!
//! The [`SimulationDriver`] is the only thing that mutates simulation state.
//! Callers control it through `start`, `stop`, `reset` and `set_speed`;
//! renderers receive [`Frame`]s through a [`RenderSink`].

mod clock;
mod driver;
mod frame;
mod sink;

pub use clock::{ClockPhase, SimulationClock, TickOutcome};
pub use driver::SimulationDriver;
pub use frame::{Controls, Frame, TrainFrame};
pub use sink::{FanoutSink, RecordingSink, RenderSink, TracingSink, WatchSink};
