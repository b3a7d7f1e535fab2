//! The simulation driver: a clock on a timer.
//!
//! The driver owns the one [`SimulationClock`] for a run and a render sink.
//! `start` spawns a Tokio task that ticks at a fixed cadence; each tick
//! advances the clock, resolves every train and pushes a [`Frame`].
//!
//! Ticks are strictly sequential: there is only ever one tick task, and it
//! holds the driver lock for the whole of a tick, sink call included.
//! `stop` and `reset` take the same lock, bump the run generation and abort
//! the task before returning, so a tick that was already scheduled finds a
//! stale generation and exits without touching the clock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::config::SimConfig;
use crate::domain::{ClockTime, Timetable};

use super::clock::{ClockPhase, SimulationClock, TickOutcome};
use super::frame::Frame;
use super::sink::RenderSink;

/// State shared between the control surface and the tick task.
struct Core {
    timetable: Arc<Timetable>,
    clock: SimulationClock,
    window_start: ClockTime,
    sink: Box<dyn RenderSink>,
    /// Incremented whenever a tick task is started or cancelled.
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Core {
    fn frame(&self) -> Frame {
        Frame::capture(&self.timetable, &self.clock, self.window_start)
    }

    fn publish(&mut self) {
        let frame = self.frame();
        self.sink.render(&frame);
    }

    /// Invalidate and abort any running tick task.
    fn cancel(&mut self) {
        self.generation += 1;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Drives a simulation run.
///
/// Cheap to clone; clones control the same run. `start` must be called from
/// within a Tokio runtime.
#[derive(Clone)]
pub struct SimulationDriver {
    core: Arc<Mutex<Core>>,
    tick_interval: Duration,
}

impl SimulationDriver {
    /// Create a stopped driver at minute 0 and push the initial frame.
    pub fn new(timetable: Arc<Timetable>, config: &SimConfig, sink: impl RenderSink) -> Self {
        let mut core = Core {
            timetable,
            clock: SimulationClock::new(config.total_minutes(), config.initial_speed),
            window_start: config.window_start,
            sink: Box::new(sink),
            generation: 0,
            task: None,
        };
        core.publish();

        Self {
            core: Arc::new(Mutex::new(core)),
            tick_interval: config.tick_interval(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Core> {
        lock(&self.core)
    }

    /// Start ticking. Does nothing if already running.
    pub fn start(&self) {
        let mut core = self.lock();
        if !core.clock.start() {
            return;
        }

        core.cancel();
        let generation = core.generation;
        let task = tokio::spawn(run_ticks(
            Arc::downgrade(&self.core),
            generation,
            self.tick_interval,
        ));
        core.task = Some(task);

        info!(
            minutes = core.clock.current(),
            speed = core.clock.speed(),
            "Simulation started"
        );
        core.publish();
    }

    /// Stop ticking. Does nothing if already stopped.
    pub fn stop(&self) {
        let mut core = self.lock();
        core.cancel();
        if core.clock.stop() {
            info!(minutes = core.clock.current(), "Simulation stopped");
            core.publish();
        }
    }

    /// Stop and rewind to minute 0, pushing the rewound frame immediately.
    pub fn reset(&self) {
        let mut core = self.lock();
        core.cancel();
        core.clock.reset();
        info!("Simulation reset");
        core.publish();
    }

    /// Change the number of simulated minutes per tick.
    pub fn set_speed(&self, speed: i32) {
        let mut core = self.lock();
        core.clock.set_speed(speed);
        debug!(speed, "Simulation speed changed");
        core.publish();
    }

    /// Current simulated minute.
    pub fn current_minutes(&self) -> u32 {
        self.lock().clock.current()
    }

    /// Current clock phase.
    pub fn phase(&self) -> ClockPhase {
        self.lock().clock.phase()
    }

    /// Whether the clock is running.
    pub fn is_running(&self) -> bool {
        self.lock().clock.is_running()
    }

    /// The timetable being simulated.
    pub fn timetable(&self) -> Arc<Timetable> {
        self.lock().timetable.clone()
    }
}

fn lock(core: &Mutex<Core>) -> MutexGuard<'_, Core> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tick loop for one run. Exits when the run is cancelled, finishes, or the
/// driver is dropped.
async fn run_ticks(core: Weak<Mutex<Core>>, generation: u64, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(shared) = core.upgrade() else {
            return;
        };
        let mut core = lock(&shared);
        if core.generation != generation {
            return;
        }

        let outcome = core.clock.tick();
        trace!(minutes = core.clock.current(), "tick");
        match outcome {
            TickOutcome::Advanced => core.publish(),
            TickOutcome::Finished => {
                core.task = None;
                info!(minutes = core.clock.current(), "Simulation reached end of window");
                core.publish();
                return;
            }
            TickOutcome::Idle => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::resolve_position;
    use crate::sim::RecordingSink;
    use crate::timetable::reference;

    fn config(total: u32, speed: i32) -> SimConfig {
        SimConfig::new(
            ClockTime::from_minutes(360),
            ClockTime::from_minutes(360 + total),
            100,
            speed,
        )
        .unwrap()
    }

    fn driver(total: u32, speed: i32) -> (SimulationDriver, RecordingSink) {
        let sink = RecordingSink::new();
        let timetable = Arc::new(reference().unwrap());
        let driver = SimulationDriver::new(timetable, &config(total, speed), sink.clone());
        (driver, sink)
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_initial_frame() {
        let (driver, sink) = driver(240, 1);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.last().unwrap().minutes, 0);
        assert_eq!(driver.phase(), ClockPhase::StoppedAtZero);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_at_fixed_cadence() {
        let (driver, sink) = driver(240, 1);
        driver.start();
        advance(350).await;

        assert_eq!(driver.current_minutes(), 3);
        assert!(driver.is_running());

        let minutes: Vec<_> = sink.frames().iter().map(|f| f.minutes).collect();
        assert_eq!(minutes, vec![0, 0, 1, 2, 3]);
        assert_eq!(sink.last().unwrap().label, "06:03");
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_is_noop() {
        let (driver, sink) = driver(240, 1);
        driver.start();
        driver.start();
        advance(250).await;

        assert_eq!(driver.current_minutes(), 2);
        // initial + start + two ticks
        assert_eq!(sink.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_ticks() {
        let (driver, sink) = driver(240, 1);
        driver.start();
        advance(250).await;
        driver.stop();
        let frames_at_stop = sink.len();

        advance(1_000).await;
        assert_eq!(driver.current_minutes(), 2);
        assert_eq!(driver.phase(), ClockPhase::StoppedMidway);
        assert_eq!(sink.len(), frames_at_stop);

        // Stopping again changes nothing
        driver.stop();
        assert_eq!(sink.len(), frames_at_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn resume_after_stop() {
        let (driver, _sink) = driver(240, 1);
        driver.start();
        advance(250).await;
        driver.stop();
        driver.start();
        advance(250).await;
        assert_eq!(driver.current_minutes(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn finishes_at_window_end() {
        let (driver, sink) = driver(5, 2);
        driver.start();
        advance(1_000).await;

        assert_eq!(driver.current_minutes(), 5);
        assert_eq!(driver.phase(), ClockPhase::Finished);
        assert!(!driver.is_running());

        let minutes: Vec<_> = sink.frames().iter().map(|f| f.minutes).collect();
        assert_eq!(minutes, vec![0, 0, 2, 4, 5]);

        let last = sink.last().unwrap();
        assert!(last.controls.can_start);
        assert!(!last.controls.can_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn speed_change_applies_on_next_tick() {
        let (driver, _sink) = driver(240, 1);
        driver.start();
        advance(150).await;
        driver.set_speed(10);
        assert_eq!(driver.current_minutes(), 1);

        advance(100).await;
        assert_eq!(driver.current_minutes(), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_pushes_zeroed_frame() {
        let (driver, sink) = driver(240, 30);
        driver.start();
        advance(450).await;
        assert_eq!(driver.current_minutes(), 120);

        driver.reset();
        assert_eq!(driver.current_minutes(), 0);
        assert_eq!(driver.phase(), ClockPhase::StoppedAtZero);

        let last = sink.last().unwrap();
        assert_eq!(last.minutes, 0);
        assert_eq!(last.label, "06:00");

        // Every train matches a fresh resolution at t = 0
        let timetable = driver.timetable();
        for (train, frame) in timetable.trains().iter().zip(&last.trains) {
            let fresh = resolve_position(train, timetable.topology(), 0.0);
            assert_eq!(frame.visible, fresh.visible());
            assert_eq!(frame.distance, fresh.distance());
        }

        // No tick sneaks in after the reset
        let frames_at_reset = sink.len();
        advance(1_000).await;
        assert_eq!(sink.len(), frames_at_reset);
        assert_eq!(driver.current_minutes(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_after_finish() {
        let (driver, _sink) = driver(5, 10);
        driver.start();
        advance(500).await;
        assert_eq!(driver.phase(), ClockPhase::Finished);

        driver.reset();
        driver.start();
        advance(150).await;
        assert_eq!(driver.phase(), ClockPhase::Finished);
        assert_eq!(driver.current_minutes(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_driver_ends_task() {
        let (driver, sink) = driver(240, 1);
        driver.start();
        advance(150).await;
        let frames = sink.len();
        drop(driver);

        // The tick task only holds a weak reference and exits
        advance(1_000).await;
        assert_eq!(sink.len(), frames);
    }
}
