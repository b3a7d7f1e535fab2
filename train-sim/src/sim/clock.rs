//! The simulation clock.
//!
//! Holds the current simulated minute, the speed (minutes per tick) and
//! whether the clock is running. It knows nothing about timers: the driver
//! decides when `tick` is called.

use serde::Serialize;

/// Observable clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    /// Stopped at the start of the window
    StoppedAtZero,
    /// Stopped part-way through the window
    StoppedMidway,
    /// Advancing on every tick
    Running,
    /// Stopped at the end of the window
    Finished,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock was stopped; nothing changed
    Idle,
    /// Time moved and the clock keeps running
    Advanced,
    /// Time hit the end of the window and the clock stopped
    Finished,
}

/// Simulated time within a fixed window of `total` minutes.
///
/// # Examples
///
/// ```
/// use train_sim::sim::{ClockPhase, SimulationClock, TickOutcome};
///
/// let mut clock = SimulationClock::new(5, 2);
/// clock.start();
/// assert_eq!(clock.tick(), TickOutcome::Advanced); // 2
/// assert_eq!(clock.tick(), TickOutcome::Advanced); // 4
/// assert_eq!(clock.tick(), TickOutcome::Finished); // clamped to 5
/// assert_eq!(clock.current(), 5);
/// assert_eq!(clock.phase(), ClockPhase::Finished);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationClock {
    current: u32,
    total: u32,
    speed: i32,
    running: bool,
}

impl SimulationClock {
    /// Create a stopped clock at minute 0.
    pub fn new(total: u32, speed: i32) -> Self {
        Self {
            current: 0,
            total,
            speed,
            running: false,
        }
    }

    /// Current simulated minute.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Length of the window.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Minutes advanced per tick.
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Whether the clock is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The clock's current phase.
    pub fn phase(&self) -> ClockPhase {
        if self.running {
            ClockPhase::Running
        } else if self.current == 0 {
            ClockPhase::StoppedAtZero
        } else if self.current >= self.total {
            ClockPhase::Finished
        } else {
            ClockPhase::StoppedMidway
        }
    }

    /// Start running. Returns false if the clock was already running.
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    /// Stop running. Returns false if the clock was already stopped.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Stop and rewind to minute 0.
    pub fn reset(&mut self) {
        self.running = false;
        self.current = 0;
    }

    /// Change the speed; takes effect on the next tick.
    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
    }

    /// Advance by one tick.
    ///
    /// Passing the end of the window clamps to `total` and stops the clock.
    /// Going below zero clamps to 0.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        let next = i64::from(self.current) + i64::from(self.speed);
        if next > i64::from(self.total) {
            self.current = self.total;
            self.running = false;
            return TickOutcome::Finished;
        }

        self.current = u32::try_from(next.max(0)).unwrap_or(0);
        TickOutcome::Advanced
    }
}
