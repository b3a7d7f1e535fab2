//! Render sinks: where frames go.
//!
//! The driver pushes one [`Frame`] per tick (and one per control action) to
//! a single [`RenderSink`]. Sinks only read frames; they cannot reach back
//! into the simulation.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::trace;

use super::frame::Frame;

/// Consumer of simulation frames.
///
/// Called on the driver's tick task while the driver's state is locked, so
/// implementations must not block and must not call back into the driver.
pub trait RenderSink: Send + 'static {
    fn render(&mut self, frame: &Frame);
}

impl<F> RenderSink for F
where
    F: FnMut(&Frame) + Send + 'static,
{
    fn render(&mut self, frame: &Frame) {
        self(frame)
    }
}

/// Publishes the latest frame on a `watch` channel.
///
/// Any number of readers can hold a receiver and see the most recent frame;
/// older frames are overwritten, never queued.
pub struct WatchSink {
    tx: watch::Sender<Arc<Frame>>,
}

impl WatchSink {
    /// Create a sink and its receiver, seeded with `initial`.
    pub fn new(initial: Frame) -> (Self, watch::Receiver<Arc<Frame>>) {
        let (tx, rx) = watch::channel(Arc::new(initial));
        (Self { tx }, rx)
    }
}

impl RenderSink for WatchSink {
    fn render(&mut self, frame: &Frame) {
        self.tx.send_replace(Arc::new(frame.clone()));
    }
}

/// Logs each frame through `tracing` at trace level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl RenderSink for TracingSink {
    fn render(&mut self, frame: &Frame) {
        let visible = frame.trains.iter().filter(|t| t.visible).count();
        trace!(
            minutes = frame.minutes,
            label = %frame.label,
            visible,
            "frame"
        );
        for train in &frame.trains {
            trace!(
                train = %train.id,
                visible = train.visible,
                distance = ?train.distance,
                "train position"
            );
        }
    }
}

/// Forwards each frame to several sinks in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn RenderSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink to the end of the chain.
    pub fn with(mut self, sink: impl RenderSink) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl RenderSink for FanoutSink {
    fn render(&mut self, frame: &Frame) {
        for sink in &mut self.sinks {
            sink.render(frame);
        }
    }
}

/// Keeps every frame it receives. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames received so far.
    pub fn frames(&self) -> Vec<Frame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent frame, if any.
    pub fn last(&self) -> Option<Frame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Number of frames received.
    pub fn len(&self) -> usize {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no frames have been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &Frame) {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(frame.clone());
    }
}
