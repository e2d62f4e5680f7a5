//! Clock module for the countdown clock.
//!
//! This module contains the timing engine:
//! - `engine`: start/stop facade wiring the scheduled tasks together
//! - `state`: display counters, phase and drift resync
//! - `scheduler`: periodic and one-shot tasks on the tokio runtime
//! - `error`: engine errors

pub mod engine;
pub mod error;
pub mod scheduler;
pub mod state;

pub use engine::ClockEngine;
pub use error::ClockError;
pub use scheduler::Scheduler;
pub use state::ClockState;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

/// Receives one formatted frame per display tick.
///
/// Called from a scheduled task while the clock state is locked, so
/// implementations must return quickly. A UI that renders on its own thread
/// should hand frames off through a channel, which is what the
/// `UnboundedSender<String>` implementation does.
pub trait TickSink: Send + Sync {
    /// Renders `-MM:SS` while counting down or `MM:SS` while counting up.
    fn render(&self, text: &str);
}

impl TickSink for mpsc::UnboundedSender<String> {
    fn render(&self, text: &str) {
        if self.send(text.to_string()).is_err() {
            debug!("Frame receiver dropped, frame {} discarded", text);
        }
    }
}

/// Mock tick sink for testing. Records every frame.
#[derive(Debug, Default)]
pub struct MockTickSink {
    frames: Mutex<Vec<String>>,
}

impl MockTickSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> Vec<String> {
        self.frames.lock().clone()
    }

    /// Returns the most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.frames.lock().last().cloned()
    }

    /// Returns the number of frames rendered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    /// Returns true if nothing has been rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }
}

impl TickSink for MockTickSink {
    fn render(&self, text: &str) {
        self.frames.lock().push(text.to_string());
    }
}
