//! Clock engine error types.

use thiserror::Error;

/// Errors raised by the clock engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// The cue interval is zero seconds long.
    #[error("interval must be longer than zero seconds")]
    InvalidInterval,

    /// `start` was called on an engine that is already running.
    #[error("clock has already been started; create a new clock to restart")]
    AlreadyStarted,

    /// `start` was called on an engine that has been stopped.
    #[error("clock has been stopped; create a new clock to restart")]
    Stopped,

    /// The scheduler could not accept the clock tasks.
    #[error("scheduler unavailable: {0}")]
    SchedulerUnavailable(String),
}
