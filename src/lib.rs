//! Countdown Clock Library
//!
//! This library provides the core functionality for the countdown clock.
//! It includes:
//! - Clock engine counting down a delay, then counting up, with drift resync
//! - Periodic audio cue aligned to the end of the delay
//! - `MM:SS` duration parsing and interval/delay validation
//! - Optional JSON settings file
//! - CLI command parsing and terminal display

pub mod cli;
pub mod clock;
pub mod config;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    minimum_seconds_for_cue, ClockConfig, ClockPhase, ConfigError, DurationField, FormatError,
    TimeDuration,
};

// Re-export clock types
pub use clock::{ClockEngine, ClockError, ClockState, MockTickSink, Scheduler, TickSink};

// Re-export sound types
pub use sound::{
    try_create_trigger, AudioTrigger, CueSource, LoadedCue, MockAudioTrigger, MutedAudioTrigger,
    RodioAudioTrigger, SoundError,
};

// Re-export settings types
pub use config::{Settings, SettingsError};
