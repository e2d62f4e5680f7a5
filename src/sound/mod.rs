//! Audio cue playback for the countdown clock.
//!
//! This module provides:
//!
//! - The [`AudioTrigger`] seam the clock engine fires on every cue
//! - Cue sources (generated tone or sound file) with measured length
//! - A rodio-backed trigger running on its own audio thread
//! - Muted and mock triggers for headless runs and tests
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  play()   ┌───────────────────┐  Play  ┌──────────────┐
//! │   ClockEngine    │──────────▶│ RodioAudioTrigger │───────▶│ audio thread │
//! │ (scheduled task) │           │  (Send + Sync)    │channel │ OutputStream │
//! └──────────────────┘           └───────────────────┘        └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use countdown_clock::sound::{AudioTrigger, CueSource, RodioAudioTrigger};
//!
//! let cue = CueSource::tone(1000).load().expect("tone always loads");
//! let trigger = RodioAudioTrigger::new(cue).expect("audio init");
//! trigger.play().expect("playback failed");
//! ```

mod error;
mod player;
mod source;

pub use error::SoundError;
pub use player::{try_create_trigger, RodioAudioTrigger};
pub use source::{CueSource, LoadedCue, DEFAULT_TONE_HZ, DEFAULT_TONE_MS};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// The opaque "play once" action fired by the clock.
///
/// Implementations must be cheap to call: the clock invokes `play` from a
/// scheduled task while holding its state lock.
pub trait AudioTrigger: Send + Sync + std::fmt::Debug {
    /// Plays the cue from the beginning, interrupting any playback still
    /// in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot be started.
    fn play(&self) -> Result<(), SoundError>;

    /// Returns the cue length in milliseconds.
    ///
    /// Used only to schedule the first cue so that it ends when the
    /// countdown reaches zero.
    fn duration_ms(&self) -> u64;
}

/// A trigger that never makes a sound but reports a cue length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutedAudioTrigger {
    duration_ms: u64,
}

impl MutedAudioTrigger {
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms }
    }
}

impl AudioTrigger for MutedAudioTrigger {
    fn play(&self) -> Result<(), SoundError> {
        Ok(())
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

/// Mock audio trigger for testing.
#[derive(Debug, Default)]
pub struct MockAudioTrigger {
    duration_ms: u64,
    plays: AtomicUsize,
    attempts: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockAudioTrigger {
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Returns the number of successful plays.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    /// Returns the number of `play` calls, failed ones included.
    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl AudioTrigger for MockAudioTrigger {
    fn play(&self) -> Result<(), SoundError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}
