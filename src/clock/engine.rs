//! Clock engine for the countdown clock.
//!
//! This module provides the core timing functionality:
//! - Countdown from the delay with a 1 second display tick
//! - A single switch to counting up once the delay elapses
//! - Minute resync against elapsed time at every rollover
//! - A fixed-rate audio cue whose first playback ends with the countdown

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::error::ClockError;
use super::scheduler::Scheduler;
use super::state::ClockState;
use super::TickSink;
use crate::sound::AudioTrigger;
use crate::types::{ClockPhase, TimeDuration};

/// Display tick period.
const TICK: Duration = Duration::from_secs(1);

// ============================================================================
// Shared
// ============================================================================

/// State and collaborators reached from every scheduled task.
///
/// Every render and every cue happens with `state` locked and after checking
/// the stop flag, which is what lets `stop` guarantee silence on return.
struct Shared {
    state: Mutex<ClockState>,
    countdown: Mutex<Option<AbortHandle>>,
    sink: Arc<dyn TickSink>,
    audio: Arc<dyn AudioTrigger>,
}

impl Shared {
    fn countdown_tick(&self, reference: Instant) {
        let mut state = self.state.lock();
        if state.is_stopped() {
            return;
        }
        if let Some(frame) = state.countdown_frame(reference.elapsed()) {
            self.sink.render(&frame);
        }
    }

    fn countup_tick(&self, reference: Instant) {
        let mut state = self.state.lock();
        if state.is_stopped() {
            return;
        }
        // The first count-up tick and the switch timer land on the same
        // instant; whichever runs first performs the switch.
        self.switch_locked(&mut state);
        let frame = state.countup_frame(reference.elapsed());
        self.sink.render(&frame);
    }

    fn switch_phase(&self) {
        let mut state = self.state.lock();
        if state.is_stopped() {
            return;
        }
        self.switch_locked(&mut state);
    }

    fn switch_locked(&self, state: &mut ClockState) {
        if state.switch_to_counting_up() {
            if let Some(countdown) = self.countdown.lock().take() {
                countdown.abort();
            }
            debug!("Delay elapsed, counting up");
        }
    }

    fn cue_tick(&self) {
        let state = self.state.lock();
        if state.is_stopped() {
            return;
        }
        if let Err(e) = self.audio.play() {
            warn!("Failed to play cue, clock keeps running: {}", e);
        }
    }
}

/// Returns when the first cue starts, relative to the clock start.
///
/// The cue is started early by its own length so that it ends when the
/// countdown reaches zero. A cue longer than the delay starts immediately.
fn first_cue_offset(delay: Duration, cue_ms: u64) -> Duration {
    delay.saturating_sub(Duration::from_millis(cue_ms))
}

// ============================================================================
// ClockEngine
// ============================================================================

/// Timing engine driving one countdown/count-up run.
///
/// An engine runs at most once: after `stop`, build a new engine to start
/// again.
pub struct ClockEngine {
    interval: TimeDuration,
    delay: TimeDuration,
    shared: Arc<Shared>,
    scheduler: Option<Scheduler>,
}

impl ClockEngine {
    /// Creates a new engine showing the full delay remaining.
    ///
    /// # Errors
    ///
    /// Returns `ClockError::InvalidInterval` if the interval is zero.
    pub fn new(
        interval: TimeDuration,
        delay: TimeDuration,
        sink: Arc<dyn TickSink>,
        audio: Arc<dyn AudioTrigger>,
    ) -> Result<Self, ClockError> {
        if interval.total_seconds() == 0 {
            return Err(ClockError::InvalidInterval);
        }

        Ok(Self {
            interval,
            delay,
            shared: Arc::new(Shared {
                state: Mutex::new(ClockState::new(delay)),
                countdown: Mutex::new(None),
                sink,
                audio,
            }),
            scheduler: None,
        })
    }

    /// Starts the clock.
    ///
    /// Schedules, relative to now:
    /// - the countdown display tick, every second from now until the delay
    ///   elapses
    /// - the switch to counting up, once, when the delay elapses
    /// - the count-up display tick, every second from the delay on
    /// - the audio cue, first ending with the delay, then every interval
    ///
    /// Returns immediately; all ticks run on the tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ClockError::AlreadyStarted` or `ClockError::Stopped` if the
    /// engine was used before, and `ClockError::SchedulerUnavailable` if
    /// there is no tokio runtime to run the ticks on.
    pub fn start(&mut self) -> Result<(), ClockError> {
        if self.scheduler.is_some() {
            return Err(ClockError::AlreadyStarted);
        }
        if self.shared.state.lock().is_stopped() {
            return Err(ClockError::Stopped);
        }

        let mut scheduler = Scheduler::new()?;
        let reference = Instant::now();
        let delay = Duration::from_secs(self.delay.total_seconds());
        let interval = Duration::from_secs(self.interval.total_seconds());
        let cue_offset = first_cue_offset(delay, self.shared.audio.duration_ms());

        info!(
            "Clock started: delay {}, interval {}, first cue at +{}ms",
            self.delay,
            self.interval,
            cue_offset.as_millis()
        );

        if delay.is_zero() {
            self.shared.switch_phase();
        } else {
            let shared = Arc::clone(&self.shared);
            let countdown = scheduler.every(reference, TICK, MissedTickBehavior::Skip, move || {
                shared.countdown_tick(reference)
            });
            *self.shared.countdown.lock() = Some(countdown);
        }

        let shared = Arc::clone(&self.shared);
        scheduler.once(reference + delay, move || shared.switch_phase());

        let shared = Arc::clone(&self.shared);
        scheduler.every(reference + delay, TICK, MissedTickBehavior::Skip, move || {
            shared.countup_tick(reference)
        });

        let shared = Arc::clone(&self.shared);
        scheduler.every(
            reference + cue_offset,
            interval,
            MissedTickBehavior::Burst,
            move || shared.cue_tick(),
        );

        self.scheduler = Some(scheduler);
        Ok(())
    }

    /// Stops the clock.
    ///
    /// When this returns, no further frame is rendered and no further cue is
    /// played. Calling it again does nothing.
    pub fn stop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            if state.is_stopped() {
                return;
            }
            state.mark_stopped();
        }

        self.shared.countdown.lock().take();
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.cancel_all();
        }
        info!("Clock stopped");
    }

    /// Returns the current phase.
    pub fn phase(&self) -> ClockPhase {
        self.shared.state.lock().phase()
    }

    /// Returns true between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some() && !self.shared.state.lock().is_stopped()
    }

    /// Returns the cue interval.
    pub fn interval(&self) -> TimeDuration {
        self.interval
    }

    /// Returns the countdown delay.
    pub fn delay(&self) -> TimeDuration {
        self.delay
    }
}

impl Drop for ClockEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for ClockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClockEngine")
            .field("interval", &self.interval)
            .field("delay", &self.delay)
            .field("state", &*self.shared.state.lock())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
