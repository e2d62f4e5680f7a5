//! Display counters and phase of the clock.
//!
//! The counters advance by one per display tick, but a tick is never trusted
//! to have landed on an exact second boundary: whenever the second counter
//! rolls over, the minute is recomputed from the real elapsed time since the
//! clock started.
//!
//! Only the minute is resynced. The second is pinned to 59 (counting down)
//! or 0 (counting up), so sub-minute error from late ticks is carried until
//! the next rollover.

use std::time::Duration;

use crate::types::{ClockPhase, TimeDuration};

/// Counters, phase and stop flag shared by the scheduled clock tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    phase: ClockPhase,
    current_minute: i64,
    current_second: i64,
    delay_seconds: i64,
    stopped: bool,
}

impl ClockState {
    /// Creates a state showing the full delay remaining.
    pub fn new(delay: TimeDuration) -> Self {
        Self {
            phase: ClockPhase::CountingDown,
            current_minute: i64::from(delay.minutes()),
            current_second: i64::from(delay.seconds()),
            delay_seconds: delay.total_seconds() as i64,
            stopped: false,
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    /// Returns the raw `(minute, second)` counters.
    pub fn counters(&self) -> (i64, i64) {
        (self.current_minute, self.current_second)
    }

    /// Returns true once the clock has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub(crate) fn mark_stopped(&mut self) {
        self.stopped = true;
    }

    /// Switches to counting up.
    ///
    /// Returns true if this call performed the switch, false if the clock
    /// was already counting up. The switch never goes back.
    pub fn switch_to_counting_up(&mut self) -> bool {
        if self.phase == ClockPhase::CountingUp {
            return false;
        }
        self.phase = ClockPhase::CountingUp;
        true
    }

    /// Produces the next countdown frame (`-MM:SS`) and steps the counters.
    ///
    /// Returns `None` once the clock counts up.
    pub fn countdown_frame(&mut self, elapsed: Duration) -> Option<String> {
        if self.phase != ClockPhase::CountingDown {
            return None;
        }
        if self.current_second < 0 {
            self.resync_countdown(elapsed);
        }
        let frame = format!("-{:02}:{:02}", self.current_minute, self.current_second);
        self.current_second -= 1;
        Some(frame)
    }

    /// Produces the next count-up frame (`MM:SS`) and steps the counters.
    pub fn countup_frame(&mut self, elapsed: Duration) -> String {
        if self.current_second == 60 || self.current_second < 0 {
            self.resync_countup(elapsed);
        }
        let frame = format!("{:02}:{:02}", self.current_minute, self.current_second);
        self.current_second += 1;
        frame
    }

    fn resync_countdown(&mut self, elapsed: Duration) {
        let remaining = self.delay_seconds - whole_seconds(elapsed);
        self.current_minute = remaining.div_euclid(60).max(0);
        self.current_second = 59;
    }

    // Minutes since the delay elapsed, not since the clock started; adding
    // the delay here would overshoot by the delay's minutes.
    fn resync_countup(&mut self, elapsed: Duration) {
        let since_delay = whole_seconds(elapsed) - self.delay_seconds;
        self.current_minute = since_delay.div_euclid(60).max(0);
        self.current_second = 0;
    }
}

fn whole_seconds(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
}
