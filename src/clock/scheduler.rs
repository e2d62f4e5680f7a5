//! Task scheduling on the tokio runtime.
//!
//! Provides the three operations the clock needs: run every fixed period
//! starting at an instant, run once at an instant, and cancel everything.

use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{interval_at, sleep_until, Duration, Instant, MissedTickBehavior};
use tracing::debug;

use super::error::ClockError;

/// Owns the tasks spawned for one clock run.
#[derive(Debug)]
pub struct Scheduler {
    runtime: Handle,
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// Creates a scheduler bound to the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ClockError::SchedulerUnavailable` when called outside a
    /// tokio runtime.
    pub fn new() -> Result<Self, ClockError> {
        let runtime =
            Handle::try_current().map_err(|e| ClockError::SchedulerUnavailable(e.to_string()))?;
        Ok(Self {
            runtime,
            tasks: Vec::new(),
        })
    }

    /// Runs `task` at `first` and then every `period`.
    ///
    /// `missed` decides what happens when the runtime falls behind:
    /// `Burst` keeps a fixed rate anchored at `first`, `Skip` drops the
    /// missed firings.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn every<F>(
        &mut self,
        first: Instant,
        period: Duration,
        missed: MissedTickBehavior,
        mut task: F,
    ) -> AbortHandle
    where
        F: FnMut() + Send + 'static,
    {
        let handle = self.runtime.spawn(async move {
            let mut ticker = interval_at(first, period);
            ticker.set_missed_tick_behavior(missed);
            loop {
                ticker.tick().await;
                task();
            }
        });
        self.track(handle)
    }

    /// Runs `task` once at `at`. An instant in the past fires immediately.
    pub fn once<F>(&mut self, at: Instant, task: F) -> AbortHandle
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = self.runtime.spawn(async move {
            sleep_until(at).await;
            task();
        });
        self.track(handle)
    }

    /// Cancels every task spawned by this scheduler.
    pub fn cancel_all(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        debug!("Cancelling {} scheduled task(s)", self.tasks.len());
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    /// Returns the number of tasks spawned and not yet cancelled.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if no task is scheduled.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn track(&mut self, handle: JoinHandle<()>) -> AbortHandle {
        let abort = handle.abort_handle();
        self.tasks.push(handle);
        abort
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
