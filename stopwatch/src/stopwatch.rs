use std::time::Duration;

use thiserror::Error;

use crate::clock::Clock;

/// A violation of the stopwatch start/stop contract.
///
/// In the single-threaded binary these indicate a scheduling bug rather than
/// user error, so callers treat them as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StopwatchStateError {
    /// [`Stopwatch::start`] was called while the stopwatch was running.
    #[error("the stopwatch is already running")]
    AlreadyRunning,
    /// [`Stopwatch::stop`] was called while the stopwatch was not running.
    #[error("the stopwatch is not running")]
    NotRunning,
}

/// A stopwatch which accumulates running time across start/stop cycles.
///
/// All arithmetic is done on [`Duration`], which keeps time as a whole-second
/// and sub-second pair with carry-correct addition and subtraction, so long
/// runs do not lose precision. Saturating operations are used throughout so
/// the accumulated time can never wrap.
#[derive(Debug, Clone)]
pub struct Stopwatch<C> {
    clock: C,
    /// The clock sample taken at the last [`Stopwatch::start`]; `Some`
    /// exactly while the stopwatch is running.
    started_at: Option<Duration>,
    /// The time accumulated by completed runs. Only a [`Stopwatch::stop`]
    /// transition changes this, and only upward.
    total: Duration,
}

impl<C: Clock> Stopwatch<C> {
    /// Create a stopwatch in the stopped state with zero accumulated time.
    pub fn new(clock: C) -> Stopwatch<C> {
        Stopwatch {
            clock,
            started_at: None,
            total: Duration::ZERO,
        }
    }

    /// Start the stopwatch.
    pub fn start(&mut self) -> Result<(), StopwatchStateError> {
        if self.started_at.is_some() {
            return Err(StopwatchStateError::AlreadyRunning);
        }

        self.started_at = Some(self.clock.now());
        Ok(())
    }

    /// Stop the stopwatch, folding the duration of the current run into the
    /// accumulated total.
    pub fn stop(&mut self) -> Result<(), StopwatchStateError> {
        let started_at = self
            .started_at
            .take()
            .ok_or(StopwatchStateError::NotRunning)?;

        let run = self.clock.now().saturating_sub(started_at);
        self.total = self.total.saturating_add(run);

        Ok(())
    }

    /// Get the total running time of the stopwatch.
    ///
    /// This is a pure read: while running it adds the live run time to the
    /// accumulated total without mutating any state, and while stopped it
    /// returns the accumulated total unchanged.
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => {
                let run = self.clock.now().saturating_sub(started_at);
                self.total.saturating_add(run)
            }
            None => self.total,
        }
    }

    /// Returns `true` if the stopwatch is currently running.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}
