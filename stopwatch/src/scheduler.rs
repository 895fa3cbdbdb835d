use std::io;
use std::time::Duration;
use std::time::Instant;

use crate::clock::Clock;
use crate::rendering::Renderer;
use crate::stopwatch::Stopwatch;
use crate::termination::ShutdownEvent;

/// Configuration for [`run_refresh_loop`].
#[derive(Debug, Clone, Copy)]
pub struct RefreshOptions {
    /// The time between two periodic renders.
    ///
    /// A zero interval is legal and means the loop renders as fast as the
    /// wait primitive allows; cancellation is still observed on every lap.
    pub interval: Duration,
    /// When `true`, periodic renders are suppressed entirely. The elapsed
    /// time is still tracked, and the final render at termination still
    /// happens.
    pub quiet: bool,
}

/// Periodically render the elapsed time of `stopwatch` until `shutdown`
/// triggers, then render one final value and return.
///
/// Render deadlines are fixed at `start + n * interval`, so a slow render
/// does not shift the cadence of later ticks. The wait for the next deadline
/// is released as soon as `shutdown` triggers, regardless of the interval, so
/// termination latency is not bounded by the refresh interval.
pub fn run_refresh_loop<C: Clock, R: Renderer>(
    stopwatch: &Stopwatch<C>,
    shutdown: &ShutdownEvent,
    options: RefreshOptions,
    renderer: &mut R,
) -> io::Result<()> {
    let mut next_deadline = Some(Instant::now());

    loop {
        next_deadline = next_deadline.and_then(|deadline| deadline.checked_add(options.interval));

        loop {
            let remaining = match next_deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                // The deadline does not fit in an Instant; only the shutdown
                // event can end this wait.
                None => Duration::MAX,
            };

            if remaining.is_zero() {
                break;
            }

            if shutdown.wait_timeout(remaining) {
                renderer.finish(stopwatch.elapsed())?;
                return Ok(());
            }
        }

        // With a zero interval the wait above never blocks, so the trigger
        // has to be observed here for cancellation to stay prompt.
        if shutdown.is_triggered() {
            renderer.finish(stopwatch.elapsed())?;
            return Ok(());
        }

        if !options.quiet {
            renderer.render_tick(stopwatch.elapsed())?;
        }
    }
}
