use std::io;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use signal_hook::consts::SIGINT;
use signal_hook::iterator::Signals;

const LOCK_POISONED: &str = "no stopwatch code panics while holding the event lock";

/// A one-shot cancellation event.
///
/// Clones share the same underlying event: triggering any clone releases
/// every thread blocked in [`ShutdownEvent::wait_timeout`] on any other
/// clone. Triggering is permanent; once triggered, all later waits return
/// immediately.
#[derive(Debug, Clone, Default)]
pub struct ShutdownEvent {
    inner: Arc<EventInner>,
}

#[derive(Debug, Default)]
struct EventInner {
    triggered: Mutex<bool>,
    condvar: Condvar,
}

impl ShutdownEvent {
    /// Create an event which has not been triggered.
    pub fn new() -> ShutdownEvent {
        ShutdownEvent::default()
    }

    /// Trigger the event, releasing every blocked waiter.
    pub fn trigger(&self) {
        let mut triggered = self.inner.triggered.lock().expect(LOCK_POISONED);
        *triggered = true;
        self.inner.condvar.notify_all();
    }

    /// Returns `true` if the event has been triggered.
    pub fn is_triggered(&self) -> bool {
        *self.inner.triggered.lock().expect(LOCK_POISONED)
    }

    /// Block until the event is triggered or `timeout` has elapsed, whichever
    /// comes first. Returns `true` iff the event was triggered.
    ///
    /// A zero timeout still observes a trigger that has already happened.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut triggered = self.inner.triggered.lock().expect(LOCK_POISONED);

        let Some(deadline) = Instant::now().checked_add(timeout) else {
            // A timeout too far ahead to represent cannot expire before the
            // event triggers.
            while !*triggered {
                triggered = self.inner.condvar.wait(triggered).expect(LOCK_POISONED);
            }
            return true;
        };

        while !*triggered {
            let now = Instant::now();
            if now >= deadline {
                break;
            }

            let (guard, _) = self
                .inner
                .condvar
                .wait_timeout(triggered, deadline - now)
                .expect(LOCK_POISONED);
            triggered = guard;
        }

        *triggered
    }

    /// Arrange for the event to be triggered when the process receives
    /// SIGINT.
    ///
    /// The listener runs on a background thread which exits after the first
    /// delivery; a second SIGINT while the process is already shutting down
    /// has no additional effect.
    pub fn listen_for_interrupt(&self) -> io::Result<()> {
        let mut signals = Signals::new([SIGINT])?;
        let event = self.clone();

        let _ = thread::Builder::new()
            .name("stopwatch-signal-listener".to_owned())
            .spawn(move || {
                if signals.forever().next().is_some() {
                    event.trigger();
                }
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;
    use std::time::Instant;

    use super::ShutdownEvent;

    #[test]
    fn an_untriggered_wait_times_out() {
        let event = ShutdownEvent::new();

        let before = Instant::now();
        let triggered = event.wait_timeout(Duration::from_millis(50));

        assert!(!triggered);
        assert!(before.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn triggering_releases_a_waiter_before_its_timeout() {
        let event = ShutdownEvent::new();

        let trigger_handle = {
            let event = event.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                event.trigger();
            })
        };

        let before = Instant::now();
        let triggered = event.wait_timeout(Duration::from_secs(60));

        assert!(triggered);
        assert!(before.elapsed() < Duration::from_secs(60));

        trigger_handle.join().expect("the trigger thread completes");
    }

    #[test]
    fn a_triggered_event_stays_triggered() {
        let event = ShutdownEvent::new();

        event.trigger();

        assert!(event.is_triggered());
        assert!(event.wait_timeout(Duration::ZERO));
        assert!(event.wait_timeout(Duration::from_millis(10)));
    }
}
