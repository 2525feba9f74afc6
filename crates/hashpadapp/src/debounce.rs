//! Trailing-edge debouncing as a plain value.
//!
//! A [`Debouncer`] is a single cancellable timer slot: `arm` (re)schedules it,
//! `cancel` drops it, and `fire` reports whether it came due. Time is supplied
//! by the caller as a monotonic offset, so the same type works under a real
//! clock, an event loop, or a test that steps time by hand.
//!
//! Each `arm` pushes the deadline out again, which is what coalesces a burst of
//! edits into a single save fired `window` after the last one.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedule (or reschedule) the timer for `now + window`.
    pub fn arm(&mut self, now: Duration) {
        self.deadline = Some(now + self.window);
    }

    /// Drop a pending timer. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Consume the timer if it is due at `now`.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_window() {
        let mut timer = Debouncer::new(ms(500));
        timer.arm(ms(0));
        assert!(!timer.fire(ms(499)));
        assert!(timer.fire(ms(500)));
        assert!(!timer.is_armed());
        assert!(!timer.fire(ms(600)));
    }

    #[test]
    fn test_rearm_coalesces_burst() {
        let mut timer = Debouncer::new(ms(500));
        for t in [0, 100, 200, 300] {
            timer.arm(ms(t));
            assert!(!timer.fire(ms(t)));
        }
        assert_eq!(timer.deadline(), Some(ms(800)));
        assert!(!timer.fire(ms(700)));
        assert!(timer.fire(ms(800)));
    }

    #[test]
    fn test_cancel() {
        let mut timer = Debouncer::new(ms(150));
        assert!(!timer.cancel());
        timer.arm(ms(10));
        assert!(timer.cancel());
        assert!(!timer.fire(ms(1_000)));
    }
}
