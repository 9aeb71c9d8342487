//! Cancel-then-reschedule deadline for trailing-edge debouncing.
//!
//! The deadline is a `tokio::time::Instant`, so a session driven by tokio's
//! paused clock can be stepped deterministically in tests.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending deadline with `now + delay`.
    pub fn schedule(&mut self, now: Instant) -> Instant {
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        deadline
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
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

    const DELAY: Duration = Duration::from_millis(3000);

    #[test]
    fn nothing_pending_initially() {
        let mut debounce = Debounce::new(DELAY);
        assert!(!debounce.is_pending());
        assert!(!debounce.take_due(Instant::now()));
    }

    #[test]
    fn reschedule_pushes_deadline_out() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(DELAY);
        debounce.schedule(t0);
        debounce.schedule(t0 + Duration::from_millis(2900));

        assert!(!debounce.take_due(t0 + DELAY));
        assert!(debounce.take_due(t0 + Duration::from_millis(5900)));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn cancel_clears_pending_deadline() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(DELAY);
        debounce.schedule(t0);
        assert!(debounce.cancel());
        assert!(!debounce.cancel());
        assert!(!debounce.take_due(t0 + DELAY * 2));
    }
}
