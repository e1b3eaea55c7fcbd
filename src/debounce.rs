//! Debounce channels and the clock they read.
//!
//! A [`Debounce`] holds at most one pending deadline. Scheduling again
//! replaces it, so a burst of edits commits once, `delay` after the last one.
//! Nothing runs in the background: the owner polls with
//! [`Debounce::fire_if_due`].

use chrono::{DateTime, TimeDelta, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Source of "now".
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Hand-driven clock for deterministic tests and replays. Clones share the
/// same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: Rc::new(Cell::new(start)) }
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// One debounce channel.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: TimeDelta,
    deadline: Option<DateTime<Utc>>,
}

impl Debounce {
    pub fn new(delay: TimeDelta) -> Self {
        Self { delay, deadline: None }
    }

    /// (Re)start the timer from `now`. A deadline past the representable
    /// range saturates and never fires.
    pub fn schedule(&mut self, now: DateTime<Utc>) {
        self.deadline = Some(now.checked_add_signed(self.delay).unwrap_or(DateTime::<Utc>::MAX_UTC));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clear the deadline and return true if it has passed.
    pub fn fire_if_due(&mut self, now: DateTime<Utc>) -> bool {
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

    #[test]
    fn rescheduling_pushes_the_deadline_back() {
        let clock = ManualClock::default();
        let mut channel = Debounce::new(TimeDelta::milliseconds(300));

        channel.schedule(clock.now());
        clock.advance(TimeDelta::milliseconds(200));
        channel.schedule(clock.now());
        clock.advance(TimeDelta::milliseconds(200));
        assert!(!channel.fire_if_due(clock.now()));

        clock.advance(TimeDelta::milliseconds(100));
        assert!(channel.fire_if_due(clock.now()));
        assert!(!channel.is_pending());
        assert!(!channel.fire_if_due(clock.now()));
    }

    #[test]
    fn cancel_clears_the_pending_deadline() {
        let clock = ManualClock::default();
        let mut channel = Debounce::new(TimeDelta::milliseconds(200));
        channel.schedule(clock.now());
        channel.cancel();
        clock.advance(TimeDelta::seconds(1));
        assert!(!channel.fire_if_due(clock.now()));
    }

    #[test]
    fn oversized_delay_saturates_instead_of_overflowing() {
        let clock = ManualClock::default();
        let mut channel = Debounce::new(TimeDelta::MAX);
        channel.schedule(clock.now());
        assert!(channel.is_pending());
        clock.advance(TimeDelta::days(365 * 1000));
        assert!(!channel.fire_if_due(clock.now()));
    }

    #[test]
    fn clones_of_manual_clock_share_time() {
        let clock = ManualClock::default();
        let other = clock.clone();
        clock.advance(TimeDelta::seconds(5));
        assert_eq!(other.now(), clock.now());
    }
}
