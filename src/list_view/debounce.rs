//! Trailing-edge debouncer driven by explicit instants.

use std::time::{Duration, Instant};

/// Delay applied to search keystrokes before the term is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(700);

/// Holds at most one pending value and releases it once its delay elapsed.
///
/// Scheduling a new value cancels the pending one and restarts the delay.
/// The caller owns the clock and polls with the current instant.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `value` for `now + delay`, returning that deadline.
    pub fn schedule(&mut self, value: T, now: Instant) -> Instant {
        let deadline = now + self.delay;
        self.pending = Some((value, deadline));
        deadline
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Releases the pending value when its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_only_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(700));
        debouncer.schedule("ann", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(699)), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(700)), Some("ann"));
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn new_value_restarts_the_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(700));
        debouncer.schedule("a", start);
        debouncer.schedule("an", start + Duration::from_millis(500));

        assert_eq!(debouncer.poll(start + Duration::from_millis(800)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(1200)),
            Some("an")
        );
    }

    #[test]
    fn cancel_discards_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(700));
        debouncer.schedule(1, start);

        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);
    }
}
