//! Clock-free debouncing.
//!
//! Keystrokes update the input box immediately; the shared search filter is
//! only written once the input has been quiet for the debounce delay. The
//! timer is plain data (value + deadline) so the transitions are pure
//! functions of `(previous timer, input, now)` and tests never sleep.

use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub struct PendingTimer<T> {
    pub value: T,
    pub deadline: Instant,
}

/// What scheduling did to the previous timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEffect {
    /// No timer was pending.
    Scheduled,
    /// A pending timer was cancelled and replaced.
    Rescheduled,
}

/// Cancel-and-reschedule: the newest value always wins.
pub fn schedule<T>(
    previous: Option<PendingTimer<T>>,
    value: T,
    now: Instant,
    delay: Duration,
) -> (PendingTimer<T>, TimerEffect) {
    let effect = if previous.is_some() {
        TimerEffect::Rescheduled
    } else {
        TimerEffect::Scheduled
    };
    (
        PendingTimer {
            value,
            deadline: now + delay,
        },
        effect,
    )
}

/// Fire the timer if its deadline has passed. Returns the remaining timer
/// (unchanged when not yet due) and the value to apply, if any.
pub fn fire<T>(pending: Option<PendingTimer<T>>, now: Instant) -> (Option<PendingTimer<T>>, Option<T>) {
    match pending {
        Some(timer) if now >= timer.deadline => (None, Some(timer.value)),
        other => (other, None),
    }
}

/// Owned wrapper around [`schedule`] / [`fire`] for a single input box.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<PendingTimer<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) -> TimerEffect {
        let (timer, effect) = schedule(self.pending.take(), value, now, self.delay);
        self.pending = Some(timer);
        effect
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let (rest, fired) = fire(self.pending.take(), now);
        self.pending = rest;
        fired
    }

    /// Apply the pending value right away (e.g. on Enter).
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|t| t.value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|t| t.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
