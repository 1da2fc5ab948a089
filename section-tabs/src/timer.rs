//! Cancellable timers driven by the host's clock.
//!
//! Nothing here reads time on its own. Deadlines are absolute `now_ms` values in the host's
//! clock, and the owner polls with the current time.

use alloc::vec::Vec;

/// A single-slot timer: scheduling again replaces any deadline that has not fired yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Debounce {
    delay_ms: u64,
    deadline: Option<u64>,
}

impl Debounce {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arms the timer `delay_ms` after `now_ms`, cancelling the previous deadline.
    ///
    /// Returns the new deadline.
    pub fn schedule(&mut self, now_ms: u64) -> u64 {
        let deadline = now_ms.saturating_add(self.delay_ms);
        self.deadline = Some(deadline);
        deadline
    }

    /// Returns `true` if a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Disarms the timer and returns `true` when its deadline has been reached.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now_ms => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Identity of a timer scheduled on a [`TimerQueue`].
///
/// Ids grow monotonically, so they also encode scheduling order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct TimerEntry<T> {
    id: TimerId,
    deadline: u64,
    payload: T,
}

/// A set of independently cancellable timers carrying a payload.
///
/// Due timers are popped in deadline order; timers sharing a deadline pop in scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: Vec<TimerEntry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn schedule(&mut self, deadline_ms: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(TimerEntry {
            id,
            deadline: deadline_ms,
            payload,
        });
        id
    }

    /// Removes a timer that has not fired yet and returns its payload.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).payload)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes and returns the earliest timer whose deadline is `<= now_ms`, together with that
    /// deadline.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(u64, T)> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now_ms)
            .min_by_key(|(_, e)| (e.deadline, e.id))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(pos);
        Some((entry.deadline, entry.payload))
    }
}
