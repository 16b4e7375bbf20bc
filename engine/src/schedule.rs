//! Frame-driven task scheduling.
//!
//! A `Scheduler` holds delayed tasks on a virtual clock that only moves when the
//! owner advances it, so gameplay timing stays deterministic under test and
//! independent of wall-clock jitter in the frame loop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Pending<T> {
    due: Duration,
    // Insertion order; breaks ties between tasks due at the same instant.
    seq: u64,
    task: T,
}

impl<T> Pending<T> {
    fn key(&self) -> (Duration, u64) {
        (self.due, self.seq)
    }
}

impl<T> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Pending<T> {}

impl<T> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Pending<T> {
    // Reversed so the max-heap yields the earliest task first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    pending: BinaryHeap<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedules `task` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due: self.now.saturating_add(delay),
            seq,
            task,
        });
    }

    /// Drops every pending task and returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Pops the earliest task due at or before `deadline`, moving the clock to
    /// that task's due time.
    ///
    /// Tasks scheduled while draining are relative to the popped task's due time,
    /// so a chain of short delays inside one long frame still fires in order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<T> {
        if self.pending.peek()?.due > deadline {
            return None;
        }
        let next = self.pending.pop()?;
        self.now = self.now.max(next.due);
        Some(next.task)
    }

    /// Moves the clock forward to `deadline` without firing anything.
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}
