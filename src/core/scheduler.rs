//! Virtual-time scheduling for a single-threaded event loop.
//!
//! Nothing here runs on its own. The owner advances the clock with
//! [`Scheduler::pop_due`] and drains the deferred queue and the animation
//! frame slot itself, which keeps every callback on the caller's stack.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::collections::VecDeque;
use std::hash::Hash;
use std::time::{Duration, Instant};

new_key_type! {
    pub struct TimerId;
}

#[derive(Debug)]
struct Timer<S, T> {
    slot: S,
    due: Instant,
    seq: u64,
    task: T,
}

/// Timers are addressed by a named slot; scheduling into an occupied slot
/// replaces the pending timer, which mirrors clear-then-set timeout code.
#[derive(Debug)]
pub struct Scheduler<S, T> {
    now: Instant,
    seq: u64,
    timers: SlotMap<TimerId, Timer<S, T>>,
    slots: FxHashMap<S, TimerId>,
    deferred: VecDeque<T>,
    frame: Option<T>,
}

impl<S, T> Scheduler<S, T>
where
    S: Copy + Eq + Hash,
{
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            seq: 0,
            timers: SlotMap::with_key(),
            slots: FxHashMap::default(),
            deferred: VecDeque::new(),
            frame: None,
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Moves the clock forward; never backwards.
    pub fn advance_to(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn schedule(&mut self, slot: S, delay: Duration, task: T) -> TimerId {
        self.cancel(slot);
        self.seq += 1;
        let id = self.timers.insert(Timer {
            slot,
            due: self.now + delay,
            seq: self.seq,
            task,
        });
        self.slots.insert(slot, id);
        id
    }

    pub fn cancel(&mut self, slot: S) -> bool {
        match self.slots.remove(&slot) {
            Some(id) => self.timers.remove(id).is_some(),
            None => false,
        }
    }

    pub fn is_scheduled(&self, slot: S) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Removes the earliest timer due at or before `target` and moves the
    /// clock to its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, target: Instant) -> Option<T> {
        let id = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= target)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(id, _)| id)?;
        let timer = self.timers.remove(id)?;
        self.slots.remove(&timer.slot);
        self.advance_to(timer.due);
        Some(timer.task)
    }

    pub fn defer(&mut self, task: T) {
        self.deferred.push_back(task);
    }

    pub fn pop_deferred(&mut self) -> Option<T> {
        self.deferred.pop_front()
    }

    pub fn request_frame(&mut self, task: T) {
        self.frame = Some(task);
    }

    pub fn cancel_frame(&mut self) -> bool {
        self.frame.take().is_some()
    }

    pub fn take_frame(&mut self) -> Option<T> {
        self.frame.take()
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
        self.slots.clear();
        self.deferred.clear();
        self.frame = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/scheduler.rs"]
mod tests;
