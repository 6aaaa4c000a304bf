//! Per-input trigger records.
//!
//! A record holds the tick at which an idle input was first seen active.
//! Its presence is the only "being tracked" signal: it is created on the
//! first active observation and removed when the evaluator resolves the
//! press (pulse or release).  The tick is never rewritten while tracked.

use crate::app::ports::Tick;
use crate::bindings::{InputId, MAX_INPUTS};

/// Fixed arena of trigger ticks indexed by [`InputId`].
#[derive(Debug, Clone)]
pub struct TriggerTracker {
    records: [Option<Tick>; MAX_INPUTS],
}

impl Default for TriggerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerTracker {
    pub const fn new() -> Self {
        Self {
            records: [None; MAX_INPUTS],
        }
    }

    pub fn is_tracked(&self, input: InputId) -> bool {
        self.trigger_tick(input).is_some()
    }

    /// Start tracking at `at`.  Idempotent: an existing record keeps its
    /// original tick.  Ids outside the arena are ignored (bindings are
    /// validated before the loop starts).
    pub fn begin_tracking(&mut self, input: InputId, at: Tick) {
        if let Some(slot) = self.records.get_mut(input.index()) {
            slot.get_or_insert(at);
        }
    }

    pub fn end_tracking(&mut self, input: InputId) {
        if let Some(slot) = self.records.get_mut(input.index()) {
            *slot = None;
        }
    }

    /// Milliseconds since tracking began, wraparound-safe.
    /// `None` if the input is not tracked.
    pub fn elapsed_since(&self, input: InputId, now: Tick) -> Option<u32> {
        self.trigger_tick(input).map(|start| now.wrapping_sub(start))
    }

    pub fn trigger_tick(&self, input: InputId) -> Option<Tick> {
        self.records.get(input.index()).copied().flatten()
    }

    pub fn tracked_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }
}
