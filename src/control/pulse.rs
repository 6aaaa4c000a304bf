//! Pulse scheduler — arms the deferred pulse-off for an output.
//!
//! Each arm bumps the output's generation and hands a [`PulseExpiry`]
//! carrying it to the [`TimerPort`].  When expiries are drained, only the
//! one matching the current generation may switch the output off, so a
//! second pulse on the same output replaces the first (latest wins).
//! Firing does not look at input state.

use crate::app::ports::TimerPort;
use crate::bindings::{MAX_OUTPUTS, OutputId};
use crate::events::PulseExpiry;

pub struct PulseScheduler<T: TimerPort> {
    timer: T,
    generations: [u32; MAX_OUTPUTS],
}

impl<T: TimerPort> PulseScheduler<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            generations: [0; MAX_OUTPUTS],
        }
    }

    /// Arm a one-shot that turns `output` off after `delay_ms`.
    pub fn schedule_off(&mut self, output: OutputId, delay_ms: u32) {
        let Some(slot) = self.generations.get_mut(output.index()) else {
            return;
        };
        *slot = slot.wrapping_add(1);
        let expiry = PulseExpiry {
            output,
            generation: *slot,
        };
        self.timer.schedule_once(delay_ms, expiry);
    }

    /// `true` if `expiry` comes from the latest arm of its output.
    pub fn accept(&self, expiry: &PulseExpiry) -> bool {
        self.generations
            .get(expiry.output.index())
            .is_some_and(|&current| current == expiry.generation)
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}
