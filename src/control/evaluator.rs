//! Press-duration evaluator — the per-input timing state machine.
//!
//! ```text
//!            triggered                 elapsed > threshold, still triggered
//!   IDLE ───────────────▶ TRACKING ───────────────────────────────▶ HELD
//!    ▲                       │                                        │
//!    │   released early      │                 released               │
//!    └──── (pulse output) ───┘◀──────────── (output off) ─────────────┘
//! ```
//!
//! | Tracked | Triggered | Elapsed vs threshold | Decision  |
//! |---------|-----------|----------------------|-----------|
//! | no      | yes       | —                    | `Arm`     |
//! | no      | no        | —                    | `Idle`    |
//! | yes     | no        | `<`                  | `Pulse`   |
//! | yes     | yes       | `>`                  | `Hold`    |
//! | yes     | no        | `>=`                 | `Release` |
//! | yes     | yes       | `<=`                 | `Wait`    |
//!
//! Elapsed exactly equal to the threshold while still triggered is not yet
//! a hold; it resolves on a later cycle.  A release at exactly the
//! threshold is a plain release (output off, no pulse).

use log::{debug, info};

use crate::app::ports::{InputPort, OutputPort, Tick, TimerPort};
use crate::bindings::{ChannelBinding, InputId};

use super::outputs::OutputBank;
use super::pulse::PulseScheduler;
use super::tracker::TriggerTracker;

/// Outcome of the decision table for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Idle,
    Arm,
    Wait,
    Pulse,
    Hold,
    Release,
}

/// What [`Evaluator::evaluate`] did this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No state change.
    None,
    /// Tracking began.
    Armed,
    /// Output switched on with a pulse-off armed.
    Pulse { off_after_ms: u32 },
    /// Output driven on; `started` is set on the cycle it first went on.
    Hold { started: bool },
    /// Output switched off after `held_ms` of activation.
    Release { held_ms: u32 },
}

/// Position of an input in the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Idle,
    Tracking,
    Held,
}

pub struct Evaluator {
    tracker: TriggerTracker,
    threshold_ms: u32,
}

impl Evaluator {
    pub fn new(threshold_ms: u32) -> Self {
        Self {
            tracker: TriggerTracker::new(),
            threshold_ms,
        }
    }

    pub fn threshold_ms(&self) -> u32 {
        self.threshold_ms
    }

    pub fn tracker(&self) -> &TriggerTracker {
        &self.tracker
    }

    /// Pure decision table.  `elapsed` is `None` when the input is untracked.
    pub fn classify(elapsed: Option<u32>, triggered: bool, threshold_ms: u32) -> Decision {
        match elapsed {
            None if triggered => Decision::Arm,
            None => Decision::Idle,
            Some(e) if e < threshold_ms && !triggered => Decision::Pulse,
            Some(e) if e > threshold_ms && triggered => Decision::Hold,
            Some(_) if !triggered => Decision::Release,
            Some(_) => Decision::Wait,
        }
    }

    /// Observe one binding at `now` and apply the resulting action.
    pub fn evaluate<I, O, T>(
        &mut self,
        binding: &ChannelBinding,
        pulse_ms: u32,
        now: Tick,
        inputs: &mut I,
        outputs: &mut OutputBank<O>,
        pulses: &mut PulseScheduler<T>,
    ) -> Action
    where
        I: InputPort,
        O: OutputPort,
        T: TimerPort,
    {
        let input = binding.input;
        let output = binding.output;
        let triggered = !inputs.read_level(input);
        let elapsed = self.tracker.elapsed_since(input, now);

        match Self::classify(elapsed, triggered, self.threshold_ms) {
            Decision::Idle | Decision::Wait => Action::None,
            Decision::Arm => {
                self.tracker.begin_tracking(input, now);
                debug!("in{} armed at {}", input.0, now);
                Action::Armed
            }
            Decision::Pulse => {
                outputs.set(output, true);
                pulses.schedule_off(output, pulse_ms);
                self.tracker.end_tracking(input);
                info!("in{} short press -> out{} pulse {}ms", input.0, output.0, pulse_ms);
                Action::Pulse {
                    off_after_ms: pulse_ms,
                }
            }
            Decision::Hold => {
                let started = outputs.set(output, true);
                if started {
                    info!("in{} held -> out{} on", input.0, output.0);
                }
                Action::Hold { started }
            }
            Decision::Release => {
                outputs.set(output, false);
                self.tracker.end_tracking(input);
                let held_ms = elapsed.unwrap_or(0);
                info!("in{} released after {}ms -> out{} off", input.0, held_ms, output.0);
                Action::Release { held_ms }
            }
        }
    }

    /// State-machine position as of the last observation.  A tracked input
    /// past the threshold is reported `Held`; release is only seen on the
    /// next evaluation.
    pub fn channel_state(&self, input: InputId, now: Tick) -> ChannelState {
        match self.tracker.elapsed_since(input, now) {
            None => ChannelState::Idle,
            Some(e) if e > self.threshold_ms => ChannelState::Held,
            Some(_) => ChannelState::Tracking,
        }
    }
}
