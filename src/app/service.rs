//! Poll loop driver — the hexagonal core.
//!
//! [`Controller`] owns the evaluator, the output bank and the pulse
//! scheduler, plus the input/clock/timer adapters injected at
//! construction.  Each cycle it first applies pulse-offs that fired since
//! the previous cycle, then evaluates every binding in table order at a
//! single `now`.
//!
//! ```text
//!  InputPort ──▶ ┌──────────────────────────┐ ──▶ OutputPort
//!  ClockPort ──▶ │        Controller        │ ──▶ EventSink
//!                │ Evaluator · PulseSched.  │ ──▶ TimerPort ──┐
//!                └──────────────────────────┘                 │
//!                          ▲        ExpiryQueue               │
//!                          └──────────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::bindings::{Bindings, InputId, OutputId, validate_bindings};
use crate::config::ControllerConfig;
use crate::control::evaluator::{Action, ChannelState, Evaluator};
use crate::control::outputs::OutputBank;
use crate::control::pulse::PulseScheduler;
use crate::error::Result;
use crate::events::ExpiryQueue;

use super::events::ControllerEvent;
use super::ports::{ClockPort, EventSink, InputPort, OutputPort, Tick, TimerPort};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller<'q, I, O, C, T>
where
    I: InputPort,
    O: OutputPort,
    C: ClockPort,
    T: TimerPort,
{
    config: ControllerConfig,
    bindings: Bindings,
    evaluator: Evaluator,
    inputs: I,
    outputs: OutputBank<O>,
    pulses: PulseScheduler<T>,
    clock: C,
    expiries: &'q ExpiryQueue,
    cycles: u64,
}

impl<'q, I, O, C, T> Controller<'q, I, O, C, T>
where
    I: InputPort,
    O: OutputPort,
    C: ClockPort,
    T: TimerPort,
{
    /// Validate `config` and `bindings` and wire up the adapters.
    ///
    /// `timer` must post its expiries to `expiries`.
    pub fn new(
        config: ControllerConfig,
        bindings: Bindings,
        inputs: I,
        outputs: O,
        clock: C,
        timer: T,
        expiries: &'q ExpiryQueue,
    ) -> Result<Self> {
        config.validate()?;
        validate_bindings(&bindings)?;

        Ok(Self {
            evaluator: Evaluator::new(config.hold_threshold_ms),
            config,
            bindings,
            inputs,
            outputs: OutputBank::new(outputs),
            pulses: PulseScheduler::new(timer),
            clock,
            expiries,
            cycles: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every bound output off.  Call once before the first cycle.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        let outputs = self.bindings.iter().map(|b| b.output);
        self.outputs.all_off(outputs);
        sink.emit(&ControllerEvent::Started {
            bindings: self.bindings.len(),
        });
        info!(
            "Controller started: {} bindings, hold>{}ms, default pulse {}ms, poll {}ms",
            self.bindings.len(),
            self.config.hold_threshold_ms,
            self.config.default_pulse_ms,
            self.config.poll_interval_ms
        );
    }

    /// Poll forever at the configured interval.
    pub fn run(&mut self, delay: &mut impl DelayNs, sink: &mut impl EventSink) -> ! {
        loop {
            self.poll_once(sink);
            delay.delay_ms(self.config.poll_interval_ms);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One poll cycle at the clock's current tick.
    pub fn poll_once(&mut self, sink: &mut impl EventSink) {
        let now = self.clock.now_ms();
        self.poll_at(now, sink);
    }

    /// One poll cycle at an explicit tick.
    pub fn poll_at(&mut self, now: Tick, sink: &mut impl EventSink) {
        self.cycles += 1;
        self.apply_expiries(sink);

        for binding in &self.bindings {
            let pulse_ms = binding.pulse_duration(&self.config);
            let action = self.evaluator.evaluate(
                binding,
                pulse_ms,
                now,
                &mut self.inputs,
                &mut self.outputs,
                &mut self.pulses,
            );

            let (input, output) = (binding.input, binding.output);
            let event = match action {
                Action::None | Action::Hold { started: false } => continue,
                Action::Armed => ControllerEvent::Armed { input, at: now },
                Action::Pulse { off_after_ms } => ControllerEvent::Pulsed {
                    input,
                    output,
                    off_after_ms,
                },
                Action::Hold { started: true } => ControllerEvent::HoldStarted { input, output },
                Action::Release { held_ms } => ControllerEvent::Released {
                    input,
                    output,
                    held_ms,
                },
            };
            sink.emit(&event);
        }
    }

    /// Switch off outputs whose latest pulse has expired.
    fn apply_expiries(&mut self, sink: &mut impl EventSink) {
        let expiries = self.expiries;
        expiries.drain(|expiry| {
            if self.pulses.accept(&expiry) {
                self.outputs.set(expiry.output, false);
                sink.emit(&ControllerEvent::PulseEnded {
                    output: expiry.output,
                });
            } else {
                debug!(
                    "out{} stale pulse-off (gen {}) ignored",
                    expiry.output.0, expiry.generation
                );
                sink.emit(&ControllerEvent::StalePulseIgnored {
                    output: expiry.output,
                    generation: expiry.generation,
                });
            }
        });
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Number of poll cycles run so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Last commanded level of `output`.
    pub fn output_level(&self, output: OutputId) -> bool {
        self.outputs.level(output)
    }

    pub fn is_tracked(&self, input: InputId) -> bool {
        self.evaluator.tracker().is_tracked(input)
    }

    pub fn trigger_tick(&self, input: InputId) -> Option<Tick> {
        self.evaluator.tracker().trigger_tick(input)
    }

    pub fn channel_state(&self, input: InputId, now: Tick) -> ChannelState {
        self.evaluator.channel_state(input, now)
    }

    // ── Adapter access ────────────────────────────────────────

    pub fn inputs_mut(&mut self) -> &mut I {
        &mut self.inputs
    }

    pub fn output_port(&self) -> &O {
        self.outputs.port()
    }

    pub fn output_port_mut(&mut self) -> &mut O {
        self.outputs.port_mut()
    }

    pub fn timer(&self) -> &T {
        self.pulses.timer()
    }

    pub fn timer_mut(&mut self) -> &mut T {
        self.pulses.timer_mut()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
