//! Integration tests: Controller → Evaluator → outputs / pulse timers.
//!
//! Press timelines run against the mock board at the default 10 ms poll
//! cadence with a 1000 ms hold threshold.

use relaypulse::app::events::ControllerEvent;
use relaypulse::app::ports::ClockPort;
use relaypulse::app::service::Controller;
use relaypulse::bindings::{Bindings, ChannelBinding, InputId, OutputId, default_bindings};
use relaypulse::config::ControllerConfig;
use relaypulse::control::evaluator::ChannelState;
use relaypulse::error::{ConfigError, Error};
use relaypulse::events::{ExpiryQueue, PulseExpiry};

use crate::mock_hw::{MockInputs, Sim};

fn single(pulse_ms: Option<u32>) -> Bindings {
    let mut b = Bindings::new();
    let binding = ChannelBinding::new(0, 0);
    let binding = match pulse_ms {
        Some(ms) => binding.with_pulse(ms),
        None => binding,
    };
    b.push(binding).unwrap();
    b
}

// ── Short press → pulse ──────────────────────────────────────

#[test]
fn short_press_pulses_for_default_duration() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(0);
    assert!(sim.ctl.is_tracked(InputId(0)));
    sim.run_until(390);
    assert!(!sim.ctl.output_level(OutputId(0)), "no output while tracking");

    sim.release(0);
    sim.run_until(1500);

    assert_eq!(sim.transitions(0), [(400, true), (900, false)]);
    assert!(!sim.ctl.is_tracked(InputId(0)));
    assert_eq!(sim.ctl.channel_state(InputId(0), 1500), ChannelState::Idle);
}

#[test]
fn short_press_emits_pulse_then_pulse_end() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(0);
    sim.release(0);
    sim.run_until(600);

    let events: Vec<_> = sim.sink.events.iter().skip(1).copied().collect();
    assert_eq!(
        events,
        [
            (0, ControllerEvent::Armed { input: InputId(0), at: 0 }),
            (
                10,
                ControllerEvent::Pulsed {
                    input: InputId(0),
                    output: OutputId(0),
                    off_after_ms: 500
                }
            ),
            (510, ControllerEvent::PulseEnded { output: OutputId(0) }),
        ]
    );
}

// ── Long press → hold ────────────────────────────────────────

#[test]
fn long_press_holds_until_release() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(0);
    sim.run_until(1100);
    assert!(sim.ctl.output_level(OutputId(0)), "on by 1100");
    assert_eq!(sim.ctl.channel_state(InputId(0), 1100), ChannelState::Held);

    sim.run_until(1990);
    sim.release(0);
    sim.run_until(2500);

    assert_eq!(sim.transitions(0), [(1010, true), (2000, false)]);
    assert!(!sim.ctl.is_tracked(InputId(0)));
    assert!(sim.ctl.timer().armed.is_empty() && sim.ctl.timer().fired.is_empty());
    assert_eq!(
        sim.sink.count(|e| matches!(e, ControllerEvent::HoldStarted { .. })),
        1,
        "hold refreshes are not reported"
    );
    assert_eq!(
        sim.sink.events.last(),
        Some(&(
            2000,
            ControllerEvent::Released {
                input: InputId(0),
                output: OutputId(0),
                held_ms: 2000
            }
        ))
    );
}

#[test]
fn hold_rewrites_output_every_cycle() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(0);
    sim.run_until(1100);

    // 1010..=1100 is ten cycles, each an idempotent ON write.
    let on_writes = sim.outputs().writes.iter().filter(|w| w.on).count();
    assert_eq!(on_writes, 10);
}

#[test]
fn exact_threshold_while_held_waits_one_more_cycle() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(0);
    sim.tick_at(1000);
    assert!(!sim.ctl.output_level(OutputId(0)));
    assert_eq!(sim.ctl.channel_state(InputId(0), 1000), ChannelState::Tracking);

    sim.tick_at(1001);
    assert!(sim.ctl.output_level(OutputId(0)));
}

#[test]
fn release_at_exact_threshold_switches_off_without_pulse() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(0);
    sim.release(0);
    sim.tick_at(1000);

    assert!(!sim.ctl.is_tracked(InputId(0)));
    assert!(sim.ctl.timer().armed.is_empty());
    assert!(sim.transitions(0).is_empty());
}

// ── Idempotence / no-op ──────────────────────────────────────

#[test]
fn trigger_tick_is_write_once_while_pressed() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(20);
    sim.run_until(900);
    assert_eq!(sim.ctl.trigger_tick(InputId(0)), Some(20));
}

#[test]
fn idle_released_input_changes_nothing() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));
    let boot_writes = sim.outputs().writes.len();

    sim.run_until(3000);

    assert_eq!(sim.outputs().writes.len(), boot_writes);
    assert!(!sim.ctl.is_tracked(InputId(0)));
    assert_eq!(sim.sink.events.len(), 1, "only Started");
    assert_eq!(sim.ctl.cycles(), 300);
}

// ── Independence ─────────────────────────────────────────────

#[test]
fn channels_with_different_pulses_are_independent() {
    let queue = ExpiryQueue::new();
    let mut bindings = Bindings::new();
    bindings.push(ChannelBinding::new(0, 0)).unwrap();
    bindings.push(ChannelBinding::new(1, 1).with_pulse(250)).unwrap();
    let mut sim = Sim::new(&queue, bindings);

    sim.press(0);
    sim.press(1);
    sim.tick_at(0);
    sim.release(0);
    sim.release(1);
    sim.run_until(1000);

    assert_eq!(sim.transitions(0), [(10, true), (510, false)]);
    assert_eq!(sim.transitions(1), [(10, true), (260, false)]);
}

#[test]
fn factory_table_button_drives_shared_output() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, default_bindings());

    // Button 2 (input 9) is paralleled with field input 2 on output 1.
    sim.press(9);
    sim.tick_at(0);
    sim.release(9);
    sim.run_until(500);

    assert_eq!(sim.transitions(1), [(10, true), (260, false)]);
    for other in [0u8, 2, 3, 4, 5, 6, 7] {
        assert!(sim.transitions(other).is_empty(), "output {other} untouched");
    }
}

// ── Overlapping pulses ───────────────────────────────────────

#[test]
fn second_pulse_replaces_pending_pulse_off() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(0);
    sim.release(0);
    sim.run_until(300);
    sim.press(0);
    sim.run_until(400);
    sim.release(0);
    sim.run_until(1500);

    // First pulse ON at 10 would end at 510; the re-pulse at 410 moves it to 910.
    assert_eq!(sim.transitions(0), [(10, true), (910, false)]);
    assert_eq!(
        sim.sink.count(|e| matches!(e, ControllerEvent::StalePulseIgnored { .. })),
        1
    );
}

#[test]
fn pulse_off_fires_even_if_input_pressed_again() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, single(None));

    sim.press(0);
    sim.tick_at(0);
    sim.release(0);
    sim.run_until(100);
    sim.press(0);
    sim.run_until(700);

    // Tracking again since 110, but the pulse-off at 510 still lands.
    assert!(sim.ctl.is_tracked(InputId(0)));
    assert_eq!(sim.transitions(0), [(10, true), (510, false)]);
}

// ── Tick wraparound ──────────────────────────────────────────

#[test]
fn press_spanning_tick_wraparound() {
    let queue = ExpiryQueue::new();
    let t0 = u32::MAX - 195;
    let mut sim = Sim::starting_at(&queue, single(None), t0);

    sim.press(0);
    sim.tick_at(t0);
    sim.release(0);
    sim.tick_at(t0.wrapping_add(400));
    assert!(sim.ctl.output_level(OutputId(0)));

    sim.run_until(t0.wrapping_add(1000));
    assert_eq!(
        sim.transitions(0),
        [(t0.wrapping_add(400), true), (t0.wrapping_add(900), false)]
    );
}

#[test]
fn hold_spanning_tick_wraparound() {
    let queue = ExpiryQueue::new();
    let t0 = u32::MAX - 500;
    let mut sim = Sim::starting_at(&queue, single(None), t0);

    sim.press(0);
    sim.tick_at(t0);
    sim.run_until(t0.wrapping_add(1200));
    assert!(sim.ctl.output_level(OutputId(0)));
    assert!(sim.ctl.timer().armed.is_empty());
}

// ── Construction ─────────────────────────────────────────────

struct NoTimer;

impl relaypulse::app::ports::TimerPort for NoTimer {
    fn schedule_once(&mut self, _delay_ms: u32, _expiry: PulseExpiry) {}
}

struct NoOutputs;

impl relaypulse::app::ports::OutputPort for NoOutputs {
    fn set_level(&mut self, _output: OutputId, _on: bool) {}
}

struct FixedClock;

impl ClockPort for FixedClock {
    fn now_ms(&self) -> u32 {
        0
    }
}

#[test]
fn invalid_config_or_bindings_rejected() {
    let queue = ExpiryQueue::new();

    let bad_cfg = ControllerConfig {
        hold_threshold_ms: 0,
        ..ControllerConfig::default()
    };
    let err = Controller::new(
        bad_cfg,
        default_bindings(),
        MockInputs::new(),
        NoOutputs,
        FixedClock,
        NoTimer,
        &queue,
    )
    .err();
    assert_eq!(err, Some(Error::Config(ConfigError::ZeroThreshold)));

    let mut bad_bindings = Bindings::new();
    bad_bindings.push(ChannelBinding::new(0, 99)).unwrap();
    let err = Controller::new(
        ControllerConfig::default(),
        bad_bindings,
        MockInputs::new(),
        NoOutputs,
        FixedClock,
        NoTimer,
        &queue,
    )
    .err();
    assert_eq!(err, Some(Error::Config(ConfigError::OutputOutOfRange(99))));
}

#[test]
fn inputs_are_read_once_per_binding_per_cycle() {
    let queue = ExpiryQueue::new();
    let mut sim = Sim::new(&queue, default_bindings());
    sim.run_until(100);
    assert_eq!(sim.ctl.inputs_mut().reads, 10 * 12);
}
