//! RelayPulse Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioBank           SystemClock   PulseTimerAdapter            │
//! │  (Input+Output)     (ClockPort)   (TimerPort → esp_timer)      │
//! │  LogEventSink                                                  │
//! │  (EventSink)                                                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  Evaluator · TriggerTracker · PulseScheduler           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  PULSE_EXPIRIES queue ◀── esp_timer task                       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The poll loop never returns.  A platform fault (timer start failure)
//! panics and halts it; there is no restart path.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use relaypulse::adapters::hardware::GpioBank;
use relaypulse::adapters::log_sink::LogEventSink;
use relaypulse::adapters::time::SystemClock;
use relaypulse::adapters::timer::PulseTimerAdapter;
use relaypulse::app::service::Controller;
use relaypulse::bindings::default_bindings;
use relaypulse::config::ControllerConfig;
use relaypulse::drivers::hw_init;
use relaypulse::events::PULSE_EXPIRIES;
use relaypulse::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RelayPulse v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_gpio()?;
    let timer = PulseTimerAdapter::new(pins::OUTPUT_GPIOS.len())?;

    // ── 3. Controller ─────────────────────────────────────────
    let config = ControllerConfig::default();
    let mut sink = LogEventSink::new();
    let mut controller = Controller::new(
        config,
        default_bindings(),
        GpioBank::new(),
        GpioBank::new(),
        SystemClock::new(),
        timer,
        &PULSE_EXPIRIES,
    )?;
    controller.start(&mut sink);

    info!("System ready. Entering poll loop.");

    // ── 4. Poll loop (never returns) ──────────────────────────
    controller.run(&mut FreeRtos, &mut sink)
}
