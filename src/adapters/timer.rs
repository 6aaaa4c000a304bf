//! Pulse-off timer adapter.
//!
//! Implements [`TimerPort`] on top of [`hw_timer`]: `esp_timer` one-shots
//! on target, sleeper threads in simulation.  Either way the expiry lands
//! in [`PULSE_EXPIRIES`](crate::events::PULSE_EXPIRIES), so the controller
//! using this adapter must be built with that queue.

use crate::app::ports::TimerPort;
use crate::drivers::hw_timer;
use crate::error::InitError;
use crate::events::PulseExpiry;

pub struct PulseTimerAdapter {
    _private: (),
}

impl PulseTimerAdapter {
    /// Create the underlying timers for `outputs` outputs.
    pub fn new(outputs: usize) -> Result<Self, InitError> {
        hw_timer::init_pulse_timers(outputs)?;
        Ok(Self { _private: () })
    }
}

impl TimerPort for PulseTimerAdapter {
    fn schedule_once(&mut self, delay_ms: u32, expiry: PulseExpiry) {
        hw_timer::arm(delay_ms, expiry);
    }
}
