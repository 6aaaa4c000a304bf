//! Hardware adapter — bridges board GPIO to the input/output port traits.
//!
//! Maps [`InputId`]/[`OutputId`] to GPIO numbers through [`crate::pins`]
//! and delegates to the raw [`hw_init`] helpers.  This is the only module
//! that touches pins.  On non-espidf targets the helpers are simulation
//! stubs (inputs read released, writes are dropped).

use crate::app::ports::{InputPort, OutputPort};
use crate::bindings::{InputId, OutputId};
use crate::drivers::hw_init;
use crate::pins;

/// Concrete adapter for the on-board input and relay GPIOs.
pub struct GpioBank;

impl Default for GpioBank {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioBank {
    pub fn new() -> Self {
        Self
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for GpioBank {
    fn read_level(&mut self, input: InputId) -> bool {
        // An input with no pin reads as released (pulled up).
        pins::input_gpio(input.index()).is_none_or(hw_init::gpio_read)
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for GpioBank {
    fn set_level(&mut self, output: OutputId, on: bool) {
        if let Some(gpio) = pins::output_gpio(output.index()) {
            hw_init::gpio_write(gpio, on);
        }
    }
}
