//! Channel identifiers and the input → output binding table.
//!
//! A binding ties one input line to one output line with a pulse length.
//! Several inputs may drive the same output (the front-panel buttons
//! parallel the first four field inputs).  Bindings are evaluated in table
//! order every poll cycle.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::config::ControllerConfig;
use crate::error::ConfigError;

/// Size of the trigger-tracker arena.
pub const MAX_INPUTS: usize = 16;
/// Size of the output bank.
pub const MAX_OUTPUTS: usize = 16;
/// Maximum number of bindings in one table.
pub const MAX_BINDINGS: usize = 24;

/// Stable identifier of an input line (index into the tracker arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputId(pub u8);

impl InputId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Stable identifier of an output line (index into the output bank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputId(pub u8);

impl OutputId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One (input, output, pulse-duration) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBinding {
    pub input: InputId,
    pub output: OutputId,
    /// Pulse length override; `None` uses [`ControllerConfig::default_pulse_ms`].
    pub pulse_ms: Option<u32>,
}

impl ChannelBinding {
    pub const fn new(input: u8, output: u8) -> Self {
        Self {
            input: InputId(input),
            output: OutputId(output),
            pulse_ms: None,
        }
    }

    pub const fn with_pulse(self, pulse_ms: u32) -> Self {
        Self {
            pulse_ms: Some(pulse_ms),
            ..self
        }
    }

    /// Effective pulse length for this binding.
    pub fn pulse_duration(&self, config: &ControllerConfig) -> u32 {
        self.pulse_ms.unwrap_or(config.default_pulse_ms)
    }
}

pub type Bindings = Vec<ChannelBinding, MAX_BINDINGS>;

/// Short pulse used by channel 2 (door strike relay).
pub const SHORT_PULSE_MS: u32 = 250;

/// Factory binding table for the 8-relay board.
///
/// | Input ids | Source           | Output ids | Pulse      |
/// |-----------|------------------|------------|------------|
/// | 0–7       | field inputs 1–8 | 0–7        | default    |
/// | 8–11      | buttons 1–4      | 0–3        | default    |
///
/// Channel 2 (input 1 and button 2) uses [`SHORT_PULSE_MS`].
const FACTORY_BINDINGS: [ChannelBinding; 12] = [
    ChannelBinding::new(0, 0),
    ChannelBinding::new(1, 1).with_pulse(SHORT_PULSE_MS),
    ChannelBinding::new(2, 2),
    ChannelBinding::new(3, 3),
    ChannelBinding::new(4, 4),
    ChannelBinding::new(5, 5),
    ChannelBinding::new(6, 6),
    ChannelBinding::new(7, 7),
    ChannelBinding::new(8, 0),
    ChannelBinding::new(9, 1).with_pulse(SHORT_PULSE_MS),
    ChannelBinding::new(10, 2),
    ChannelBinding::new(11, 3),
];

pub fn default_bindings() -> Bindings {
    FACTORY_BINDINGS.iter().copied().collect()
}

/// Check every binding addresses a real tracker slot and output, and that
/// pulse overrides are non-zero.
pub fn validate_bindings(bindings: &[ChannelBinding]) -> Result<(), ConfigError> {
    if bindings.is_empty() {
        return Err(ConfigError::NoBindings);
    }
    for b in bindings {
        if b.input.index() >= MAX_INPUTS {
            return Err(ConfigError::InputOutOfRange(b.input.0));
        }
        if b.output.index() >= MAX_OUTPUTS {
            return Err(ConfigError::OutputOutOfRange(b.output.0));
        }
        if b.pulse_ms == Some(0) {
            return Err(ConfigError::ZeroPulse);
        }
    }
    Ok(())
}
