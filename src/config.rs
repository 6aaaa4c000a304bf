//! Controller timing parameters.
//!
//! Compile-time defaults only; there is no persisted or runtime-editable
//! configuration.  Per-channel pulse overrides live in the binding table
//! (see [`crate::bindings`]).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Press shorter than this pulses the output; longer holds it.
pub const DEFAULT_HOLD_THRESHOLD_MS: u32 = 1000;
/// Pulse length for bindings without an override.
pub const DEFAULT_PULSE_MS: u32 = 500;
/// Sleep between poll cycles.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 10;

/// Core controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Press duration (ms) separating a pulse from a hold
    pub hold_threshold_ms: u32,
    /// Pulse length (ms) used when a binding has no override
    pub default_pulse_ms: u32,
    /// Poll loop interval (ms)
    pub poll_interval_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            hold_threshold_ms: DEFAULT_HOLD_THRESHOLD_MS,
            default_pulse_ms: DEFAULT_PULSE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl ControllerConfig {
    /// Reject values the evaluator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hold_threshold_ms == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.default_pulse_ms == 0 {
            return Err(ConfigError::ZeroPulse);
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.poll_interval_ms >= self.hold_threshold_ms {
            return Err(ConfigError::PollSlowerThanThreshold {
                poll_ms: self.poll_interval_ms,
                threshold_ms: self.hold_threshold_ms,
            });
        }
        Ok(())
    }
}
