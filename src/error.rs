//! Unified error types for the RelayPulse firmware.
//!
//! Only boot-time work can fail: validating the configuration and binding
//! table, and bringing up GPIO and the pulse timers.  Once the poll loop is
//! running every port operation is total.  All variants are `Copy` so they
//! can be passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible boot step funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration or binding table is invalid.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(InitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Hold threshold must be non-zero.
    ZeroThreshold,
    /// A pulse duration (default or per-binding) is zero.
    ZeroPulse,
    /// Poll interval must be non-zero.
    ZeroPollInterval,
    /// Poll interval is not shorter than the hold threshold, so short and
    /// long presses cannot be told apart.
    PollSlowerThanThreshold { poll_ms: u32, threshold_ms: u32 },
    /// Binding refers to an input id outside the tracker arena.
    InputOutOfRange(u8),
    /// Binding refers to an output id outside the output bank.
    OutputOutOfRange(u8),
    /// Binding table has no entries.
    NoBindings,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroThreshold => write!(f, "hold threshold is zero"),
            Self::ZeroPulse => write!(f, "pulse duration is zero"),
            Self::ZeroPollInterval => write!(f, "poll interval is zero"),
            Self::PollSlowerThanThreshold { poll_ms, threshold_ms } => write!(
                f,
                "poll interval {poll_ms}ms not below hold threshold {threshold_ms}ms"
            ),
            Self::InputOutOfRange(id) => write!(f, "input {id} out of range"),
            Self::OutputOutOfRange(id) => write!(f, "output {id} out of range"),
            Self::NoBindings => write!(f, "binding table is empty"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialisation.  The `i32` payloads
/// are raw `esp_err_t` return codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    GpioConfigFailed(i32),
    TimerCreateFailed(i32),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::TimerCreateFailed(rc) => write!(f, "pulse timer create failed (rc={})", rc),
        }
    }
}

impl core::error::Error for InitError {}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
