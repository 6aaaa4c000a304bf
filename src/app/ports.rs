//! Port traits — the hexagonal boundary between the controller core and
//! the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (GPIO, clock, pulse timers, event sinks) implement these
//! traits.  The [`Controller`](super::service::Controller) consumes them via
//! generics, so the core never touches hardware directly and can be driven
//! with synthetic levels and ticks in tests.
//!
//! Every port operation is total: pin reads and writes, clock reads and
//! timer arms cannot fail once the board is initialised.

use crate::bindings::{InputId, OutputId};
use crate::events::PulseExpiry;

/// Monotonic millisecond tick, wrapping at `u32::MAX`.
pub type Tick = u32;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for input lines.
pub trait InputPort {
    /// Raw line level.  Active-low: `false` means the input is triggered.
    /// Electrical pull-up configuration is the adapter's concern.
    fn read_level(&mut self, input: InputId) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for output lines (relays, LEDs).
pub trait OutputPort {
    /// Drive `output` on (`true`) or off.  Fire-and-forget.
    fn set_level(&mut self, output: OutputId, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

pub trait ClockPort {
    /// Milliseconds since boot.  Wraps; use `wrapping_sub` for elapsed time.
    fn now_ms(&self) -> Tick;
}

// ───────────────────────────────────────────────────────────────
// Deferred timer port
// ───────────────────────────────────────────────────────────────

/// One-shot deferred action facility.
///
/// After `delay_ms` of real time the adapter posts `expiry` to the
/// [`ExpiryQueue`](crate::events::ExpiryQueue) the poll loop drains.  No
/// handle is returned and there is no cancel.
pub trait TimerPort {
    fn schedule_once(&mut self, delay_ms: u32, expiry: PulseExpiry);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`ControllerEvent`](super::events::ControllerEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ControllerEvent);
}
