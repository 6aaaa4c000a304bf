//! Outbound controller events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port, one per state change of a
//! channel or output.  Repeated hold refreshes are not reported.

use crate::bindings::{InputId, OutputId};

use super::ports::Tick;

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Controller started; all bound outputs were driven off.
    Started { bindings: usize },

    /// Input went active while idle; tracking began at `at`.
    Armed { input: InputId, at: Tick },

    /// Short press: output switched on with a pulse-off armed.
    Pulsed { input: InputId, output: OutputId, off_after_ms: u32 },

    /// Input held past the threshold; output switched on.
    HoldStarted { input: InputId, output: OutputId },

    /// Input released; output switched off.
    Released { input: InputId, output: OutputId, held_ms: u32 },

    /// A pulse-off timer fired and switched the output off.
    PulseEnded { output: OutputId },

    /// A pulse-off timer fired but a newer pulse had replaced it.
    StalePulseIgnored { output: OutputId, generation: u32 },
}
