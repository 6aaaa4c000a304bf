//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing one tagged line per controller
//! event to the ESP-IDF logger (UART / USB-CDC in production).

use log::{debug, info};

use crate::app::events::ControllerEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ControllerEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ControllerEvent) {
        match event {
            ControllerEvent::Started { bindings } => {
                info!("START | bindings={}", bindings);
            }
            ControllerEvent::Armed { input, at } => {
                debug!("ARM   | in={} at={}ms", input.0, at);
            }
            ControllerEvent::Pulsed {
                input,
                output,
                off_after_ms,
            } => {
                info!("PULSE | in={} out={} off_in={}ms", input.0, output.0, off_after_ms);
            }
            ControllerEvent::HoldStarted { input, output } => {
                info!("HOLD  | in={} out={} on", input.0, output.0);
            }
            ControllerEvent::Released {
                input,
                output,
                held_ms,
            } => {
                info!("REL   | in={} out={} held={}ms", input.0, output.0, held_ms);
            }
            ControllerEvent::PulseEnded { output } => {
                info!("OFF   | out={} pulse ended", output.0);
            }
            ControllerEvent::StalePulseIgnored { output, generation } => {
                debug!("STALE | out={} gen={}", output.0, generation);
            }
        }
    }
}
