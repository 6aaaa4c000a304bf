//! Pulse-expiry queue between the timer context and the poll loop.
//!
//! Pulse-off timers fire outside the poll loop (the `esp_timer` task on
//! target, a sleeper thread in simulation).  They never touch output
//! state; they post a [`PulseExpiry`] here and the poll loop drains the
//! queue at the start of every cycle, so outputs have a single writer.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ esp_timer   │────▶│ ExpiryQueue  │────▶│  Poll Loop   │
//! │ (one-shot)  │     │ (bounded)    │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::bindings::OutputId;

/// Maximum number of undrained expiries.
const EXPIRY_QUEUE_CAP: usize = 32;

/// A pulse-off timer fired for `output`.
///
/// `generation` identifies which arm produced it; only the most recent
/// arm of an output is allowed to switch it off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseExpiry {
    pub output: OutputId,
    pub generation: u32,
}

/// Bounded multi-producer queue with a single consumer (the poll loop).
pub struct ExpiryQueue {
    chan: Channel<CriticalSectionRawMutex, PulseExpiry, EXPIRY_QUEUE_CAP>,
}

impl Default for ExpiryQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpiryQueue {
    pub const fn new() -> Self {
        Self {
            chan: Channel::new(),
        }
    }

    /// Post an expiry.  Safe from the timer task or any thread.
    /// Returns `false` if the queue is full (expiry dropped).
    pub fn push(&self, expiry: PulseExpiry) -> bool {
        if self.chan.try_send(expiry).is_err() {
            log::error!(
                "expiry queue full, dropped pulse-off for output {}",
                expiry.output.0
            );
            return false;
        }
        true
    }

    /// Pop the oldest expiry.  Poll loop only.
    pub fn pop(&self) -> Option<PulseExpiry> {
        self.chan.try_receive().ok()
    }

    /// Drain all pending expiries into a callback, in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(PulseExpiry)) {
        while let Some(expiry) = self.pop() {
            handler(expiry);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chan.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chan.len()
    }
}

/// Queue shared by the hardware pulse timers and the firmware poll loop.
pub static PULSE_EXPIRIES: ExpiryQueue = ExpiryQueue::new();
