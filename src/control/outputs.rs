//! Output bank — last commanded level per output, written through to the
//! [`OutputPort`].
//!
//! Only the poll loop writes here (pulse-off timers post to the expiry
//! queue instead), so plain `bool`s suffice.

use crate::app::ports::OutputPort;
use crate::bindings::{MAX_OUTPUTS, OutputId};

pub struct OutputBank<O: OutputPort> {
    port: O,
    levels: [bool; MAX_OUTPUTS],
}

impl<O: OutputPort> OutputBank<O> {
    pub fn new(port: O) -> Self {
        Self {
            port,
            levels: [false; MAX_OUTPUTS],
        }
    }

    /// Drive `output` and remember the level.  The port is written even if
    /// the level is unchanged (hold refreshes are idempotent writes).
    /// Returns `true` if the level changed.
    pub fn set(&mut self, output: OutputId, on: bool) -> bool {
        self.port.set_level(output, on);
        match self.levels.get_mut(output.index()) {
            Some(level) => {
                let changed = *level != on;
                *level = on;
                changed
            }
            None => false,
        }
    }

    /// Last commanded level (`false` for ids outside the bank).
    pub fn level(&self, output: OutputId) -> bool {
        self.levels.get(output.index()).copied().unwrap_or(false)
    }

    /// Drive every listed output off.
    pub fn all_off(&mut self, outputs: impl IntoIterator<Item = OutputId>) {
        for output in outputs {
            self.set(output, false);
        }
    }

    pub fn port(&self) -> &O {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut O {
        &mut self.port
    }
}
