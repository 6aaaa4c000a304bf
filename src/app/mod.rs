//! Application layer — the poll loop driver and its port boundary.
//!
//! The business rules live in [`crate::control`]; this module wires them
//! to the outside world.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
