//! Controller core: trigger tracking, press evaluation, pulse scheduling.
//!
//! Pure logic, no I/O — hardware is reached only through the port traits
//! in [`crate::app::ports`].

pub mod evaluator;
pub mod outputs;
pub mod pulse;
pub mod tracker;
