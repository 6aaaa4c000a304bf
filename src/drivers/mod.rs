//! Low-level peripheral helpers: GPIO bring-up and pulse timers.

pub mod hw_init;
pub mod hw_timer;
