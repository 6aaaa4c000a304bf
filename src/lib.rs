//! RelayPulse firmware library.
//!
//! Maps active-low inputs to relay outputs: a short press pulses the
//! output for a fixed time, a press held past the threshold keeps it on
//! until release.  Exposes the pure-logic modules for integration
//! testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod bindings;
pub mod config;
pub mod control;
pub mod error;
pub mod events;
pub mod pins;

pub mod adapters;
pub mod drivers;

mod esp_link_shims;
