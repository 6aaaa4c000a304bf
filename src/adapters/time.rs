//! Monotonic millisecond clock.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! Both truncate to `u32` milliseconds, wrapping roughly every 49.7 days.

use crate::app::ports::{ClockPort, Tick};

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for SystemClock {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> Tick {
        // SAFETY: esp_timer_get_time reads the free-running system timer.
        let us = unsafe { esp_idf_svc::sys::esp_timer_get_time() } as u64;
        (us / 1_000) as Tick
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> Tick {
        self.start.elapsed().as_millis() as Tick
    }
}
