//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements            | Connects to                 |
//! |------------|-----------------------|-----------------------------|
//! | `hardware` | InputPort, OutputPort | ESP32 GPIO                  |
//! | `log_sink` | EventSink             | Serial log output           |
//! | `time`     | ClockPort             | ESP32 system timer          |
//! | `timer`    | TimerPort             | esp_timer one-shots         |

pub mod hardware;
pub mod log_sink;
pub mod time;
pub mod timer;
