//! GPIO pin assignments for the RelayPulse I/O board.
//!
//! Single source of truth — drivers and adapters map channel ids to GPIO
//! numbers through this module rather than hard-coding pin numbers.
//! Avoids the ESP32-S3 strapping pins (0, 3, 45, 46), the USB pair
//! (19, 20) and the flash/PSRAM bank (26–37).

// ---------------------------------------------------------------------------
// Inputs (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Wired field inputs 1–8 (opto-isolated terminals).
pub const FIELD_INPUT_GPIOS: [i32; 8] = [4, 5, 6, 7, 15, 16, 17, 18];

/// Front-panel momentary buttons 1–4.
pub const BUTTON_GPIOS: [i32; 4] = [8, 9, 10, 11];

/// All inputs in [`InputId`](crate::bindings::InputId) order:
/// field inputs first, then buttons.
pub const INPUT_GPIOS: [i32; 12] = [
    FIELD_INPUT_GPIOS[0],
    FIELD_INPUT_GPIOS[1],
    FIELD_INPUT_GPIOS[2],
    FIELD_INPUT_GPIOS[3],
    FIELD_INPUT_GPIOS[4],
    FIELD_INPUT_GPIOS[5],
    FIELD_INPUT_GPIOS[6],
    FIELD_INPUT_GPIOS[7],
    BUTTON_GPIOS[0],
    BUTTON_GPIOS[1],
    BUTTON_GPIOS[2],
    BUTTON_GPIOS[3],
];

// ---------------------------------------------------------------------------
// Outputs (relay drivers, active HIGH)
// ---------------------------------------------------------------------------

/// Relay outputs 1–8 in [`OutputId`](crate::bindings::OutputId) order.
pub const OUTPUT_GPIOS: [i32; 8] = [1, 2, 12, 13, 14, 21, 38, 39];

/// GPIO for an input index, if the board has one.
pub fn input_gpio(index: usize) -> Option<i32> {
    INPUT_GPIOS.get(index).copied()
}

/// GPIO for an output index, if the board has one.
pub fn output_gpio(index: usize) -> Option<i32> {
    OUTPUT_GPIOS.get(index).copied()
}
