//! One-shot pulse-off timers.
//!
//! On ESP-IDF, one `esp_timer` per output is created at boot.  Arming an
//! output stops its timer (if running) and restarts it, so a newer pulse
//! replaces an older one.  The callback runs in the esp_timer task, not
//! ISR context, and only posts a [`PulseExpiry`] to [`PULSE_EXPIRIES`].
//!
//! On simulation targets each arm spawns a sleeper thread that posts the
//! expiry when it wakes; superseded arms still fire and are filtered out
//! by the poll loop.

#[cfg(target_os = "espidf")]
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(target_os = "espidf")]
use crate::bindings::OutputId;
use crate::bindings::MAX_OUTPUTS;
use crate::error::InitError;
use crate::events::{PULSE_EXPIRIES, PulseExpiry};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// Generation of the latest arm per output.  Written by the poll loop
/// before the timer starts, read by the callback.
#[cfg(target_os = "espidf")]
static ARMED_GENERATION: [AtomicU32; MAX_OUTPUTS] = [const { AtomicU32::new(0) }; MAX_OUTPUTS];

#[cfg(target_os = "espidf")]
static mut PULSE_TIMERS: [esp_timer_handle_t; MAX_OUTPUTS] = [core::ptr::null_mut(); MAX_OUTPUTS];

/// SAFETY: PULSE_TIMERS is written only by `init_pulse_timers()` before the
/// poll loop starts; afterwards it is read from the poll loop only.
#[cfg(target_os = "espidf")]
unsafe fn pulse_timer(index: usize) -> esp_timer_handle_t {
    unsafe { PULSE_TIMERS[index] }
}

/// Post the expiry for output `index` carrying its latest generation.
#[cfg(target_os = "espidf")]
fn fire(index: usize) {
    let generation = ARMED_GENERATION[index].load(Ordering::Acquire);
    PULSE_EXPIRIES.push(PulseExpiry {
        output: OutputId(index as u8),
        generation,
    });
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn pulse_off_cb(arg: *mut core::ffi::c_void) {
    fire(arg as usize);
}

/// Create one one-shot timer for each of the first `outputs` outputs.
#[cfg(target_os = "espidf")]
pub fn init_pulse_timers(outputs: usize) -> Result<(), InitError> {
    let count = outputs.min(MAX_OUTPUTS);
    // SAFETY: PULSE_TIMERS is written here once at boot from the main task
    // before any timer can fire.  The callback only touches atomics and
    // the expiry queue.
    unsafe {
        for index in 0..count {
            let args = esp_timer_create_args_t {
                callback: Some(pulse_off_cb),
                arg: index as *mut core::ffi::c_void,
                dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
                name: b"pulse_off\0".as_ptr() as *const _,
                skip_unhandled_events: false,
            };
            let ret = esp_timer_create(&args, &raw mut PULSE_TIMERS[index]);
            if ret != ESP_OK as i32 {
                return Err(InitError::TimerCreateFailed(ret));
            }
        }
    }
    log::info!("hw_timer: {} pulse timers created", count);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_pulse_timers(outputs: usize) -> Result<(), InitError> {
    log::info!("hw_timer(sim): {} pulse timers backed by threads", outputs.min(MAX_OUTPUTS));
    Ok(())
}

/// Arm the pulse-off for `expiry.output` to fire after `delay_ms`.
///
/// A timer that cannot be started is a platform fault: this panics and
/// the poll loop stops.
#[cfg(target_os = "espidf")]
pub fn arm(delay_ms: u32, expiry: PulseExpiry) {
    let index = expiry.output.index();
    ARMED_GENERATION[index].store(expiry.generation, Ordering::Release);
    // SAFETY: pulse_timer() contract — poll loop only, after init.
    unsafe {
        let handle = pulse_timer(index);
        assert!(!handle.is_null(), "pulse timer for output {index} not created");
        // ESP_ERR_INVALID_STATE just means it was not running.
        let _ = esp_timer_stop(handle);
        let ret = esp_timer_start_once(handle, u64::from(delay_ms) * 1_000);
        assert!(ret == ESP_OK as i32, "pulse timer start failed (rc={ret})");
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn arm(delay_ms: u32, expiry: PulseExpiry) {
    std::thread::Builder::new()
        .name("pulse-off".into())
        .spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(delay_ms)));
            PULSE_EXPIRIES.push(expiry);
        })
        .expect("hw_timer(sim): thread creation failed");
}
