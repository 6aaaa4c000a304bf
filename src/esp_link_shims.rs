//! `critical-section` implementation for ESP-IDF builds.
//!
//! The expiry queue's `CriticalSectionRawMutex` needs a critical-section
//! provider at link time.  On ESP-IDF the poll loop and the esp_timer task
//! are ordinary FreeRTOS tasks, so a process-wide mutex is enough; nesting
//! is tracked per thread so re-entry from the same task does not deadlock.
//! Host tests get the provider from the `critical-section/std` feature.

#[cfg(target_os = "espidf")]
use core::cell::{Cell, RefCell};
#[cfg(target_os = "espidf")]
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(target_os = "espidf")]
static CS_LOCK: Mutex<()> = Mutex::new(());

#[cfg(target_os = "espidf")]
thread_local! {
    static CS_NESTING: Cell<u8> = const { Cell::new(0) };
    static CS_HELD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    let nesting = CS_NESTING.get();
    if nesting == 0 {
        // A poisoned lock still serialises; the guarded data is `()`.
        let guard = CS_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        CS_HELD.with_borrow_mut(|held| *held = Some(guard));
    }
    let nesting = nesting.saturating_add(1);
    CS_NESTING.set(nesting);
    nesting
}

#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    let nesting = CS_NESTING.get();
    if nesting == 0 {
        return;
    }
    CS_NESTING.set(nesting - 1);
    if nesting == 1 {
        CS_HELD.with_borrow_mut(|held| *held = None);
    }
}
