//! GPIO button input with async debouncing.
//!
//! Five physical buttons (active-low with internal pull-up), one task each:
//!   - MENU  - open / leave the settings menu
//!   - PREV  - previous channel / previous menu row
//!   - NEXT  - next channel / next menu row
//!   - ENTER - next card / activate menu row
//!   - BACK  - previous card / parent menu page
//!
//! A task waits for a GPIO edge, debounces it and pushes the `Key` into the
//! shared key channel drained by the GUI loop.

use defmt::{debug, warn};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};

use ps2mc_ui::config::{BUTTON_DEBOUNCE_MS, KEY_QUEUE_DEPTH};
use ps2mc_ui::Key;

pub type KeySender = Sender<'static, CriticalSectionRawMutex, Key, KEY_QUEUE_DEPTH>;

/// Poll one button forever.
///
/// Waits for the pin to go low (pressed), debounces, queues the key, then
/// waits for release before repeating.
#[embassy_executor::task(pool_size = 5)]
pub async fn button_task(pin: AnyPin, key: Key, tx: KeySender) {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        btn.wait_for_falling_edge().await;

        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            debug!("Button: {}", key);
            // The GUI loop may be stuck in a card reload; drop rather than block.
            if tx.try_send(key).is_err() {
                warn!("Button: key queue full, dropping {}", key);
            }

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}
