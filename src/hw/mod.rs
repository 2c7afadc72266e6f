//! Hardware-facing collaborators of the GUI context.
//!
//! - **Display**: SSD1306 128×64 OLED via I²C ([`display::OledRenderer`])
//! - **Buttons**: 5 tactile switches with debouncing ([`buttons::button_task`])
//! - **Keys / clock / emulator**: thin adapters over Embassy primitives

pub mod buttons;
pub mod display;

use defmt::info;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::Instant;

use ps2mc_ui::config::KEY_QUEUE_DEPTH;
use ps2mc_ui::{Clock, Emulator, Key, KeyInput};

pub type KeyReceiver = Receiver<'static, CriticalSectionRawMutex, Key, KEY_QUEUE_DEPTH>;

/// Key source backed by the button tasks' channel.
pub struct ChannelKeys {
    rx: KeyReceiver,
}

impl ChannelKeys {
    pub fn new(rx: KeyReceiver) -> Self {
        Self { rx }
    }
}

impl KeyInput for ChannelKeys {
    fn poll(&mut self) -> Option<Key> {
        self.rx.try_receive().ok()
    }

    fn flush(&mut self) {
        let mut dropped = 0u32;
        while self.rx.try_receive().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            info!("Keys: discarded {} queued presses", dropped);
        }
    }
}

/// Monotonic time from the Embassy time driver (RTC1).
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}

/// Stand-in for the memory-card protocol engine until the PS2 link is
/// wired up. Tracks and logs the session state only.
#[derive(Default)]
pub struct BringUpEmulator {
    active: bool,
}

impl Emulator for BringUpEmulator {
    fn enter(&mut self) {
        if !self.active {
            info!("Emulator: memory card session started");
        }
        self.active = true;
    }

    fn exit(&mut self) {
        if self.active {
            info!("Emulator: memory card session stopped");
        }
        self.active = false;
    }
}
