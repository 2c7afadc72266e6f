//! User interface subsystem - OLED screens driven by five physical keys.
//!
//! A single [`Gui`] context owns every piece of UI state and is driven by
//! one call per main-loop iteration. Key presses are routed centrally
//! ([`router`]) instead of through per-widget callbacks.
//!
//! ## Components
//!
//! - **Screen manager**: which of Main / Menu / CardSwitch / FreePsxBoot
//!   is visible
//! - **Menu navigator**: two-level settings menu with wraparound focus
//! - **Card-switch orchestrator**: debounced, blocking card reload with
//!   coalesced progress
//! - **Status sync**: card index/channel labels on the Main screen

mod gui;
pub mod input_logic;
pub mod menu;
pub mod render;
pub mod router;
pub mod status;
pub mod switch;

#[cfg(test)]
mod testing;

pub use gui::Gui;

/// Screens (views) the UI can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Status - current card index and channel.
    Main,
    /// Settings menu.
    Menu,
    /// Non-interactive progress screen while a card reloads.
    CardSwitch,
    /// FreePSXBoot notice, any key leaves.
    FreePsxBoot,
}

/// Tracks the active screen. Only the GUI's key reactions and the card
/// switch move it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenManager {
    current: Screen,
}

impl ScreenManager {
    pub const fn new(initial: Screen) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Make `screen` active. Returns the screen it replaced.
    pub fn activate(&mut self, screen: Screen) -> Screen {
        core::mem::replace(&mut self.current, screen)
    }
}

impl Default for ScreenManager {
    fn default() -> Self {
        Self::new(Screen::Main)
    }
}
