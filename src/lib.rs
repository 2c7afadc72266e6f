//! On-device user interface for a PS2 memory-card emulator.
//!
//! Everything in this library is pure logic: screen state machine, menu
//! navigation, card-switch orchestration, status label sync and display
//! power policy. Hardware sits behind small traits ([`ui::render::Renderer`],
//! [`card::CardManager`], [`card::Emulator`], [`input::KeyInput`],
//! [`clock::Clock`]) so the whole UI runs on the host under `cargo test`.
//!
//! Note: The embedded binary (main.rs, `embedded` feature) provides the
//! SSD1306 renderer, button tasks and Embassy clock, and drives
//! [`ui::Gui::task`] from its main loop.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible in every module.
#[macro_use]
mod fmt;

pub mod card;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod power;
pub mod power_logic;
pub mod ui;

pub use error::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Convenience re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use card::{CardManager, CardStep, Emulator, ProgressSink};
pub use clock::Clock;
pub use config::{BootMode, GuiConfig};
pub use input::{Key, KeyInput, KeyQueue};
pub use ui::render::{Label, Renderer};
pub use ui::{Gui, Screen};
