//! Renderer interface driven by the GUI state machine.
//!
//! The renderer owns every widget and the frame buffer; the state machine
//! only tells it what changed. Nothing here may call back into the GUI.

use crate::error::Error;
use crate::ui::menu::MenuPage;
use crate::ui::Screen;

/// Text widgets the state machine updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Label {
    /// Card index on the Main screen.
    CardIndex,
    /// Channel on the Main screen.
    CardChannel,
    /// Status line under the card-switch progress bar.
    ProgressText,
}

pub trait Renderer {
    /// Make `screen` the visible surface.
    fn load_screen(&mut self, screen: Screen);

    fn set_text(&mut self, label: Label, text: &str);

    /// Move the end of the card-switch progress line to `bar_end_x`.
    fn set_progress(&mut self, bar_end_x: u16);

    /// Show a menu page with row `focus` highlighted.
    fn show_menu_page(&mut self, page: &MenuPage, focus: usize);

    /// Highlight another row on the page already shown.
    fn set_focus(&mut self, focus: usize);

    fn set_display_on(&mut self, on: bool);

    /// Feed elapsed time to animations (scrolling text).
    fn advance_clock(&mut self, elapsed_ms: u32);

    /// Draw and flush whatever changed.
    fn process_pending(&mut self) -> Result<(), Error>;
}
