//! Application-wide constants and compile-time configuration.
//!
//! Display geometry, timing parameters, menu capacities and card selector
//! ranges live here so they can be tuned in one place.

// Display

/// SSD1306 panel width (pixels).
pub const DISPLAY_WIDTH: u16 = 128;

/// SSD1306 panel height (pixels).
pub const DISPLAY_HEIGHT: u16 = 64;

/// Thickness of the card-switch progress line (pixels).
pub const PROGRESS_LINE_WIDTH: u32 = 12;

/// Enable automatic OLED power-off after inactivity.
pub const SCREEN_AUTO_OFF_ENABLED: bool = true;

/// Inactivity timeout before the OLED is turned off (seconds).
pub const SCREEN_AUTO_OFF_TIMEOUT_SECS: u64 = 30;

// Card switching

/// Quiet period after the last card-navigation press before the card is
/// actually reloaded (ms). Rapid presses collapse into one reload.
pub const CARD_SWITCH_DEBOUNCE_MS: u64 = 1500;

/// Optimistic bias added to raw reload progress before display (percent).
pub const PROGRESS_BIAS: u8 = 5;

/// Progress is only re-rendered when it crosses into a new bucket of this
/// many percent.
pub const PROGRESS_BUCKET: u8 = 5;

/// Number of channels per card index. Channels wrap around.
pub const CHANNEL_COUNT: u16 = 8;

/// Highest selectable card index. Index 0 is reserved for the boot card.
pub const MAX_CARD_INDEX: u16 = 255;

// Menu

/// Maximum number of menu pages, root included.
pub const MAX_MENU_PAGES: usize = 4;

/// Maximum number of rows on one menu page.
pub const MAX_MENU_ITEMS: usize = 6;

/// Maximum nesting below the root page.
pub const MENU_DEPTH: usize = 2;

// Input
//
// Buttons are active-low with internal pull-ups (nRF52840-DK defaults):
//
//   Button MENU   → P0.11
//   Button PREV   → P0.12
//   Button NEXT   → P0.24
//   Button ENTER  → P0.25
//   Button BACK   → P0.06
//   I²C SDA       → P0.26
//   I²C SCL       → P0.27

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Depth of the pressed-key queue between button tasks and the GUI loop.
pub const KEY_QUEUE_DEPTH: usize = 8;

/// Main-loop period of the GUI task (ms).
pub const GUI_TASK_PERIOD_MS: u64 = 5;

/// SSD1306 I²C address.
pub const OLED_I2C_ADDRESS: u8 = 0x3C;

/// Which screen greets the user after power-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootMode {
    /// Normal memory-card operation, starting on the status screen.
    #[default]
    MemoryCard,
    /// FreePSXBoot notice screen, dismissed by any key.
    FreePsxBoot,
}

/// Runtime knobs handed to the UI context at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuiConfig {
    /// Card-switch debounce window (ms).
    pub switch_debounce_ms: u64,
    /// First screen after boot.
    pub boot_mode: BootMode,
    /// Display auto-off timeout, `None` keeps the display on.
    pub auto_off_secs: Option<u64>,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            switch_debounce_ms: CARD_SWITCH_DEBOUNCE_MS,
            boot_mode: BootMode::MemoryCard,
            auto_off_secs: if SCREEN_AUTO_OFF_ENABLED {
                Some(SCREEN_AUTO_OFF_TIMEOUT_SECS)
            } else {
                None
            },
        }
    }
}
