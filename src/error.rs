//! Unified error type for the memory-card UI.
//!
//! We avoid `alloc` - all variants are fieldless so the enum stays `Copy`.
//! The UI state machine never branches on these: card failures are logged
//! and the screen still returns to Main.

/// Top-level error type used across the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Card manager
    /// No card image exists at the selected index/channel.
    CardNotFound,

    /// Card storage could not be opened.
    CardOpen,

    /// Reading the card image failed partway through.
    CardRead,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // Menu construction
    /// Page or item capacity exhausted.
    MenuFull,

    /// A page id does not exist, or the root page was used as a link target.
    InvalidPage,
}
