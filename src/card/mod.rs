//! Card manager and memory-card emulator interfaces.
//!
//! Card storage I/O and the PS2 SIO protocol live outside this crate. The
//! UI only needs the narrow request interface below:
//!
//! 1. **CardManager** - selects a card by (index, channel), opens/closes
//!    it, and reports reload progress while `open` blocks.
//! 2. **Emulator** - toggles the PS2-facing emulation session around every
//!    card switch.

pub mod progress;
pub mod sim;

use core::fmt;

use crate::error::Error;

/// One navigation step applied to the card selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CardStep {
    PrevChannel,
    NextChannel,
    PrevIndex,
    NextIndex,
}

/// Receives reload progress while `CardManager::open` is running.
///
/// `status` is formatted lazily so sinks that coalesce updates only pay for
/// the text they actually render.
pub trait ProgressSink {
    fn report(&mut self, percent: u8, status: fmt::Arguments<'_>);
}

/// Sink that drops every report.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8, _status: fmt::Arguments<'_>) {}
}

/// Card storage manager.
pub trait CardManager {
    /// Load the selected card. Blocks until done, calling `progress`
    /// synchronously with raw 0-100 values along the way.
    fn open(&mut self, progress: &mut dyn ProgressSink) -> Result<(), Error>;

    /// Release the currently open card.
    fn close(&mut self);

    fn prev_channel(&mut self);
    fn next_channel(&mut self);
    fn prev_index(&mut self);
    fn next_index(&mut self);

    /// Currently selected card index.
    fn index(&self) -> u16;

    /// Currently selected channel.
    fn channel(&self) -> u16;

    /// Apply one selector step.
    fn step(&mut self, step: CardStep) {
        match step {
            CardStep::PrevChannel => self.prev_channel(),
            CardStep::NextChannel => self.next_channel(),
            CardStep::PrevIndex => self.prev_index(),
            CardStep::NextIndex => self.next_index(),
        }
    }
}

/// PS2 memory-card protocol emulator.
pub trait Emulator {
    /// Start answering the console on the SIO bus.
    fn enter(&mut self);

    /// Stop answering; the card may be swapped afterwards.
    fn exit(&mut self);
}
