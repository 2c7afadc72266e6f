//! In-RAM card manager for bring-up and host tests.
//!
//! Keeps the (index, channel) selector the way the real card manager does
//! and fakes a reload by walking progress from 0 to 100, sleeping through
//! an `embedded_hal` delay between steps.

use embedded_hal::delay::DelayNs;

use crate::card::{CardManager, ProgressSink};
use crate::config::{CHANNEL_COUNT, MAX_CARD_INDEX};
use crate::error::Error;

/// Failure injected into the next reloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailMode {
    /// Reload succeeds.
    None,
    /// Fail immediately, before any progress is reported.
    NotFound,
    /// Fail with `CardRead` once progress reaches this percentage.
    ReadAt(u8),
}

/// Delay that returns immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub struct SimulatedCardManager<D> {
    index: u16,
    channel: u16,
    is_open: bool,
    /// Progress increment per simulated read step (percent).
    step_percent: u8,
    /// Time spent per step (ms).
    step_ms: u32,
    /// Simulated transfer rate shown in the progress text (kB/s).
    rate_kbps: u16,
    fail: FailMode,
    opens: u32,
    closes: u32,
    delay: D,
}

impl<D: DelayNs> SimulatedCardManager<D> {
    /// Start on card 1, channel 1, like a fresh SD card.
    pub fn new(delay: D) -> Self {
        Self {
            index: 1,
            channel: 1,
            is_open: false,
            step_percent: 1,
            step_ms: 20,
            rate_kbps: 420,
            fail: FailMode::None,
            opens: 0,
            closes: 0,
            delay,
        }
    }

    /// Progress granularity and per-step time of the fake reload.
    pub fn with_timing(mut self, step_percent: u8, step_ms: u32) -> Self {
        self.step_percent = step_percent.clamp(1, 100);
        self.step_ms = step_ms;
        self
    }

    pub fn set_fail_mode(&mut self, fail: FailMode) {
        self.fail = fail;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Number of `open` calls so far.
    pub fn opens(&self) -> u32 {
        self.opens
    }

    /// Number of `close` calls so far.
    pub fn closes(&self) -> u32 {
        self.closes
    }

    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }
}

impl<D: DelayNs> CardManager for SimulatedCardManager<D> {
    fn open(&mut self, progress: &mut dyn ProgressSink) -> Result<(), Error> {
        self.opens += 1;
        if self.fail == FailMode::NotFound {
            return Err(Error::CardNotFound);
        }

        let mut percent: u8 = 0;
        loop {
            if let FailMode::ReadAt(at) = self.fail {
                if percent >= at {
                    return Err(Error::CardRead);
                }
            }
            progress.report(percent, format_args!("Read {} kB/s", self.rate_kbps));
            if percent == 100 {
                break;
            }
            self.delay.delay_ms(self.step_ms);
            percent = percent.saturating_add(self.step_percent).min(100);
        }

        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.closes += 1;
        self.is_open = false;
    }

    fn prev_channel(&mut self) {
        self.channel = if self.channel <= 1 {
            CHANNEL_COUNT
        } else {
            self.channel - 1
        };
    }

    fn next_channel(&mut self) {
        self.channel = if self.channel >= CHANNEL_COUNT {
            1
        } else {
            self.channel + 1
        };
    }

    fn prev_index(&mut self) {
        self.index = self.index.saturating_sub(1).max(1);
    }

    fn next_index(&mut self) {
        self.index = (self.index + 1).min(MAX_CARD_INDEX);
    }

    fn index(&self) -> u16 {
        self.index
    }

    fn channel(&self) -> u16 {
        self.channel
    }
}
