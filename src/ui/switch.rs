//! Card-switch orchestration.
//!
//! A card switch goes through three phases:
//!
//! 1. **Idle** - nothing pending.
//! 2. **Armed** - a selector key was pressed on Main; the reload waits for
//!    the debounce deadline. Every further press pushes the deadline out,
//!    so a burst of presses costs exactly one reload.
//! 3. **Switching** - the CardSwitch screen is up and the card manager
//!    blocks the loop until the reload is done. Only the progress sink
//!    below touches the renderer meanwhile.

use core::fmt::{self, Write};

use heapless::String;

use crate::card::progress::ProgressTracker;
use crate::card::{CardManager, Emulator, ProgressSink};
use crate::clock::{Clock, TickDriver};
use crate::error::Error;
use crate::ui::render::{Label, Renderer};

/// Where the card-switch state machine stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchPhase {
    Idle,
    Armed { deadline_us: u64 },
    Switching,
}

/// Debounced switch request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingCardSwitch {
    deadline_us: Option<u64>,
}

impl PendingCardSwitch {
    pub const fn new() -> Self {
        Self { deadline_us: None }
    }

    /// Arm (or re-arm) the switch `debounce_ms` from `now_us`. Returns the
    /// new deadline.
    pub fn arm(&mut self, now_us: u64, debounce_ms: u64) -> u64 {
        let deadline = now_us + debounce_ms.max(1) * 1000;
        if self.deadline_us.is_some() {
            debug!("Switch: re-armed, deadline {} us", deadline);
        } else {
            debug!("Switch: armed, deadline {} us", deadline);
        }
        self.deadline_us = Some(deadline);
        deadline
    }

    /// Drop a pending request. Returns `true` if one was armed.
    pub fn cancel(&mut self) -> bool {
        self.deadline_us.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_us.is_some()
    }

    pub fn deadline_us(&self) -> Option<u64> {
        self.deadline_us
    }

    /// Disarm and return `true` once the deadline has been reached.
    pub fn take_due(&mut self, now_us: u64) -> bool {
        match self.deadline_us {
            Some(deadline) if deadline <= now_us => {
                self.deadline_us = None;
                true
            }
            _ => false,
        }
    }
}

/// Reload the selected card and restart emulation.
///
/// The emulator is re-entered whatever the outcome; the caller only logs
/// the returned error.
pub fn run_card_switch<C, E>(
    cards: &mut C,
    emulator: &mut E,
    progress: &mut dyn ProgressSink,
) -> Result<(), Error>
where
    C: CardManager + ?Sized,
    E: Emulator + ?Sized,
{
    let result = cards.open(progress);
    emulator.enter();
    result
}

/// Progress sink that feeds coalesced updates to the CardSwitch screen and
/// keeps the renderer ticking while the reload blocks.
pub struct SwitchProgress<'a, R, T> {
    pub renderer: &'a mut R,
    pub tracker: &'a mut ProgressTracker,
    pub ticker: &'a mut TickDriver,
    pub clock: &'a T,
}

impl<R: Renderer, T: Clock> ProgressSink for SwitchProgress<'_, R, T> {
    fn report(&mut self, percent: u8, status: fmt::Arguments<'_>) {
        let Some(update) = self.tracker.update(percent) else {
            return;
        };

        self.renderer.set_progress(update.bar_end_x);

        let mut text: String<24> = String::new();
        // Truncating writer never fails.
        let _ = Truncating::new(&mut text).write_fmt(status);
        self.renderer.set_text(Label::ProgressText, &text);

        if let Some(elapsed_ms) = self.ticker.advance(self.clock.now_us()) {
            self.renderer.advance_clock(elapsed_ms);
        }
        if let Err(e) = self.renderer.process_pending() {
            warn!("Switch: render failed: {:?}", e);
        }
    }
}

/// Writer that keeps the characters that fit and drops everything after.
struct Truncating<'a, const N: usize> {
    buf: &'a mut String<N>,
    full: bool,
}

impl<'a, const N: usize> Truncating<'a, N> {
    fn new(buf: &'a mut String<N>) -> Self {
        Self { buf, full: false }
    }
}

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.full {
                break;
            }
            self.full = self.buf.push(c).is_err();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{Call, ManualClock, RecordingRenderer};

    #[test]
    fn deadline_fires_once() {
        let mut p = PendingCardSwitch::new();
        assert_eq!(p.arm(1_000, 1500), 1_501_000);
        assert!(!p.take_due(1_500_999));
        assert!(p.take_due(1_501_000));
        assert!(!p.is_armed());
        assert!(!p.take_due(9_999_999));
    }

    #[test]
    fn rearm_pushes_deadline_out() {
        let mut p = PendingCardSwitch::new();
        p.arm(0, 1500);
        p.arm(1_000_000, 1500);
        assert!(!p.take_due(1_500_000));
        assert!(p.take_due(2_500_000));
    }

    #[test]
    fn cancel_disarms() {
        let mut p = PendingCardSwitch::new();
        assert!(!p.cancel());
        p.arm(0, 1500);
        assert!(p.cancel());
        assert!(!p.take_due(u64::MAX));
    }

    #[test]
    fn deadline_is_always_in_the_future() {
        let mut p = PendingCardSwitch::new();
        let deadline = p.arm(42, 0);
        assert!(deadline > 42);
    }

    fn report_once(status: fmt::Arguments<'_>) -> RecordingRenderer {
        let mut renderer = RecordingRenderer::default();
        let mut tracker = ProgressTracker::new();
        let mut ticker = TickDriver::new();
        let clock = ManualClock::default();
        let mut sink = SwitchProgress {
            renderer: &mut renderer,
            tracker: &mut tracker,
            ticker: &mut ticker,
            clock: &clock,
        };
        sink.report(0, status);
        renderer
    }

    #[test]
    fn long_status_is_cut_to_the_label_size() {
        let renderer = report_once(format_args!("Reading Card1/Card1-1.mcd {}%", 5));
        let texts: std::vec::Vec<_> = renderer
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(Label::ProgressText, t) => Some(t.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["Reading Card1/Card1-1.mc"]);
    }

    #[test]
    fn short_status_is_forwarded_whole() {
        let renderer = report_once(format_args!("Read {} kB/s", 420));
        assert!(renderer
            .calls
            .contains(&Call::Text(Label::ProgressText, "Read 420 kB/s".into())));
    }
}
