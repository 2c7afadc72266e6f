//! Reload progress coalescing.
//!
//! The card manager may report progress thousands of times per reload.
//! Each report is biased by `PROGRESS_BIAS`, clamped to 100 and only
//! forwarded when it lands in a new `PROGRESS_BUCKET`-wide bucket, which
//! caps renderer work at one update per bucket.

use crate::config::{DISPLAY_WIDTH, PROGRESS_BIAS, PROGRESS_BUCKET};

/// A progress change worth rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgressUpdate {
    /// Biased, clamped percentage (0-100).
    pub percent: u8,
    /// X coordinate where the progress line ends.
    pub bar_end_x: u16,
}

/// Progress state of one card switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    /// Highest raw value seen so far.
    last_reported: u8,
    /// Bucket of the last forwarded update.
    last_bucket: u8,
}

impl ProgressTracker {
    pub const fn new() -> Self {
        Self {
            last_reported: 0,
            last_bucket: 0,
        }
    }

    /// Forget the previous switch.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Highest raw percentage reported since the last reset.
    pub fn last_reported(&self) -> u8 {
        self.last_reported
    }

    /// Feed one raw 0-100 report. Values above 100 count as 100 and values
    /// lower than an earlier report count as that report.
    pub fn update(&mut self, raw: u8) -> Option<ProgressUpdate> {
        let raw = raw.min(100).max(self.last_reported);
        self.last_reported = raw;

        let percent = raw.saturating_add(PROGRESS_BIAS).min(100);
        let bucket = percent / PROGRESS_BUCKET;
        if bucket == self.last_bucket {
            return None;
        }
        self.last_bucket = bucket;

        Some(ProgressUpdate {
            percent,
            bar_end_x: bar_end_x(percent),
        })
    }
}

/// Progress line length for a percentage, in pixels.
pub fn bar_end_x(percent: u8) -> u16 {
    let percent = u32::from(percent.min(100));
    // Fits: 128 * 100 / 100.
    (u32::from(DISPLAY_WIDTH) * percent / 100) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_report_is_always_forwarded() {
        let mut p = ProgressTracker::new();
        let u = p.update(0).unwrap();
        assert_eq!(u.percent, 5);
        assert_eq!(u.bar_end_x, 6);
    }

    #[test]
    fn reports_within_a_bucket_are_coalesced() {
        let mut p = ProgressTracker::new();
        assert!(p.update(0).is_some());
        assert!(p.update(1).is_none());
        assert!(p.update(4).is_none());
        assert_eq!(p.update(5).map(|u| u.percent), Some(10));
        assert!(p.update(9).is_none());
    }

    #[test]
    fn full_sweep_is_capped_at_one_update_per_bucket() {
        let mut p = ProgressTracker::new();
        let updates = (0..=100u8).filter_map(|raw| p.update(raw)).count();
        assert_eq!(updates, 20);
    }

    #[test]
    fn bias_reaches_full_width_before_completion() {
        let mut p = ProgressTracker::new();
        let mut last = None;
        for raw in 0..=95u8 {
            if let Some(u) = p.update(raw) {
                last = Some(u);
            }
        }
        let last = last.unwrap();
        assert_eq!(last.percent, 100);
        assert_eq!(last.bar_end_x, DISPLAY_WIDTH);
        assert!(p.update(100).is_none());
    }

    #[test]
    fn regressions_do_not_move_the_bar_back() {
        let mut p = ProgressTracker::new();
        p.update(50);
        assert!(p.update(10).is_none());
        assert_eq!(p.last_reported(), 50);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        let mut p = ProgressTracker::new();
        let u = p.update(250).unwrap();
        assert_eq!(u.percent, 100);
        assert_eq!(p.last_reported(), 100);
    }

    #[test]
    fn reset_starts_a_new_switch() {
        let mut p = ProgressTracker::new();
        p.update(100);
        p.reset();
        assert_eq!(p.update(0).map(|u| u.percent), Some(5));
    }
}
