//! Monotonic clock and millisecond tick driver.

/// Monotonic microsecond clock. Must not wrap during uptime.
pub trait Clock {
    fn now_us(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

/// Converts an absolute µs clock into whole elapsed milliseconds.
///
/// The sub-millisecond remainder is carried into the next call so the
/// renderer clock never drifts from the hardware clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickDriver {
    prev_us: Option<u64>,
}

impl TickDriver {
    pub const fn new() -> Self {
        Self { prev_us: None }
    }

    /// Whole milliseconds elapsed since the last advance, or `None` when
    /// less than one millisecond has passed. The first call only latches
    /// the start time.
    pub fn advance(&mut self, now_us: u64) -> Option<u32> {
        let prev = *self.prev_us.get_or_insert(now_us);
        let diff_ms = now_us.saturating_sub(prev) / 1000;
        if diff_ms == 0 {
            return None;
        }
        self.prev_us = Some(prev + diff_ms * 1000);
        Some(u32::try_from(diff_ms).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_latches_start() {
        let mut t = TickDriver::new();
        assert_eq!(t.advance(5_000_000), None);
        assert_eq!(t.advance(5_001_000), Some(1));
    }

    #[test]
    fn sub_millisecond_remainder_is_carried() {
        let mut t = TickDriver::new();
        t.advance(0);
        assert_eq!(t.advance(1_700), Some(1));
        // 700 µs were left over; 300 more complete the next millisecond.
        assert_eq!(t.advance(2_000), Some(1));
        assert_eq!(t.advance(2_999), None);
        assert_eq!(t.advance(12_000), Some(10));
    }

    #[test]
    fn clock_going_backwards_is_ignored() {
        let mut t = TickDriver::new();
        t.advance(10_000);
        assert_eq!(t.advance(9_000), None);
        assert_eq!(t.advance(11_000), Some(1));
    }
}
