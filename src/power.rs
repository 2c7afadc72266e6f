//! Display power management.
//!
//! The OLED is the only thing worth powering down on this device: the
//! memory-card emulator must keep answering the console regardless. The
//! display goes dark after a period without key presses or card switches
//! and comes back on the next press.

use crate::power_logic;

/// Display power state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Display lit.
    Active,
    /// Display off after inactivity.
    Dimmed,
}

/// Tracks user activity and decides when the display goes dark.
#[derive(Clone, Copy, Debug)]
pub struct DisplayPower {
    state: PowerState,
    last_activity_us: u64,
    auto_off_secs: Option<u64>,
}

impl DisplayPower {
    pub fn new(now_us: u64, auto_off_secs: Option<u64>) -> Self {
        Self {
            state: PowerState::Active,
            last_activity_us: now_us,
            auto_off_secs,
        }
    }

    /// Record activity (key press, finished card switch).
    ///
    /// Returns `true` if this woke the display up.
    pub fn activity(&mut self, now_us: u64) -> bool {
        self.last_activity_us = now_us;
        if self.state != PowerState::Active {
            info!("Power: waking display");
            self.state = PowerState::Active;
            return true;
        }
        false
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn display_on(&self) -> bool {
        self.state == PowerState::Active
    }

    /// Periodic check. Returns the new state if it changed.
    pub fn poll(&mut self, now_us: u64) -> Option<PowerState> {
        let idle_secs = now_us.saturating_sub(self.last_activity_us) / 1_000_000;
        let on = power_logic::screen_should_be_on(
            true,
            self.auto_off_secs.is_some(),
            idle_secs,
            self.auto_off_secs.unwrap_or(u64::MAX),
        );
        let new_state = if on {
            PowerState::Active
        } else {
            PowerState::Dimmed
        };

        if new_state == self.state {
            return None;
        }
        info!("Power: {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
        Some(new_state)
    }
}
