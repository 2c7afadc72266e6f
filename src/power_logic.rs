/// OLED auto-off policy: lit unless switched off or idle for at least the
/// timeout while auto-off is enabled.
pub fn screen_should_be_on(
    base_display_on: bool,
    auto_off_enabled: bool,
    idle_secs: u64,
    auto_off_timeout_secs: u64,
) -> bool {
    if !base_display_on {
        return false;
    }

    !(auto_off_enabled && idle_secs >= auto_off_timeout_secs)
}

#[cfg(test)]
mod tests {
    use super::screen_should_be_on;

    #[test]
    fn auto_off_after_timeout() {
        assert!(screen_should_be_on(true, true, 29, 30));
        assert!(!screen_should_be_on(true, true, 30, 30));
        assert!(!screen_should_be_on(true, true, 600, 30));
    }

    #[test]
    fn auto_off_disabled_stays_on() {
        assert!(screen_should_be_on(true, false, 30, 30));
        assert!(screen_should_be_on(true, false, 3600, 30));
    }

    #[test]
    fn base_state_wins() {
        assert!(!screen_should_be_on(false, true, 0, 30));
        assert!(!screen_should_be_on(false, false, 999, 30));
    }
}
