//! Property-based invariants for the UI state machines.
//!
//! 1. NEXT (or PREV) pressed page-length times returns focus to its start.
//! 2. ENTER on a link followed by BACK restores the parent focus.
//! 3. Focus always stays inside the current page.
//! 4. Progress coalescing forwards at most 20 monotonic updates.
//! 5. A burst of switch requests fires exactly once, after the last one.
//! 6. Only the main screen reacts to selector keys with a card switch.

use proptest::prelude::*;

use ps2mc_ui::card::progress::ProgressTracker;
use ps2mc_ui::config::DISPLAY_WIDTH;
use ps2mc_ui::ui::menu::{Menu, MenuEffect, Navigator, PageId};
use ps2mc_ui::ui::router::{route, Reaction};
use ps2mc_ui::ui::switch::PendingCardSwitch;
use ps2mc_ui::{Key, Screen};

// ── Helpers ─────────────────────────────────────────────────────────────

fn key_strategy() -> impl Strategy<Value = Key> {
    prop::sample::select(Key::ALL.to_vec())
}

fn screen_strategy() -> impl Strategy<Value = Screen> {
    prop::sample::select(vec![
        Screen::Main,
        Screen::Menu,
        Screen::CardSwitch,
        Screen::FreePsxBoot,
    ])
}

/// Navigator on the stock menu after replaying `keys`.
fn navigator_after(keys: &[Key]) -> Navigator {
    let mut nav = Navigator::new(Menu::standard());
    for key in keys {
        nav.handle(*key);
    }
    nav
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Focus cycles
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn next_cycles_back_to_start(prefix in prop::collection::vec(key_strategy(), 0..12)) {
        let mut nav = navigator_after(&prefix);
        let start = nav.state();
        let count = nav.current_page().len();

        for _ in 0..count {
            nav.handle(Key::Next);
        }
        prop_assert_eq!(nav.state(), start);
    }

    #[test]
    fn prev_cycles_back_to_start(prefix in prop::collection::vec(key_strategy(), 0..12)) {
        let mut nav = navigator_after(&prefix);
        let start = nav.state();
        let count = nav.current_page().len();

        for _ in 0..count {
            nav.handle(Key::Prev);
        }
        prop_assert_eq!(nav.state(), start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Enter/back restores focus
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn enter_then_back_restores_root_focus(steps in 0usize..8) {
        let mut nav = Navigator::new(Menu::standard());
        for _ in 0..steps {
            nav.handle(Key::Next);
        }
        let before = nav.state();

        let entered = nav.handle(Key::Enter);
        prop_assert!(matches!(entered, MenuEffect::Page(page, 0) if page != PageId::ROOT));

        prop_assert_eq!(
            nav.handle(Key::Back),
            MenuEffect::Page(PageId::ROOT, before.focus)
        );
        prop_assert_eq!(nav.state(), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Focus bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn focus_stays_on_page(keys in prop::collection::vec(key_strategy(), 0..64)) {
        let mut nav = Navigator::new(Menu::standard());
        for key in keys {
            nav.handle(key);
            prop_assert!(nav.focus() < nav.current_page().len());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Progress coalescing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn progress_forwards_few_monotonic_updates(reports in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut tracker = ProgressTracker::new();
        let mut forwarded = Vec::new();
        for raw in reports {
            if let Some(update) = tracker.update(raw) {
                forwarded.push(update);
            }
        }

        prop_assert!(forwarded.len() < 21, "{} updates", forwarded.len());
        for pair in forwarded.windows(2) {
            prop_assert!(pair[0].percent < pair[1].percent);
            prop_assert!(pair[0].bar_end_x <= pair[1].bar_end_x);
        }
        for update in &forwarded {
            prop_assert!(update.percent <= 100);
            prop_assert!(update.bar_end_x <= DISPLAY_WIDTH);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Debounce collapse
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn burst_fires_once_after_last_request(
        start_ms in 0u64..10_000,
        gaps_ms in prop::collection::vec(1u64..1_500, 0..10),
    ) {
        const DEBOUNCE_MS: u64 = 1_500;
        let mut pending = PendingCardSwitch::new();

        let mut now_ms = start_ms;
        pending.arm(now_ms * 1000, DEBOUNCE_MS);
        for gap in gaps_ms {
            // Just before the next request nothing has fired yet.
            prop_assert!(!pending.take_due((now_ms + gap) * 1000 - 1));
            now_ms += gap;
            pending.arm(now_ms * 1000, DEBOUNCE_MS);
        }

        let deadline_us = (now_ms + DEBOUNCE_MS) * 1000;
        prop_assert_eq!(pending.deadline_us(), Some(deadline_us));
        prop_assert!(!pending.take_due(deadline_us - 1));
        prop_assert!(pending.take_due(deadline_us));
        prop_assert!(!pending.take_due(deadline_us + 1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Routing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn only_main_switches_cards(screen in screen_strategy(), key in key_strategy()) {
        let reaction = route(screen, key);
        if matches!(reaction, Reaction::SwitchCard(_)) {
            prop_assert_eq!(screen, Screen::Main);
        }
        if screen == Screen::CardSwitch {
            prop_assert_eq!(reaction, Reaction::Ignore);
        }
    }
}
