//! Key routing: (active screen, key) → reaction.
//!
//! Pure function, no side effects. The GUI context executes the reaction;
//! every reaction is terminal, so nothing else sees the key afterwards.

use crate::card::CardStep;
use crate::input::Key;
use crate::ui::Screen;

/// What the GUI should do with a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reaction {
    /// Nobody reacts.
    Ignore,
    /// Switch to another screen.
    Goto(Screen),
    /// Offer the key to the menu navigator; if it does not take it, go to
    /// `fallback` (if any).
    Menu { key: Key, fallback: Option<Screen> },
    /// Step the card selector and (re)arm the debounced card switch.
    SwitchCard(CardStep),
}

pub fn route(screen: Screen, key: Key) -> Reaction {
    match screen {
        Screen::Main => match key {
            Key::Menu => Reaction::Goto(Screen::Menu),
            // Channel on PREV/NEXT, index on BACK/ENTER.
            Key::Prev => Reaction::SwitchCard(CardStep::PrevChannel),
            Key::Next => Reaction::SwitchCard(CardStep::NextChannel),
            Key::Back => Reaction::SwitchCard(CardStep::PrevIndex),
            Key::Enter => Reaction::SwitchCard(CardStep::NextIndex),
        },
        Screen::Menu => match key {
            Key::Menu => Reaction::Goto(Screen::Main),
            Key::Back => Reaction::Menu {
                key,
                fallback: Some(Screen::Main),
            },
            Key::Prev | Key::Next | Key::Enter => Reaction::Menu {
                key,
                fallback: None,
            },
        },
        Screen::FreePsxBoot => Reaction::Goto(Screen::Main),
        Screen::CardSwitch => Reaction::Ignore,
    }
}
