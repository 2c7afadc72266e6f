//! Main-screen card labels, refreshed only when the selection changes.

use core::fmt::Write;

use heapless::String;

use crate::card::CardManager;
use crate::ui::render::{Label, Renderer};

/// Last (index, channel) pair written to the Main screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardIdentityCache {
    shown: Option<(u16, u16)>,
}

impl CardIdentityCache {
    pub const fn new() -> Self {
        Self { shown: None }
    }

    pub fn shown(&self) -> Option<(u16, u16)> {
        self.shown
    }

    /// Compare the card manager's selection with what is on screen and
    /// rewrite both labels on mismatch. Returns `true` if labels changed.
    pub fn sync<C, R>(&mut self, cards: &C, renderer: &mut R) -> bool
    where
        C: CardManager + ?Sized,
        R: Renderer + ?Sized,
    {
        let current = (cards.index(), cards.channel());
        if self.shown == Some(current) {
            return false;
        }
        self.shown = Some(current);

        let mut text: String<8> = String::new();
        let _ = write!(text, "{}", current.0);
        renderer.set_text(Label::CardIndex, &text);

        text.clear();
        let _ = write!(text, "{}", current.1);
        renderer.set_text(Label::CardChannel, &text);
        true
    }
}
