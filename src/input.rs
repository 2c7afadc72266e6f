//! Key input abstraction.
//!
//! Physical buttons are debounced elsewhere (button tasks on target, a
//! queue in tests). The GUI only ever sees one press at a time.

use heapless::Deque;

/// Physical keys on the device (after debouncing).
///
/// On the Main screen PREV/NEXT step the channel and BACK/ENTER step the
/// card index; everywhere else they keep their usual meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Menu,
    Prev,
    Next,
    Enter,
    Back,
}

impl Key {
    pub const ALL: [Key; 5] = [Key::Menu, Key::Prev, Key::Next, Key::Enter, Key::Back];
}

/// Polled key source.
pub trait KeyInput {
    /// Next pressed key, if any.
    fn poll(&mut self) -> Option<Key>;

    /// Discard every press buffered so far.
    fn flush(&mut self);
}

/// Fixed-capacity FIFO of key presses.
///
/// When full, the newest press is dropped.
#[derive(Clone, Debug, Default)]
pub struct KeyQueue<const N: usize> {
    pending: Deque<Key, N>,
}

impl<const N: usize> KeyQueue<N> {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
        }
    }

    /// Queue a press. Returns `false` if it was dropped.
    pub fn press(&mut self, key: Key) -> bool {
        self.pending.push_back(key).is_ok()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<const N: usize> KeyInput for KeyQueue<N> {
    fn poll(&mut self) -> Option<Key> {
        self.pending.pop_front()
    }

    fn flush(&mut self) {
        self.pending.clear();
    }
}

impl<T: KeyInput + ?Sized> KeyInput for &mut T {
    fn poll(&mut self) -> Option<Key> {
        (**self).poll()
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}
