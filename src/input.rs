use std::collections::HashSet;
use std::hash::Hash;

/// Window events a display backend reports back to the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    KeyDown,
    KeyUp,
    MouseButtonDown,
    /// The window lost keyboard focus. Held keys will not report a release.
    FocusLost,
}

impl InputEvent {
    /// Whether this event ends a blocking wait in [`crate::Display::close`].
    pub fn ends_wait(self) -> bool {
        matches!(
            self,
            InputEvent::Quit | InputEvent::KeyDown | InputEvent::MouseButtonDown
        )
    }
}

/// Tracks which keys are currently held down.
#[derive(Debug, Clone)]
pub struct KeyboardState<K> {
    held: HashSet<K>,
}

impl<K: Eq + Hash> KeyboardState<K> {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
        }
    }

    pub fn press(&mut self, key: K) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: &K) {
        self.held.remove(key);
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_pressed(&self, key: &K) -> bool {
        self.held.contains(key)
    }

    pub fn any_pressed(&self) -> bool {
        !self.held.is_empty()
    }
}

impl<K: Eq + Hash> Default for KeyboardState<K> {
    fn default() -> Self {
        Self::new()
    }
}
