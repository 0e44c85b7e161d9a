//! Keyboard Input Module
//!
//! Tracks which physical keys are held. Decoupled from winit to use generic
//! key codes; the host translates its own key events into [`KeyCode`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
///
/// These map to standard keyboard keys but are not tied to winit::keyboard::KeyCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Other letters the host may forward
    E,
    Q,
    F,
    R,

    // Control keys
    Space,
    Enter,
    Escape,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Set of keys currently held down.
///
/// Key events mutate the set; the frame loop reads it once per frame
/// through [`super::KeyBindings::is_action_pressed`].
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns `true` if the key was not already held.
    pub fn on_key_down(&mut self, key: KeyCode) -> bool {
        if key == KeyCode::Unknown {
            return false;
        }
        self.pressed.insert(key)
    }

    /// Record a key release. Returns `true` if the key was held.
    pub fn on_key_up(&mut self, key: KeyCode) -> bool {
        self.pressed.remove(&key)
    }

    /// Check whether a key is currently held.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// All keys currently held.
    pub fn pressed_keys(&self) -> &HashSet<KeyCode> {
        &self.pressed
    }

    /// Check if any key is held.
    pub fn any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    /// Release every key (focus loss, modal panel opened).
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}
