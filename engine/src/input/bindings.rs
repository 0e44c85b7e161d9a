//! Input Bindings Module
//!
//! Maps physical keys to logical actions. Several keys may drive the same
//! action (WASD and the arrow keys both moving, for instance), but a key
//! drives at most one action.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::KeyCode;

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    StrafeLeft,
    /// Strafe right (default: D)
    StrafeRight,
    /// Tilt the camera up (default: ArrowUp)
    PanUp,
    /// Tilt the camera down (default: ArrowDown)
    PanDown,
    /// Turn the camera left (default: ArrowLeft)
    PanLeft,
    /// Turn the camera right (default: ArrowRight)
    PanRight,
}

impl InputAction {
    /// Every action, in declaration order.
    pub const ALL: [InputAction; 8] = [
        InputAction::MoveForward,
        InputAction::MoveBack,
        InputAction::StrafeLeft,
        InputAction::StrafeRight,
        InputAction::PanUp,
        InputAction::PanDown,
        InputAction::PanLeft,
        InputAction::PanRight,
    ];
}

/// Maps physical keys to logical actions, supporting customizable key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
    /// Map from logical action to every key bound to it
    action_to_keys: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Default bindings: WASD moves, arrow keys pan the camera.
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::StrafeLeft);
        bindings.bind(KeyCode::D, InputAction::StrafeRight);
        bindings.bind(KeyCode::ArrowUp, InputAction::PanUp);
        bindings.bind(KeyCode::ArrowDown, InputAction::PanDown);
        bindings.bind(KeyCode::ArrowLeft, InputAction::PanLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::PanRight);

        bindings
    }

    /// Alternate preset where both WASD and the arrow keys move the player.
    /// Camera turning is left to pointer drag only.
    pub fn arrows_move() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::StrafeLeft);
        bindings.bind(KeyCode::ArrowLeft, InputAction::StrafeLeft);
        bindings.bind(KeyCode::D, InputAction::StrafeRight);
        bindings.bind(KeyCode::ArrowRight, InputAction::StrafeRight);

        bindings
    }

    /// Bindings with nothing mapped.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_keys: HashMap::new(),
        }
    }

    /// Build bindings from explicit key/action pairs (later pairs win per key).
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (KeyCode, InputAction)>,
    {
        let mut bindings = Self::empty();
        for (key, action) in pairs {
            bindings.bind(key, action);
        }
        bindings
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// Other keys bound to `action` are kept.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind_key(key);
        self.key_to_action.insert(key, action);
        self.action_to_keys.entry(action).or_default().push(key);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.key_to_action.remove(&key) {
            if let Some(keys) = self.action_to_keys.get_mut(&action) {
                keys.retain(|&k| k != key);
                if keys.is_empty() {
                    self.action_to_keys.remove(&action);
                }
            }
        }
    }

    /// Remove every key bound to a specific action.
    pub fn unbind_action(&mut self, action: InputAction) {
        if let Some(keys) = self.action_to_keys.remove(&action) {
            for key in keys {
                self.key_to_action.remove(&key);
            }
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the keys bound to a logical action.
    pub fn get_keys(&self, action: InputAction) -> &[KeyCode] {
        self.action_to_keys
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if a specific action is currently pressed, given a set of pressed keys.
    ///
    /// True when any key bound to the action is held.
    pub fn is_action_pressed(&self, action: InputAction, pressed_keys: &HashSet<KeyCode>) -> bool {
        self.get_keys(action).iter().any(|key| pressed_keys.contains(key))
    }

    /// Get all current bindings as key-action pairs.
    pub fn all_bindings(&self) -> impl Iterator<Item = (KeyCode, InputAction)> + '_ {
        self.key_to_action.iter().map(|(&k, &a)| (k, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::S), Some(InputAction::MoveBack));
        assert_eq!(bindings.get_action(KeyCode::A), Some(InputAction::StrafeLeft));
        assert_eq!(bindings.get_action(KeyCode::D), Some(InputAction::StrafeRight));
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::PanUp));
        assert_eq!(bindings.get_action(KeyCode::ArrowDown), Some(InputAction::PanDown));
        assert_eq!(bindings.get_action(KeyCode::ArrowLeft), Some(InputAction::PanLeft));
        assert_eq!(bindings.get_action(KeyCode::ArrowRight), Some(InputAction::PanRight));
    }

    #[test]
    fn test_arrows_move_preset() {
        let bindings = KeyBindings::arrows_move();

        assert_eq!(bindings.get_keys(InputAction::MoveForward), &[KeyCode::W, KeyCode::ArrowUp]);
        assert_eq!(bindings.get_action(KeyCode::ArrowLeft), Some(InputAction::StrafeLeft));
        assert!(bindings.get_keys(InputAction::PanLeft).is_empty());
    }

    #[test]
    fn test_rebind_key_moves_it() {
        let mut bindings = KeyBindings::new();

        // ArrowUp now moves instead of panning
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);

        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::MoveForward));
        assert!(bindings.get_keys(InputAction::PanUp).is_empty());
        // W is still bound alongside it
        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
    }

    #[test]
    fn test_is_action_pressed_any_key() {
        let bindings = KeyBindings::arrows_move();

        let mut pressed = HashSet::new();
        pressed.insert(KeyCode::ArrowUp);

        assert!(bindings.is_action_pressed(InputAction::MoveForward, &pressed));
        assert!(!bindings.is_action_pressed(InputAction::MoveBack, &pressed));
    }

    #[test]
    fn test_unbind_key() {
        let mut bindings = KeyBindings::arrows_move();

        bindings.unbind_key(KeyCode::W);

        assert_eq!(bindings.get_action(KeyCode::W), None);
        assert_eq!(bindings.get_keys(InputAction::MoveForward), &[KeyCode::ArrowUp]);
    }

    #[test]
    fn test_unbind_action() {
        let mut bindings = KeyBindings::arrows_move();

        bindings.unbind_action(InputAction::StrafeLeft);

        assert_eq!(bindings.get_action(KeyCode::A), None);
        assert_eq!(bindings.get_action(KeyCode::ArrowLeft), None);
    }

    #[test]
    fn test_unbound_action_not_pressed() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_action(InputAction::MoveForward);

        let mut pressed = HashSet::new();
        pressed.insert(KeyCode::W);

        assert!(!bindings.is_action_pressed(InputAction::MoveForward, &pressed));
    }

    #[test]
    fn test_from_pairs() {
        let bindings = KeyBindings::from_pairs([
            (KeyCode::E, InputAction::MoveForward),
            (KeyCode::Q, InputAction::MoveBack),
        ]);
        assert_eq!(bindings.get_action(KeyCode::E), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::W), None);
        assert_eq!(bindings.all_bindings().count(), 2);
    }
}
