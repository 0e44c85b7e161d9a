//! Input Module
//!
//! Platform-agnostic input sampling for keyboard and pointer.
//! This module is decoupled from any specific windowing system (like winit):
//! the host forwards its device events to [`InputState`], and the frame loop
//! takes a single [`InputSnapshot`] per frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use in_a_soup_engine::input::{InputState, KeyCode};
//!
//! let mut input = InputState::new();
//!
//! // Event handlers
//! input.on_key_down(KeyCode::W);
//! input.on_pointer_down(100.0, 50.0);
//! input.on_pointer_move(112.0, 50.0);
//!
//! // Frame callback
//! let snapshot = input.sample();
//! assert_eq!(snapshot.intent.forward_axis, 1.0);
//! ```

pub mod bindings;
pub mod keyboard;
pub mod pointer;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};
pub use pointer::PointerDragState;

/// Per-frame desired direction of travel.
///
/// Transient: derived fresh each frame, never stored beyond it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// +1 forward, -1 backward, 0 when neither or both are held
    pub forward_axis: f32,
    /// +1 right, -1 left, 0 when neither or both are held
    pub strafe_axis: f32,
    /// Camera orientation is changing this frame (drag or pan keys)
    pub rotating: bool,
}

impl MovementIntent {
    /// Intent with the given axes and no rotation.
    pub fn new(forward_axis: f32, strafe_axis: f32) -> Self {
        Self {
            forward_axis,
            strafe_axis,
            rotating: false,
        }
    }

    /// True when neither axis asks for movement.
    pub fn is_idle(&self) -> bool {
        self.forward_axis == 0.0 && self.strafe_axis == 0.0
    }
}

/// Everything the frame loop needs from input, read once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Movement axes
    pub intent: MovementIntent,
    /// Pointer drag since the previous snapshot, in pixels
    pub look_delta: (f32, f32),
    /// Pan key axes: x = right(+)/left(-), y = up(+)/down(-)
    pub pan: (f32, f32),
    /// Wheel notches since the previous snapshot
    pub wheel: f32,
}

/// Combined input state for keyboard and pointer plus the active bindings.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub pointer: PointerDragState,
    pub bindings: KeyBindings,
}

impl InputState {
    /// Create a new input state with default bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input state with custom bindings.
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn on_key_down(&mut self, key: KeyCode) {
        self.keyboard.on_key_down(key);
    }

    pub fn on_key_up(&mut self, key: KeyCode) {
        self.keyboard.on_key_up(key);
    }

    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.pointer.on_down(x, y);
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer.on_move(x, y);
    }

    pub fn on_pointer_up(&mut self) {
        self.pointer.on_up();
    }

    pub fn on_wheel(&mut self, notches: f32) {
        self.pointer.on_wheel(notches);
    }

    /// Check whether a logical action is held under the current bindings.
    pub fn is_action_pressed(&self, action: InputAction) -> bool {
        self.bindings
            .is_action_pressed(action, self.keyboard.pressed_keys())
    }

    fn axis(&self, positive: InputAction, negative: InputAction) -> f32 {
        (self.is_action_pressed(positive) as i32 - self.is_action_pressed(negative) as i32) as f32
    }

    /// Take this frame's snapshot.
    ///
    /// Consumes accumulated pointer and wheel deltas; held keys stay held.
    pub fn sample(&mut self) -> InputSnapshot {
        let forward_axis = self.axis(InputAction::MoveForward, InputAction::MoveBack);
        let strafe_axis = self.axis(InputAction::StrafeRight, InputAction::StrafeLeft);
        let pan = (
            self.axis(InputAction::PanRight, InputAction::PanLeft),
            self.axis(InputAction::PanUp, InputAction::PanDown),
        );
        let look_delta = self.pointer.consume_delta();
        let wheel = self.pointer.consume_wheel();

        let rotating = look_delta != (0.0, 0.0) || pan != (0.0, 0.0);

        InputSnapshot {
            intent: MovementIntent {
                forward_axis,
                strafe_axis,
                rotating,
            },
            look_delta,
            pan,
            wheel,
        }
    }

    /// Reset all input state, keeping bindings.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.pointer.reset();
    }
}
