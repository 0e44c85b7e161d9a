//! Pointer Drag State
//!
//! Drag-to-look pointer tracking. Unlike a captured FPS mouse, the cursor
//! stays visible: look deltas only accumulate while the pointer button (or a
//! touch) is held, and are consumed once per frame.

/// Pointer state with drag delta accumulation.
///
/// - **Drag gating**: movement only counts while the button is down
/// - **Delta accumulation**: deltas accumulate until consumed
/// - **Atomic consumption**: `consume_delta()` returns accumulated delta and resets it
///
/// # Example
///
/// ```rust,ignore
/// let mut pointer = PointerDragState::new();
///
/// pointer.on_down(100.0, 100.0);
/// pointer.on_move(110.0, 95.0);
/// pointer.on_move(113.0, 97.0);
///
/// let (dx, dy) = pointer.consume_delta();
/// // dx = 13.0, dy = -3.0
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointerDragState {
    /// Whether the pointer button / touch is currently held.
    is_down: bool,
    /// Last pointer position seen while held.
    last: Option<(f32, f32)>,
    /// Accumulated horizontal delta since last consume.
    delta_x: f32,
    /// Accumulated vertical delta since last consume.
    delta_y: f32,
    /// Accumulated wheel notches since last consume (positive = scroll down).
    wheel: f32,
}

impl PointerDragState {
    /// Create a new pointer state, released, with zero deltas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer button pressed (or touch started) at a client position.
    pub fn on_down(&mut self, x: f32, y: f32) {
        self.is_down = true;
        self.last = Some((x, y));
    }

    /// Pointer moved to a client position.
    ///
    /// Ignored unless the button is held.
    pub fn on_move(&mut self, x: f32, y: f32) {
        if !self.is_down {
            return;
        }
        if let Some((last_x, last_y)) = self.last {
            self.delta_x += x - last_x;
            self.delta_y += y - last_y;
        }
        self.last = Some((x, y));
    }

    /// Pointer button released (or touch ended).
    pub fn on_up(&mut self) {
        self.is_down = false;
        self.last = None;
    }

    /// Accumulate wheel motion, in notches.
    #[inline]
    pub fn on_wheel(&mut self, notches: f32) {
        self.wheel += notches;
    }

    /// Check whether the pointer is currently held.
    #[inline]
    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// Consume the accumulated drag delta, returning it and resetting to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> (f32, f32) {
        let delta = (self.delta_x, self.delta_y);
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        delta
    }

    /// Consume the accumulated wheel notches.
    #[inline]
    pub fn consume_wheel(&mut self) -> f32 {
        std::mem::take(&mut self.wheel)
    }

    /// Get the current accumulated delta without consuming it.
    #[inline]
    pub fn peek_delta(&self) -> (f32, f32) {
        (self.delta_x, self.delta_y)
    }

    /// Reset all state to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
