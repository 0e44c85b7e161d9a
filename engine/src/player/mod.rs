//! Player Module
//!
//! Player body state and the per-frame movement step.
//!
//! # Components
//!
//! - [`Player`] - Eye position, facing and fixed body dimensions
//! - [`MovementIntegrator`] - Euler step from movement intent to candidate position
//!   - Frame time clamped to 50 ms
//!   - Wheel nudges along the facing axis

pub mod body;
pub mod movement_integrator;

pub use body::{BODY_HEIGHT, EYE_HEIGHT, PLAYER_RADIUS, Player};
pub use movement_integrator::{MAX_FRAME_TIME, MovementIntegrator, WALK_SPEED, WHEEL_NUDGE};
