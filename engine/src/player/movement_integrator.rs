//! Movement Integrator
//!
//! Turns a movement intent into a candidate position for the collision
//! resolver to accept or reject.
//!
//! # Model
//!
//! Direct Euler step: constant speed, no acceleration, no momentum, and no
//! vertical motion. Displacement is relative to yaw only, so looking up or
//! down never changes walking speed.
//!
//! ```text
//! dx = (sin(yaw) * -forward + cos(yaw) * strafe) * speed * dt
//! dz = (cos(yaw) * -forward - sin(yaw) * strafe) * speed * dt
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use in_a_soup_engine::player::MovementIntegrator;
//!
//! let integrator = MovementIntegrator::default();
//! let candidate = integrator.step(player.position, &snapshot.intent, look.yaw, dt);
//! player.position = resolver.resolve(player.position, candidate).position;
//! ```

use glam::Vec3;

use crate::input::MovementIntent;

/// Walk speed in units per second
pub const WALK_SPEED: f32 = 15.0;

/// Longest frame step integrated at once, in seconds
pub const MAX_FRAME_TIME: f32 = 0.05;

/// Distance moved per wheel notch
pub const WHEEL_NUDGE: f32 = 0.25;

/// Integrates movement intents at a fixed speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntegrator {
    /// Units per second
    pub speed: f32,
    /// Upper clamp on frame time in seconds
    pub max_frame_time: f32,
    /// Units per wheel notch
    pub wheel_nudge: f32,
}

impl Default for MovementIntegrator {
    fn default() -> Self {
        Self {
            speed: WALK_SPEED,
            max_frame_time: MAX_FRAME_TIME,
            wheel_nudge: WHEEL_NUDGE,
        }
    }
}

impl MovementIntegrator {
    pub fn new(speed: f32, max_frame_time: f32, wheel_nudge: f32) -> Self {
        Self {
            speed,
            max_frame_time,
            wheel_nudge,
        }
    }

    /// Clamp a frame time into `[0, max_frame_time]`. NaN becomes 0.
    pub fn clamp_frame_time(&self, dt: f32) -> f32 {
        if dt.is_nan() || dt <= 0.0 {
            0.0
        } else {
            dt.min(self.max_frame_time)
        }
    }

    /// Raw world-space displacement for `dt` seconds. `dt` is used as given.
    pub fn displacement(&self, intent: &MovementIntent, yaw: f32, dt: f32) -> Vec3 {
        let (sin, cos) = yaw.sin_cos();
        let f = intent.forward_axis;
        let s = intent.strafe_axis;
        let scale = self.speed * dt;
        Vec3::new(
            (sin * -f + cos * s) * scale,
            0.0,
            (cos * -f - sin * s) * scale,
        )
    }

    /// Candidate position after one frame.
    ///
    /// Frame time is clamped first. An idle intent returns `position`
    /// unchanged whatever `dt` is.
    pub fn step(&self, position: Vec3, intent: &MovementIntent, yaw: f32, dt: f32) -> Vec3 {
        if intent.is_idle() {
            return position;
        }
        position + self.displacement(intent, yaw, self.clamp_frame_time(dt))
    }

    /// Candidate position after a wheel nudge along the facing axis.
    ///
    /// Positive notches (scrolling down) move forward, negative notches
    /// move backward.
    pub fn nudge(&self, position: Vec3, yaw: f32, notches: f32) -> Vec3 {
        if notches == 0.0 || !notches.is_finite() {
            return position;
        }
        let (sin, cos) = yaw.sin_cos();
        let backward = Vec3::new(sin, 0.0, cos);
        position + backward * -(self.wheel_nudge * notches)
    }
}
