//! Look Controller Module
//!
//! First-person yaw/pitch driven by pointer drags and the pan keys.
//!
//! Key features:
//! - Drag input rotates only while the pointer button is held
//! - Configurable sensitivity (default: 0.002 rad/pixel)
//! - Keyboard panning at a fixed angular rate (default: 1.8 rad/s)
//! - Pitch clamped to ±90 degrees
//! - No smoothing

use glam::Vec3;

use crate::input::InputSnapshot;
use crate::physics::Ray;

/// Pitch limit: straight down
pub const PITCH_LIMIT_MIN: f32 = -std::f32::consts::FRAC_PI_2;
/// Pitch limit: straight up
pub const PITCH_LIMIT_MAX: f32 = std::f32::consts::FRAC_PI_2;

/// Yaw/pitch look state.
///
/// ## Coordinate System
/// - +X = right, +Y = up, -Z = forward at yaw 0
/// - Positive yaw turns left (counter-clockwise seen from above)
///
/// ## Usage
/// ```rust,ignore
/// let mut look = LookController::new();
/// look.apply_snapshot(&input.sample(), dt);
/// let forward = look.forward();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LookController {
    /// Horizontal angle (radians), unrestricted
    pub yaw: f32,
    /// Vertical angle (radians), clamped to ±π/2
    pub pitch: f32,
    /// Drag sensitivity in radians per pixel
    pub sensitivity: f32,
    /// Pan key rate in radians per second
    pub pan_rate: f32,
}

impl Default for LookController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.002,
            pan_rate: 1.8,
        }
    }
}

impl LookController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(sensitivity: f32, pan_rate: f32) -> Self {
        Self {
            sensitivity,
            pan_rate,
            ..Default::default()
        }
    }

    /// Set the pitch directly (clamped).
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = clamp_pitch(pitch);
    }

    /// Apply a drag delta in pixels.
    ///
    /// Dragging right turns right (yaw decreases); dragging down looks down.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.yaw -= dx * self.sensitivity;
        self.pitch = clamp_pitch(self.pitch - dy * self.sensitivity);
    }

    /// Apply pan key axes for `dt` seconds.
    ///
    /// `pan.0` is right(+)/left(-), `pan.1` is up(+)/down(-).
    pub fn apply_pan(&mut self, pan: (f32, f32), dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let step = self.pan_rate * dt;
        self.yaw -= pan.0 * step;
        self.pitch = clamp_pitch(self.pitch + pan.1 * step);
    }

    /// Apply the look parts of one frame's input.
    pub fn apply_snapshot(&mut self, snapshot: &InputSnapshot, dt: f32) {
        self.apply_drag(snapshot.look_delta.0, snapshot.look_delta.1);
        self.apply_pan(snapshot.pan, dt);
    }

    /// View direction, normalized.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            -self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Horizontal right vector, normalized.
    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Camera up vector, perpendicular to forward and right.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// World-space ray from `eye` through a pointer position.
    ///
    /// `ndc` is in [-1, 1] on both axes with +y up; `fov` is the vertical
    /// field of view in radians.
    pub fn pick_ray(&self, eye: Vec3, ndc: (f32, f32), aspect: f32, fov: f32) -> Ray {
        super::raycast::pick_ray(eye, self.forward(), self.right(), self.up(), ndc, aspect, fov)
    }
}

#[inline]
fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(PITCH_LIMIT_MIN, PITCH_LIMIT_MAX)
}
