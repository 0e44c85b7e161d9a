//! Player body
//!
//! Position, facing and the fixed body dimensions for the session.

use glam::Vec3;

use crate::physics::PlayerFootprint;

/// Eye height above the floor
pub const EYE_HEIGHT: f32 = 3.5;

/// Collision half-width on X and Z
pub const PLAYER_RADIUS: f32 = 0.3;

/// Body height from the feet
pub const BODY_HEIGHT: f32 = 7.0;

/// The walking player.
///
/// `position` is the eye position; `position.y` is pinned to the eye height
/// since vertical motion is not simulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub eye_height: f32,
    pub radius: f32,
    pub body_height: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            eye_height: EYE_HEIGHT,
            radius: PLAYER_RADIUS,
            body_height: BODY_HEIGHT,
        }
    }
}

impl Player {
    /// Player standing at `spawn` with default dimensions.
    pub fn at(spawn: Vec3) -> Self {
        let mut player = Self::default();
        player.position = spawn;
        player.pin_height();
        player
    }

    pub fn with_dimensions(mut self, eye_height: f32, radius: f32, body_height: f32) -> Self {
        self.eye_height = eye_height;
        self.radius = radius;
        self.body_height = body_height;
        self.pin_height();
        self
    }

    /// Collision footprint for this player's dimensions.
    pub fn footprint(&self) -> PlayerFootprint {
        PlayerFootprint::new(self.radius, self.body_height, self.eye_height)
    }

    /// Planar (x, z) position.
    pub fn ground_position(&self) -> (f32, f32) {
        (self.position.x, self.position.z)
    }

    /// Re-pin the eye to the fixed height.
    pub fn pin_height(&mut self) {
        self.position.y = self.eye_height;
    }
}
