//! Classroom Configuration
//!
//! Every tunable of the walkable classroom in one serde-backed struct.
//! `Default` returns the values the experience ships with; a JSON file may
//! override any subset of them.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::camera::LookController;
use crate::input::{InputAction, KeyBindings, KeyCode};
use crate::interaction::{HINT_COOLDOWN, PROXIMITY_THRESHOLD};
use crate::physics::PlayerFootprint;
use crate::player::{BODY_HEIGHT, EYE_HEIGHT, MAX_FRAME_TIME, MovementIntegrator, PLAYER_RADIUS, WALK_SPEED, WHEEL_NUDGE};
use crate::world::{SceneSettings, WorldBounds};

/// Walking parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Units per second
    pub walk_speed: f32,
    /// Longest frame step integrated at once (seconds)
    pub max_frame_time: f32,
    /// Units moved per wheel notch
    pub wheel_nudge: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            max_frame_time: MAX_FRAME_TIME,
            wheel_nudge: WHEEL_NUDGE,
        }
    }
}

/// Camera look parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians per dragged pixel
    pub sensitivity: f32,
    /// Radians per second while a pan key is held
    pub pan_rate: f32,
    /// Vertical field of view used for click picking (degrees)
    pub fov_degrees: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            pan_rate: 1.8,
            fov_degrees: 75.0,
        }
    }
}

/// Player body dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub eye_height: f32,
    /// Collision half-width on X and Z
    pub radius: f32,
    /// Collision box height from the feet
    pub body_height: f32,
    /// Eye position used when the scene names no spawn
    pub spawn: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            eye_height: EYE_HEIGHT,
            radius: PLAYER_RADIUS,
            body_height: BODY_HEIGHT,
            spawn: Vec3::new(70.0, EYE_HEIGHT, 10.0),
        }
    }
}

/// Station hint parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Planar distance under which a station hints
    pub proximity_threshold: f32,
    /// Seconds between repeated hints from one station
    pub hint_cooldown: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: PROXIMITY_THRESHOLD,
            hint_cooldown: HINT_COOLDOWN,
        }
    }
}

/// One key → action pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindingEntry {
    pub key: KeyCode,
    pub action: InputAction,
}

/// Central configuration for the classroom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassroomConfig {
    pub movement: MovementConfig,
    pub look: LookConfig,
    pub player: PlayerConfig,
    pub interaction: InteractionConfig,
    /// World bounds, model scale and synthetic room sizes
    pub scene: SceneSettings,
    /// Key bindings; WASD move and arrows pan when empty
    pub key_bindings: Vec<KeyBindingEntry>,
}

impl Default for ClassroomConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            look: LookConfig::default(),
            player: PlayerConfig::default(),
            interaction: InteractionConfig::default(),
            scene: SceneSettings::default(),
            key_bindings: Vec::new(),
        }
    }
}

impl ClassroomConfig {
    /// Load and validate a JSON config file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the movement core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("movement.walk_speed", self.movement.walk_speed),
            ("movement.max_frame_time", self.movement.max_frame_time),
            ("look.sensitivity", self.look.sensitivity),
            ("look.fov_degrees", self.look.fov_degrees),
            ("player.eye_height", self.player.eye_height),
            ("player.radius", self.player.radius),
            ("player.body_height", self.player.body_height),
            ("scene.scale", self.scene.scale),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", field, value)));
            }
        }
        let non_negative = [
            ("movement.wheel_nudge", self.movement.wheel_nudge),
            ("look.pan_rate", self.look.pan_rate),
            ("interaction.proximity_threshold", self.interaction.proximity_threshold),
            ("interaction.hint_cooldown", self.interaction.hint_cooldown),
            ("scene.boundary_thickness", self.scene.boundary_thickness),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must not be negative, got {}", field, value)));
            }
        }
        if self.look.fov_degrees >= 180.0 {
            return Err(ConfigError::Invalid(format!(
                "look.fov_degrees must be below 180, got {}",
                self.look.fov_degrees
            )));
        }
        if !self.scene.bounds.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "scene.bounds min {:?} exceeds max {:?}",
                self.scene.bounds.min, self.scene.bounds.max
            )));
        }
        if !self.player.spawn.is_finite() {
            return Err(ConfigError::Invalid("player.spawn must be finite".to_string()));
        }
        Ok(())
    }

    /// Active key bindings.
    pub fn bindings(&self) -> KeyBindings {
        if self.key_bindings.is_empty() {
            KeyBindings::new()
        } else {
            KeyBindings::from_pairs(self.key_bindings.iter().map(|e| (e.key, e.action)))
        }
    }

    pub fn integrator(&self) -> MovementIntegrator {
        MovementIntegrator::new(
            self.movement.walk_speed,
            self.movement.max_frame_time,
            self.movement.wheel_nudge,
        )
    }

    pub fn look_controller(&self) -> LookController {
        LookController::with_rates(self.look.sensitivity, self.look.pan_rate)
    }

    pub fn footprint(&self) -> PlayerFootprint {
        PlayerFootprint::new(self.player.radius, self.player.body_height, self.player.eye_height)
    }

    pub fn bounds(&self) -> WorldBounds {
        self.scene.bounds
    }

    /// Scene settings with the player's spawn and dimensions applied.
    pub fn scene_settings(&self) -> SceneSettings {
        SceneSettings {
            spawn: self.player.spawn,
            eye_height: self.player.eye_height,
            player_radius: self.player.radius,
            body_height: self.player.body_height,
            ..self.scene
        }
    }

    pub fn fov_radians(&self) -> f32 {
        self.look.fov_degrees.to_radians()
    }
}
