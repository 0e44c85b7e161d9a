//! Config Module
//!
//! Centralized configuration for the classroom's movement, look, player and
//! scene parameters.

pub mod classroom_config;

pub use classroom_config::{
    ClassroomConfig, InteractionConfig, KeyBindingEntry, LookConfig, MovementConfig, PlayerConfig,
};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value the movement core cannot run with
    #[error("Invalid config: {0}")]
    Invalid(String),
}
