//! Camera Module
//!
//! First-person look state and pointer picking rays.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod look_controller;
pub mod raycast;

pub use look_controller::{LookController, PITCH_LIMIT_MAX, PITCH_LIMIT_MIN};
pub use raycast::{ndc_from_pixel, pick_ray};
