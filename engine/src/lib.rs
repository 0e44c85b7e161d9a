//! In A Soup Engine Library
//!
//! The movement core of a first-person walkable classroom: input sampling,
//! look control, Euler movement, collision against a static collider set,
//! world-bounds clamping and station proximity. Rendering is left to the
//! host; this library only produces positions, orientations and events.
//!
//! # Modules
//!
//! - [`input`] - Platform-agnostic keyboard and pointer sampling
//! - [`camera`] - Yaw/pitch look control and picking rays
//! - [`player`] - Player body and the movement integrator
//! - [`physics`] - Boxes, mesh surfaces, colliders and the collision resolver
//! - [`world`] - World bounds and scene loading with fallback geometry
//! - [`interaction`] - Station hints, picking and visit progress
//! - [`game`] - Classroom session state, configuration and the painting gallery
//!
//! # Example
//!
//! ```ignore
//! use in_a_soup_engine::game::{ClassroomConfig, GameSessionState};
//! use in_a_soup_engine::input::KeyCode;
//! use in_a_soup_engine::world::ManifestSceneProvider;
//!
//! let config = ClassroomConfig::default();
//! let provider = ManifestSceneProvider::new("assets/classroom.json");
//! let mut session = GameSessionState::load(&config, &provider);
//!
//! // Event handlers
//! session.click((0.0, 0.0), 16.0 / 9.0); // dismiss the start prompt
//! session.input_mut().on_key_down(KeyCode::W);
//!
//! // Frame callback
//! let report = session.frame(1.0 / 60.0);
//! println!("eye at {:?}", report.position);
//! ```

pub mod camera;
pub mod input;
pub mod interaction;
pub mod physics;
pub mod player;
pub mod world;

// Experience-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used input types
pub use input::{InputSnapshot, InputState, KeyCode, MovementIntent};
// Re-export the movement core
pub use camera::LookController;
pub use physics::{Collider, ColliderSet, CollisionResolver};
pub use player::{MovementIntegrator, Player};
pub use world::{SceneAssets, SceneBuilder, WorldBounds};
