//! World Module
//!
//! World-space limits and scene loading for the walkable classroom.
//!
//! ## Default World
//! A 200 x 200 unit floor plan (x and z in [-100, 100]) with y in [-10, 50].
//! Boundary walls straddle the X and Z faces; the bounds clamp catches
//! anything the walls miss.

pub mod bounds;
pub mod scene;

pub use bounds::WorldBounds;
pub use scene::{
    COLLISION_PREFIX, ManifestBox, ManifestMesh, ManifestSceneProvider, SceneAssets, SceneBuilder, SceneError,
    SceneManifest, SceneProvider, SceneSettings, SceneSource, is_collision_name,
};
