//! Physics module
//!
//! Static-scene collision for a walking player. Built from scratch without
//! external physics library dependencies.
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in units per second.
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3) re-exported from glam
//! - [`collision`] - Boxes, rays, triangles and their intersection tests
//! - [`collider`] - Tagged static colliders and the collider set
//! - [`resolver`] - Accept/reject policy for candidate player moves

pub mod collider;
pub mod collision;
pub mod resolver;
pub mod types;

pub use collider::{Collider, ColliderSet, PROBE_DIRECTIONS};
pub use collision::{Aabb, MeshSurface, Ray, Triangle, ray_aabb_intersect, ray_triangle_intersect};
pub use resolver::{CollisionResolver, PlayerFootprint, Resolution};
pub use types::Vec3;
