//! Static colliders
//!
//! The immovable obstacles of a scene (walls, furniture, world boundary),
//! each tagged with the hit-test strategy chosen for it when the scene was
//! built:
//!
//! - [`Collider::BoundingBox`] - O(1) box overlap against the player box
//! - [`Collider::MeshSurface`] - ray probes against exact triangles
//!
//! The ray probe is an approximation of a swept-volume test: ten rays of
//! fixed length leave the player-box centre, and the player is blocked if
//! any of them touches the surface. Thin geometry that sits between two
//! rays can be missed.

use glam::Vec3;

use super::collision::{Aabb, MeshSurface};

/// 1/sqrt(2), the horizontal component of the diagonal probes.
const DIAGONAL: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Probe directions for mesh collision: 8 horizontal at 45° steps plus up and down.
pub const PROBE_DIRECTIONS: [Vec3; 10] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(DIAGONAL, 0.0, DIAGONAL),
    Vec3::new(-DIAGONAL, 0.0, DIAGONAL),
    Vec3::new(DIAGONAL, 0.0, -DIAGONAL),
    Vec3::new(-DIAGONAL, 0.0, -DIAGONAL),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
];

/// An obstacle and the strategy used to hit-test it.
#[derive(Debug, Clone, PartialEq)]
pub enum Collider {
    /// Precomputed bounding box
    BoundingBox(Aabb),
    /// Full surface geometry tested with ray probes
    MeshSurface(MeshSurface),
}

impl Collider {
    /// Bounding box of the obstacle, whatever its strategy.
    pub fn bounds(&self) -> Aabb {
        match self {
            Collider::BoundingBox(aabb) => *aabb,
            Collider::MeshSurface(mesh) => *mesh.bounds(),
        }
    }

    /// Does this obstacle block a player occupying `player_box`?
    pub fn blocks(&self, player_box: &Aabb) -> bool {
        match self {
            Collider::BoundingBox(aabb) => aabb.intersects(player_box),
            Collider::MeshSurface(mesh) => mesh_blocks(mesh, player_box),
        }
    }
}

/// Ray-probe test for a mesh surface.
///
/// Quick bounds rejection first; then one ray per probe direction from the
/// player-box centre, each reaching half the box's wider horizontal side.
fn mesh_blocks(mesh: &MeshSurface, player_box: &Aabb) -> bool {
    if !mesh.bounds().intersects(player_box) {
        return false;
    }

    let center = player_box.center();
    let size = player_box.size();
    let probe_radius = size.x.max(size.z) * 0.5;

    PROBE_DIRECTIONS
        .iter()
        .any(|&dir| mesh.ray_cast(center, dir, probe_radius).is_some())
}

/// The collider set of a scene. Built once at load, read-only afterward.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColliderSet {
    colliders: Vec<Collider>,
}

impl ColliderSet {
    pub fn new(colliders: Vec<Collider>) -> Self {
        Self { colliders }
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Collider> {
        self.colliders.get(index)
    }

    /// Index of the first collider blocking `player_box`, if any.
    pub fn first_blocking(&self, player_box: &Aabb) -> Option<usize> {
        self.colliders.iter().position(|c| c.blocks(player_box))
    }
}

impl FromIterator<Collider> for ColliderSet {
    fn from_iter<I: IntoIterator<Item = Collider>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ColliderSet {
    type Item = &'a Collider;
    type IntoIter = std::slice::Iter<'a, Collider>;

    fn into_iter(self) -> Self::IntoIter {
        self.colliders.iter()
    }
}
