//! World Bounds
//!
//! The outer safety clamp on player position. Independent of colliders:
//! whatever the collider tests miss, the player never leaves this box.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::Aabb;

/// Fixed axis-aligned box clamping the player's reachable region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min: Vec3::new(-100.0, -10.0, -100.0),
            max: Vec3::new(100.0, 50.0, 100.0),
        }
    }
}

impl WorldBounds {
    /// Bounds from two corners, reordered per axis.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Clamp a position into the bounds, shrunk by `inset` on every side.
    ///
    /// On an axis narrower than `2 * inset` the position collapses to the
    /// middle of that axis. A non-finite component is replaced by the middle.
    pub fn clamp(&self, pos: Vec3, inset: f32) -> Vec3 {
        let inset = inset.max(0.0);
        let axis = |v: f32, lo: f32, hi: f32| {
            let (lo, hi) = (lo + inset, hi - inset);
            if lo > hi || !v.is_finite() {
                (lo + hi) * 0.5
            } else {
                v.clamp(lo, hi)
            }
        };
        Vec3::new(
            axis(pos.x, self.min.x, self.max.x),
            axis(pos.y, self.min.y, self.max.y),
            axis(pos.z, self.min.z, self.max.z),
        )
    }

    /// Closed containment test.
    pub fn contains(&self, pos: Vec3) -> bool {
        pos.cmpge(self.min).all() && pos.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn as_aabb(&self) -> Aabb {
        Aabb::new(self.min, self.max)
    }

    /// Min corner not above max on any axis, and all finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }
}
