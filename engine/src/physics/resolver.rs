//! Collision Resolver
//!
//! Decides whether a candidate player position is committed.
//!
//! # Resolution policy
//!
//! 1. Build the player box at the candidate position.
//! 2. Test it against every collider in the set.
//! 3. Any single hit rejects the whole move: the player keeps the
//!    pre-frame position on every axis. There is no sliding and no
//!    per-axis retry, so a diagonal approach to a wall stops dead.
//! 4. Whatever the outcome, clamp the result into the world bounds.

use glam::Vec3;

use super::collider::ColliderSet;
use super::collision::Aabb;
use crate::world::WorldBounds;

/// Fixed player size used to build the collision box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerFootprint {
    /// Half-width of the box on X and Z
    pub radius: f32,
    /// Box height from the feet
    pub height: f32,
    /// Height of the eye above the feet; positions are eye positions
    pub eye_height: f32,
}

impl PlayerFootprint {
    pub fn new(radius: f32, height: f32, eye_height: f32) -> Self {
        Self {
            radius,
            height,
            eye_height,
        }
    }

    /// Player box for an eye position.
    ///
    /// X and Z span `radius` either side of the position; Y runs from the
    /// feet (`eye.y - eye_height`) up `height`.
    pub fn box_at(&self, eye: Vec3) -> Aabb {
        let feet = eye.y - self.eye_height;
        Aabb {
            min: Vec3::new(eye.x - self.radius, feet, eye.z - self.radius),
            max: Vec3::new(eye.x + self.radius, feet + self.height, eye.z + self.radius),
        }
    }
}

/// Outcome of resolving one candidate move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Committed position after the bounds clamp
    pub position: Vec3,
    /// Index of the collider that rejected the move, if one did
    pub blocked_by: Option<usize>,
    /// The candidate was NaN/infinite and discarded
    pub rejected_non_finite: bool,
}

impl Resolution {
    /// Whether the candidate move was refused.
    pub fn is_blocked(&self) -> bool {
        self.blocked_by.is_some() || self.rejected_non_finite
    }
}

/// Owns the static collider set and the world bounds, and resolves moves.
#[derive(Debug, Clone)]
pub struct CollisionResolver {
    colliders: ColliderSet,
    bounds: WorldBounds,
    footprint: PlayerFootprint,
}

impl CollisionResolver {
    pub fn new(colliders: ColliderSet, bounds: WorldBounds, footprint: PlayerFootprint) -> Self {
        Self {
            colliders,
            bounds,
            footprint,
        }
    }

    pub fn colliders(&self) -> &ColliderSet {
        &self.colliders
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn footprint(&self) -> &PlayerFootprint {
        &self.footprint
    }

    /// Index of the first collider overlapping the player at `position`.
    pub fn first_blocking(&self, position: Vec3) -> Option<usize> {
        self.colliders.first_blocking(&self.footprint.box_at(position))
    }

    /// Resolve a move from `current` to `candidate`.
    pub fn resolve(&self, current: Vec3, candidate: Vec3) -> Resolution {
        let (accepted, blocked_by, rejected_non_finite) = if !candidate.is_finite() {
            (current, None, true)
        } else if candidate == current {
            (current, None, false)
        } else {
            match self.first_blocking(candidate) {
                Some(index) => (current, Some(index), false),
                None => (candidate, None, false),
            }
        };

        Resolution {
            position: self.bounds.clamp(accepted, self.footprint.radius),
            blocked_by,
            rejected_non_finite,
        }
    }
}
