//! Collision primitives
//!
//! Axis-aligned boxes, rays, and triangle meshes, plus the intersection
//! tests the collision resolver is built from.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Ray-Triangle Intersection
//!
//! Möller–Trumbore: solves for the barycentric coordinates of the hit
//! directly, without computing the triangle's plane first.
//!
//! # Example
//!
//! ```ignore
//! use in_a_soup_engine::physics::collision::{Aabb, Ray, ray_aabb_intersect};
//! use glam::Vec3;
//!
//! let wall = Aabb::new(Vec3::new(-1.0, 0.0, -4.0), Vec3::new(1.0, 3.0, -2.0));
//! let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
//!
//! if let Some(t) = ray_aabb_intersect(ray.origin, ray.direction, wall.min, wall.max) {
//!     println!("Hit at distance {}: {:?}", t, ray.at(t));
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box from two corners. The corners are reordered per axis, so any two
    /// opposite corners may be passed.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box from a center point and half extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Positive-volume overlap test.
    ///
    /// Two boxes overlap iff their open intervals overlap on all three axes.
    /// Boxes that only share a face do not overlap.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Closed containment test.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Volume shared with another box (zero when they don't overlap).
    pub fn overlap_volume(&self, other: &Aabb) -> f32 {
        let extent = (self.max.min(other.max) - self.min.max(other.min)).max(Vec3::ZERO);
        extent.x * extent.y * extent.z
    }

    /// Box scaled about the world origin (manifest `scale` field).
    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(self.min * scale, self.max * scale)
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

/// Half-line starting at `origin` heading along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. The direction is normalized; a zero direction yields -Z.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Near-zero direction components get a huge inverse so the slab
    // collapses to an inside/outside test on that axis
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 {
            Some(t_min)
        } else {
            // Ray starts inside the AABB
            Some(t_max)
        }
    } else {
        None
    }
}

/// A single triangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }
}

/// Möller–Trumbore ray-triangle intersection, double-sided.
///
/// Returns the distance along the (normalized) ray direction to the hit,
/// or `None` if the ray misses, runs parallel to the triangle, or the hit
/// lies behind the origin.
pub fn ray_triangle_intersect(ray_origin: Vec3, ray_dir: Vec3, tri: &Triangle) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = tri.b - tri.a;
    let edge2 = tri.c - tri.a;
    let p = ray_dir.cross(edge2);
    let det = edge1.dot(p);

    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = ray_origin - tri.a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Exact scene geometry used for ray-based proximity collision.
///
/// Triangles are stored in world space with their bounds cached, so the
/// resolver can reject distant meshes with one box test.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSurface {
    name: String,
    triangles: Vec<Triangle>,
    bounds: Aabb,
}

impl MeshSurface {
    /// Build a surface from world-space triangles.
    ///
    /// Returns `None` when there are no triangles or any vertex is not finite.
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Option<Self> {
        if triangles.iter().any(|t| !(t.a.is_finite() && t.b.is_finite() && t.c.is_finite())) {
            return None;
        }
        let bounds = Aabb::from_points(triangles.iter().flat_map(|t| [t.a, t.b, t.c]))?;
        Some(Self {
            name: name.into(),
            triangles,
            bounds,
        })
    }

    /// Build a surface from an indexed vertex list (three indices per triangle).
    ///
    /// Returns `None` for out-of-range indices, a ragged index list, or no triangles.
    pub fn from_indexed(name: impl Into<String>, vertices: &[Vec3], indices: &[u32]) -> Option<Self> {
        if indices.len() % 3 != 0 {
            return None;
        }
        let triangles = indices
            .chunks_exact(3)
            .map(|tri| {
                let a = *vertices.get(tri[0] as usize)?;
                let b = *vertices.get(tri[1] as usize)?;
                let c = *vertices.get(tri[2] as usize)?;
                Some(Triangle::new(a, b, c))
            })
            .collect::<Option<Vec<_>>>()?;
        Self::new(name, triangles)
    }

    /// The axis-aligned faces of a box as twelve triangles.
    pub fn from_aabb(name: impl Into<String>, aabb: &Aabb) -> Self {
        let (n, x) = (aabb.min, aabb.max);
        let v = [
            Vec3::new(n.x, n.y, n.z),
            Vec3::new(x.x, n.y, n.z),
            Vec3::new(x.x, x.y, n.z),
            Vec3::new(n.x, x.y, n.z),
            Vec3::new(n.x, n.y, x.z),
            Vec3::new(x.x, n.y, x.z),
            Vec3::new(x.x, x.y, x.z),
            Vec3::new(n.x, x.y, x.z),
        ];
        const FACES: [[usize; 3]; 12] = [
            [0, 1, 2], [0, 2, 3], // -Z
            [4, 6, 5], [4, 7, 6], // +Z
            [0, 4, 5], [0, 5, 1], // -Y
            [3, 2, 6], [3, 6, 7], // +Y
            [0, 3, 7], [0, 7, 4], // -X
            [1, 5, 6], [1, 6, 2], // +X
        ];
        let triangles = FACES
            .iter()
            .map(|f| Triangle::new(v[f[0]], v[f[1]], v[f[2]]))
            .collect();
        Self {
            name: name.into(),
            triangles,
            bounds: *aabb,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Distance to the nearest surface hit along the ray, if within `max_dist`.
    pub fn ray_cast(&self, origin: Vec3, direction: Vec3, max_dist: f32) -> Option<f32> {
        // Cheap reject: the ray must reach the bounds within range
        match ray_aabb_intersect(origin, direction, self.bounds.min, self.bounds.max) {
            Some(t) if t <= max_dist => {}
            _ if self.bounds.contains_point(origin) => {}
            _ => return None,
        }

        self.triangles
            .iter()
            .filter_map(|tri| ray_triangle_intersect(origin, direction, tri))
            .filter(|&t| t <= max_dist)
            .min_by(|a, b| a.total_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_ray_hits_aabb_from_front() {
        let b = unit_box();
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, b.min, b.max);
        let t = t.expect("ray should hit");
        assert!((t - 4.0).abs() < 0.001, "Expected t=4.0, got t={}", t);
    }

    #[test]
    fn test_ray_misses_aabb() {
        let b = unit_box();
        let result = ray_aabb_intersect(Vec3::new(0.0, 5.0, -5.0), Vec3::Z, b.min, b.max);
        assert!(result.is_none());
    }

    #[test]
    fn test_ray_starts_inside_aabb() {
        let b = unit_box();
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::Z, b.min, b.max).unwrap();
        // Should hit the exit face at z=1
        assert!((t - 1.0).abs() < 0.001, "Expected t=1.0, got t={}", t);
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let b = unit_box();
        let result = ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, b.min, b.max);
        assert!(result.is_none());
    }

    #[test]
    fn test_aabb_new_reorders_corners() {
        let b = Aabb::new(Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_overlap_requires_all_axes() {
        let a = unit_box();
        let b = Aabb::new(Vec3::new(0.5, 0.5, 0.5), Vec3::new(2.0, 2.0, 2.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        // Overlaps on X and Y but not Z
        let c = Aabb::new(Vec3::new(0.5, 0.5, 1.5), Vec3::new(2.0, 2.0, 2.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_faces_do_not_overlap() {
        let floor = Aabb::new(Vec3::new(-5.0, -1.0, -5.0), Vec3::new(5.0, 0.0, 5.0));
        let standing = Aabb::new(Vec3::new(-0.3, 0.0, -0.3), Vec3::new(0.3, 1.7, 0.3));
        assert!(!floor.intersects(&standing));
        assert_eq!(floor.overlap_volume(&standing), 0.0);
    }

    #[test]
    fn test_overlap_volume() {
        let a = unit_box();
        let b = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        assert!((a.overlap_volume(&b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_points() {
        let b = Aabb::from_points([Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 2.0, 3.0)]).unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 3.0));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
        );
        let t = ray_triangle_intersect(Vec3::ZERO, Vec3::NEG_Z, &tri).unwrap();
        assert!((t - 2.0).abs() < 1e-5);

        // Pointing away
        assert!(ray_triangle_intersect(Vec3::ZERO, Vec3::Z, &tri).is_none());
        // Parallel
        assert!(ray_triangle_intersect(Vec3::ZERO, Vec3::X, &tri).is_none());
        // Off to the side
        assert!(ray_triangle_intersect(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z, &tri).is_none());
    }

    #[test]
    fn test_ray_triangle_back_face() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
        );
        // Reversed winding is still hit
        assert!(ray_triangle_intersect(Vec3::ZERO, Vec3::NEG_Z, &tri).is_some());
    }

    #[test]
    fn test_mesh_from_indexed_validates() {
        let verts = [Vec3::ZERO, Vec3::X, Vec3::Y];
        assert!(MeshSurface::from_indexed("coll_tri", &verts, &[0, 1, 2]).is_some());
        assert!(MeshSurface::from_indexed("coll_tri", &verts, &[0, 1, 3]).is_none());
        assert!(MeshSurface::from_indexed("coll_tri", &verts, &[0, 1]).is_none());
        assert!(MeshSurface::from_indexed("coll_tri", &verts, &[]).is_none());
    }

    #[test]
    fn test_mesh_ray_cast_nearest_within_range() {
        let mesh = MeshSurface::from_aabb("coll_box", &Aabb::new(Vec3::new(-1.0, 0.0, -3.0), Vec3::new(1.0, 2.0, -2.0)));
        let origin = Vec3::new(0.0, 1.0, 0.0);

        let t = mesh.ray_cast(origin, Vec3::NEG_Z, 10.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);

        assert!(mesh.ray_cast(origin, Vec3::NEG_Z, 1.5).is_none());
        assert!(mesh.ray_cast(origin, Vec3::Z, 10.0).is_none());
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(ray.direction, Vec3::NEG_Z);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, -2.0));
    }
}
