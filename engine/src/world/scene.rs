//! Scene loading
//!
//! Turns an exported scene manifest into the static collider set, spawn
//! point and world bounds the movement core runs against.
//!
//! Loading has exactly two outcomes. A manifest that loads becomes the
//! collider set (or a synthetic default room when it carries no collision
//! geometry); a manifest that fails to load is replaced by a hollow
//! fallback room with a safe interior spawn. Either way four boundary walls
//! are appended, so the collider set handed to the resolver is never empty
//! and scene loading never fails outward.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bounds::WorldBounds;
use crate::physics::{Aabb, Collider, ColliderSet, MeshSurface, PlayerFootprint};

/// Marker that flags an exported object as collision geometry.
pub const COLLISION_PREFIX: &str = "coll_";

/// Rings searched around a blocked spawn, and the spacing between them.
const SPAWN_SEARCH_RINGS: usize = 24;
const SPAWN_SEARCH_STEP: f32 = 2.0;

/// Scene loading errors. Only ever logged; the builder recovers from all of them.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid geometry in '{name}': {reason}")]
    InvalidGeometry { name: String, reason: String },
}

fn default_scale() -> f32 {
    1.0
}

/// Named axis-aligned box in model space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestBox {
    pub name: String,
    pub min: Vec3,
    pub max: Vec3,
}

/// Named indexed triangle mesh in model space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestMesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
    /// Collide against the mesh's bounding box instead of its triangles
    #[serde(default)]
    pub use_bounds: bool,
}

/// Exported scene description.
///
/// ```json
/// {
///   "scale": 3.0,
///   "spawn": [70.0, 3.5, 10.0],
///   "boxes": [{ "name": "coll_desk", "min": [0, 0, 0], "max": [2, 1, 1] }],
///   "meshes": [{ "name": "Coll_Wall", "vertices": [...], "indices": [...] }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneManifest {
    /// Uniform model scale applied to every box and mesh
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// World-space spawn (eye position); not scaled
    pub spawn: Option<Vec3>,
    /// World-space bounds override; not scaled
    pub bounds: Option<WorldBounds>,
    pub boxes: Vec<ManifestBox>,
    pub meshes: Vec<ManifestMesh>,
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            spawn: None,
            bounds: None,
            boxes: Vec::new(),
            meshes: Vec::new(),
        }
    }
}

/// Whether an exported object name marks collision geometry (case-insensitive).
pub fn is_collision_name(name: &str) -> bool {
    name.to_lowercase().contains(COLLISION_PREFIX)
}

impl SceneManifest {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// World-space colliders for every `coll_` entry, scaled.
    ///
    /// Boxes become box colliders; meshes become ray-probed surfaces unless
    /// flagged `use_bounds`. Entries without the marker are decoration.
    pub fn colliders(&self) -> Result<Vec<Collider>, SceneError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SceneError::InvalidGeometry {
                name: "scale".to_string(),
                reason: format!("scale must be positive, got {}", self.scale),
            });
        }

        let mut colliders = Vec::new();

        for entry in self.boxes.iter().filter(|b| is_collision_name(&b.name)) {
            let aabb = Aabb::new(entry.min, entry.max).scaled(self.scale);
            if !aabb.is_finite() {
                return Err(SceneError::InvalidGeometry {
                    name: entry.name.clone(),
                    reason: "non-finite corner".to_string(),
                });
            }
            log::info!("Found collision box: {}", entry.name);
            colliders.push(Collider::BoundingBox(aabb));
        }

        for entry in self.meshes.iter().filter(|m| is_collision_name(&m.name)) {
            let vertices: Vec<Vec3> = entry.vertices.iter().map(|v| *v * self.scale).collect();
            let mesh = MeshSurface::from_indexed(entry.name.clone(), &vertices, &entry.indices)
                .ok_or_else(|| SceneError::InvalidGeometry {
                    name: entry.name.clone(),
                    reason: format!(
                        "{} vertices, {} indices: empty, ragged or out of range",
                        vertices.len(),
                        entry.indices.len()
                    ),
                })?;
            log::info!("Found collision mesh: {} ({} triangles)", entry.name, mesh.triangles().len());
            if entry.use_bounds {
                colliders.push(Collider::BoundingBox(*mesh.bounds()));
            } else {
                colliders.push(Collider::MeshSurface(mesh));
            }
        }

        Ok(colliders)
    }
}

/// Supplies the scene manifest once at startup.
pub trait SceneProvider {
    fn load(&self) -> Result<SceneManifest, SceneError>;
}

/// Reads a JSON manifest from disk.
#[derive(Debug, Clone)]
pub struct ManifestSceneProvider {
    path: PathBuf,
}

impl ManifestSceneProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SceneProvider for ManifestSceneProvider {
    fn load(&self) -> Result<SceneManifest, SceneError> {
        let json = fs::read_to_string(&self.path).map_err(|source| SceneError::Io {
            path: self.path.clone(),
            source,
        })?;
        SceneManifest::from_json(&json)
    }
}

/// Where the collider set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneSource {
    /// Collision geometry from the manifest
    Manifest,
    /// Manifest loaded but had no collision geometry
    DefaultRoom,
    /// Manifest failed to load
    Fallback,
}

/// Everything the movement core needs from a loaded scene.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub colliders: ColliderSet,
    /// Eye position to start from
    pub spawn: Vec3,
    pub bounds: WorldBounds,
    pub source: SceneSource,
}

/// Dimensions used by scene building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub bounds: WorldBounds,
    /// Spawn used when the manifest names none
    pub spawn: Vec3,
    pub eye_height: f32,
    /// Player half-width, for checking the spawn is clear
    pub player_radius: f32,
    /// Player box height from the feet
    pub body_height: f32,
    /// Model scale the synthetic rooms are sized by
    pub scale: f32,
    /// Synthetic room half-extent on X and Z, before scaling
    pub room_half_extent: f32,
    /// Synthetic room height, before scaling
    pub room_height: f32,
    /// Synthetic room slab thickness, before scaling
    pub room_wall_thickness: f32,
    /// Boundary walls straddle the world bounds by this much either side
    pub boundary_thickness: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            bounds: WorldBounds::default(),
            spawn: Vec3::new(70.0, 3.5, 10.0),
            eye_height: 3.5,
            player_radius: 0.3,
            body_height: 7.0,
            scale: 3.0,
            room_half_extent: 10.0,
            room_height: 6.0,
            room_wall_thickness: 0.3,
            boundary_thickness: 2.0,
        }
    }
}

impl SceneSettings {
    pub fn footprint(&self) -> PlayerFootprint {
        PlayerFootprint::new(self.player_radius, self.body_height, self.eye_height)
    }
}

/// Builds [`SceneAssets`] from a provider outcome.
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    settings: SceneSettings,
}

impl SceneBuilder {
    pub fn new(settings: SceneSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Load through `provider`, falling back on any failure.
    pub fn load_or_fallback(&self, provider: &dyn SceneProvider) -> SceneAssets {
        self.build(provider.load())
    }

    /// Build scene assets from a load outcome. Never fails.
    pub fn build(&self, loaded: Result<SceneManifest, SceneError>) -> SceneAssets {
        let manifest = loaded.and_then(|m| m.colliders().map(|colliders| (m, colliders)));

        let (mut colliders, spawn, bounds, source) = match manifest {
            Ok((manifest, colliders)) if colliders.is_empty() => {
                log::info!("No collision meshes found, creating default room boundaries");
                let bounds = self.bounds_from(&manifest);
                let spawn = manifest.spawn.unwrap_or(self.settings.spawn);
                (self.room_slabs(), spawn, bounds, SceneSource::DefaultRoom)
            }
            Ok((manifest, colliders)) => {
                log::info!("Using {} collision meshes from scene manifest", colliders.len());
                let bounds = self.bounds_from(&manifest);
                let spawn = manifest.spawn.unwrap_or(self.settings.spawn);
                (colliders, spawn, bounds, SceneSource::Manifest)
            }
            Err(err) => {
                log::warn!("Scene failed to load ({}), using fallback room", err);
                let bounds = self.settings.bounds;
                (self.room_slabs(), self.interior_spawn(&bounds), bounds, SceneSource::Fallback)
            }
        };

        colliders.extend(self.boundary_walls(&bounds));
        log::info!("Added world boundary collision boxes");

        let colliders = ColliderSet::new(colliders);
        SceneAssets {
            spawn: self.validate_spawn(spawn, &bounds, &colliders),
            colliders,
            bounds,
            source,
        }
    }

    fn bounds_from(&self, manifest: &SceneManifest) -> WorldBounds {
        match manifest.bounds {
            Some(bounds) if bounds.is_valid() => bounds,
            Some(bounds) => {
                log::warn!("Ignoring invalid manifest bounds {:?}", bounds);
                self.settings.bounds
            }
            None => self.settings.bounds,
        }
    }

    /// Make sure the player starts somewhere it can move from.
    ///
    /// A non-finite or out-of-bounds spawn is replaced by the room interior.
    /// A spawn whose player box overlaps a collider moves to the nearest
    /// clear point on rings around it.
    fn validate_spawn(&self, spawn: Vec3, bounds: &WorldBounds, colliders: &ColliderSet) -> Vec3 {
        let footprint = self.settings.footprint();
        let is_clear = |p: Vec3| colliders.first_blocking(&footprint.box_at(p)).is_none();

        let origin = if spawn.is_finite() && bounds.contains(spawn) {
            spawn
        } else {
            self.interior_spawn(bounds)
        };

        let safe = Self::ring_points(origin, bounds, footprint.radius)
            .find(|&p| is_clear(p))
            .unwrap_or_else(|| {
                log::warn!("No clear spawn found near {:?}", origin);
                origin
            });
        if safe != spawn {
            log::warn!("Spawn {:?} is unusable, starting at {:?}", spawn, safe);
        }
        safe
    }

    /// `origin`, then eight points on each ring around it, clamped into bounds.
    fn ring_points(origin: Vec3, bounds: &WorldBounds, inset: f32) -> impl Iterator<Item = Vec3> + '_ {
        let rings = (1..=SPAWN_SEARCH_RINGS).flat_map(move |ring| {
            let distance = ring as f32 * SPAWN_SEARCH_STEP;
            (0..8).map(move |i| {
                let angle = i as f32 * std::f32::consts::FRAC_PI_4;
                let offset = Vec3::new(angle.cos(), 0.0, angle.sin()) * distance;
                bounds.clamp(origin + offset, inset)
            })
        });
        std::iter::once(origin).chain(rings)
    }

    /// Middle of the synthetic room at eye height, kept inside `bounds`.
    fn interior_spawn(&self, bounds: &WorldBounds) -> Vec3 {
        bounds.clamp(Vec3::new(0.0, self.settings.eye_height, 0.0), 0.0)
    }

    /// Hollow room of six slabs centred on the origin.
    ///
    /// The floor slab sits entirely below y = 0 and the ceiling entirely
    /// above the room height, so a player standing on the floor touches it
    /// without overlapping.
    pub fn room_slabs(&self) -> Vec<Collider> {
        let s = &self.settings;
        let half = s.room_half_extent * s.scale;
        let height = s.room_height * s.scale;
        let t = s.room_wall_thickness * s.scale;

        let slabs = [
            // Floor
            Aabb::new(Vec3::new(-half, -t, -half), Vec3::new(half, 0.0, half)),
            // Ceiling
            Aabb::new(Vec3::new(-half, height, -half), Vec3::new(half, height + t, half)),
            // -Z and +Z walls
            Aabb::new(Vec3::new(-half, 0.0, -half - t), Vec3::new(half, height, -half + t)),
            Aabb::new(Vec3::new(-half, 0.0, half - t), Vec3::new(half, height, half + t)),
            // -X and +X walls
            Aabb::new(Vec3::new(-half - t, 0.0, -half), Vec3::new(-half + t, height, half)),
            Aabb::new(Vec3::new(half - t, 0.0, -half), Vec3::new(half + t, height, half)),
        ];
        slabs.into_iter().map(Collider::BoundingBox).collect()
    }

    /// Four walls straddling the X and Z faces of the world bounds.
    pub fn boundary_walls(&self, bounds: &WorldBounds) -> Vec<Collider> {
        let t = self.settings.boundary_thickness;
        let (min, max) = (bounds.min, bounds.max);

        let walls = [
            // North (+Z)
            Aabb::new(Vec3::new(min.x, min.y, max.z - t), Vec3::new(max.x, max.y, max.z + t)),
            // South (-Z)
            Aabb::new(Vec3::new(min.x, min.y, min.z - t), Vec3::new(max.x, max.y, min.z + t)),
            // East (+X)
            Aabb::new(Vec3::new(max.x - t, min.y, min.z), Vec3::new(max.x + t, max.y, max.z)),
            // West (-X)
            Aabb::new(Vec3::new(min.x - t, min.y, min.z), Vec3::new(min.x + t, max.y, max.z)),
        ];
        walls.into_iter().map(Collider::BoundingBox).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl SceneProvider for Failing {
        fn load(&self) -> Result<SceneManifest, SceneError> {
            Err(SceneError::InvalidGeometry {
                name: "classroom".to_string(),
                reason: "unreachable asset".to_string(),
            })
        }
    }

    #[test]
    fn test_collision_name_is_case_insensitive() {
        assert!(is_collision_name("coll_wall"));
        assert!(is_collision_name("Desk_COLL_top"));
        assert!(!is_collision_name("collar"));
        assert!(!is_collision_name("chair"));
    }

    #[test]
    fn test_manifest_filters_and_scales() {
        let json = r#"{
            "scale": 2.0,
            "boxes": [
                { "name": "coll_desk", "min": [0, 0, 0], "max": [1, 1, 1] },
                { "name": "poster", "min": [0, 0, 0], "max": [1, 1, 1] }
            ],
            "meshes": [
                { "name": "Coll_Ramp", "vertices": [[0,0,0],[1,0,0],[0,1,0]], "indices": [0,1,2] },
                { "name": "Coll_Bin", "vertices": [[0,0,0],[1,0,0],[0,1,1]], "indices": [0,1,2], "use_bounds": true }
            ]
        }"#;
        let manifest = SceneManifest::from_json(json).unwrap();
        let colliders = manifest.colliders().unwrap();
        assert_eq!(colliders.len(), 3);
        assert_eq!(colliders[0].bounds().max, Vec3::splat(2.0));
        assert!(matches!(colliders[1], Collider::MeshSurface(_)));
        assert!(matches!(colliders[2], Collider::BoundingBox(_)));
    }

    #[test]
    fn test_manifest_rejects_bad_indices() {
        let manifest = SceneManifest {
            meshes: vec![ManifestMesh {
                name: "coll_broken".to_string(),
                vertices: vec![Vec3::ZERO],
                indices: vec![0, 1, 2],
                use_bounds: false,
            }],
            ..Default::default()
        };
        assert!(matches!(manifest.colliders(), Err(SceneError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_default_room_when_no_collision_geometry() {
        let builder = SceneBuilder::default();
        let assets = builder.build(Ok(SceneManifest::default()));
        assert_eq!(assets.source, SceneSource::DefaultRoom);
        // Six room slabs plus four boundary walls
        assert_eq!(assets.colliders.len(), 10);
        assert_eq!(assets.spawn, Vec3::new(70.0, 3.5, 10.0));
    }

    #[test]
    fn test_fallback_on_failure() {
        let builder = SceneBuilder::default();
        let assets = builder.load_or_fallback(&Failing);
        assert_eq!(assets.source, SceneSource::Fallback);
        assert!(!assets.colliders.is_empty());
        assert!(assets.spawn.is_finite());
        assert!(assets.bounds.contains(assets.spawn));
    }

    #[test]
    fn test_room_slabs_dimensions() {
        let builder = SceneBuilder::default();
        let slabs = builder.room_slabs();
        assert_eq!(slabs.len(), 6);
        let floor = slabs[0].bounds();
        assert_eq!(floor.max.y, 0.0);
        assert!((floor.min.y + 0.9).abs() < 1e-5);
        assert!((floor.max.x - 30.0).abs() < 1e-5);
        let ceiling = slabs[1].bounds();
        assert!((ceiling.min.y - 18.0).abs() < 1e-5);
    }

    #[test]
    fn test_boundary_walls_straddle_bounds() {
        let builder = SceneBuilder::default();
        let walls = builder.boundary_walls(&WorldBounds::default());
        assert_eq!(walls.len(), 4);
        let north = walls[0].bounds();
        assert_eq!(north.min.z, 98.0);
        assert_eq!(north.max.z, 102.0);
        let west = walls[3].bounds();
        assert_eq!(west.min.x, -102.0);
        assert_eq!(west.max.x, -98.0);
    }

    #[test]
    fn test_out_of_bounds_spawn_replaced() {
        let builder = SceneBuilder::default();
        let manifest = SceneManifest {
            spawn: Some(Vec3::new(500.0, 3.5, 0.0)),
            ..Default::default()
        };
        let assets = builder.build(Ok(manifest));
        assert_eq!(assets.spawn, Vec3::new(0.0, 3.5, 0.0));
    }

    #[test]
    fn test_spawn_inside_collider_moves_clear() {
        let builder = SceneBuilder::default();
        let manifest = SceneManifest {
            spawn: Some(Vec3::new(10.0, 3.5, 10.0)),
            boxes: vec![ManifestBox {
                name: "coll_pillar".to_string(),
                min: Vec3::new(8.0, 0.0, 8.0),
                max: Vec3::new(12.0, 5.0, 12.0),
            }],
            ..Default::default()
        };
        let assets = builder.build(Ok(manifest));

        let footprint = builder.settings().footprint();
        assert_eq!(assets.colliders.first_blocking(&footprint.box_at(assets.spawn)), None);
        // Second ring, straight out along +X
        assert!((assets.spawn - Vec3::new(14.0, 3.5, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_clear_spawn_kept() {
        let builder = SceneBuilder::default();
        let manifest = SceneManifest {
            spawn: Some(Vec3::new(-20.0, 3.5, 5.0)),
            boxes: vec![ManifestBox {
                name: "coll_pillar".to_string(),
                min: Vec3::new(8.0, 0.0, 8.0),
                max: Vec3::new(12.0, 5.0, 12.0),
            }],
            ..Default::default()
        };
        assert_eq!(builder.build(Ok(manifest)).spawn, Vec3::new(-20.0, 3.5, 5.0));
    }

    #[test]
    fn test_provider_reports_missing_file() {
        let provider = ManifestSceneProvider::new("/definitely/not/here/scene.json");
        assert!(matches!(provider.load(), Err(SceneError::Io { .. })));
    }
}
