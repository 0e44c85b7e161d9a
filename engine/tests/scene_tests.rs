//! Scene Tests - Manifest Loading and Fallback
//!
//! Loads manifests from disk through the provider and checks the three
//! build outcomes: manifest geometry, default room and fallback room.

use std::fs;

use glam::Vec3;
use in_a_soup_engine::physics::{Collider, CollisionResolver, PlayerFootprint};
use in_a_soup_engine::world::{
    ManifestSceneProvider, SceneBuilder, SceneError, SceneManifest, SceneProvider, SceneSource, WorldBounds,
};
use tempfile::TempDir;

const MANIFEST: &str = r#"{
    "scale": 3.0,
    "spawn": [10.0, 3.5, 10.0],
    "boxes": [
        { "name": "COLL_teacher_desk", "min": [-2.0, 0.0, -1.0], "max": [2.0, 1.0, 1.0] },
        { "name": "window_frame", "min": [5.0, 0.0, 5.0], "max": [6.0, 2.0, 6.0] }
    ],
    "meshes": [
        {
            "name": "coll_back_wall",
            "vertices": [[-10, 0, -10], [10, 0, -10], [10, 6, -10], [-10, 6, -10]],
            "indices": [0, 1, 2, 0, 2, 3]
        },
        {
            "name": "chalkboard",
            "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]],
            "indices": [0, 1, 2]
        }
    ]
}"#;

fn write_manifest(dir: &TempDir, contents: &str) -> ManifestSceneProvider {
    let path = dir.path().join("classroom.json");
    fs::write(&path, contents).unwrap();
    ManifestSceneProvider::new(path)
}

#[test]
fn test_manifest_colliders_and_boundary_walls() {
    let temp_dir = TempDir::new().unwrap();
    let provider = write_manifest(&temp_dir, MANIFEST);

    let assets = SceneBuilder::default().load_or_fallback(&provider);
    assert_eq!(assets.source, SceneSource::Manifest);
    // Two `coll_` entries plus four boundary walls
    assert_eq!(assets.colliders.len(), 6);
    assert_eq!(assets.spawn, Vec3::new(10.0, 3.5, 10.0));

    let desk = assets.colliders.get(0).unwrap().bounds();
    assert_eq!(desk.min, Vec3::new(-6.0, 0.0, -3.0));
    assert_eq!(desk.max, Vec3::new(6.0, 3.0, 3.0));

    match assets.colliders.get(1) {
        Some(Collider::MeshSurface(mesh)) => {
            assert_eq!(mesh.name(), "coll_back_wall");
            assert_eq!(mesh.triangles().len(), 2);
            assert_eq!(mesh.bounds().min.z, -30.0);
        }
        other => panic!("expected the back wall mesh, got {:?}", other),
    }
}

#[test]
fn test_default_room_for_decoration_only_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let provider = write_manifest(&temp_dir, r#"{ "boxes": [{ "name": "plant", "min": [0,0,0], "max": [1,1,1] }] }"#);

    let assets = SceneBuilder::default().load_or_fallback(&provider);
    assert_eq!(assets.source, SceneSource::DefaultRoom);
    assert_eq!(assets.colliders.len(), 10);
}

#[test]
fn test_fallback_for_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let provider = ManifestSceneProvider::new(temp_dir.path().join("missing.json"));
    assert!(matches!(provider.load(), Err(SceneError::Io { .. })));

    let assets = SceneBuilder::default().load_or_fallback(&provider);
    assert_eq!(assets.source, SceneSource::Fallback);
    assert!(!assets.colliders.is_empty());
    assert!(assets.spawn.is_finite());
    assert!(assets.bounds.contains(assets.spawn));
}

#[test]
fn test_fallback_for_malformed_json() {
    let temp_dir = TempDir::new().unwrap();
    let provider = write_manifest(&temp_dir, "{ \"boxes\": [ oops");
    assert!(matches!(provider.load(), Err(SceneError::Parse(_))));
    assert_eq!(SceneBuilder::default().load_or_fallback(&provider).source, SceneSource::Fallback);
}

#[test]
fn test_fallback_spawn_is_free_to_walk() {
    let temp_dir = TempDir::new().unwrap();
    let provider = ManifestSceneProvider::new(temp_dir.path().join("missing.json"));
    let assets = SceneBuilder::default().load_or_fallback(&provider);

    let footprint = PlayerFootprint::new(0.3, 7.0, 3.5);
    let resolver = CollisionResolver::new(assets.colliders, assets.bounds, footprint);
    assert_eq!(resolver.first_blocking(assets.spawn), None);

    // The player can step in every direction from the interior spawn
    for step in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z] {
        let resolved = resolver.resolve(assets.spawn, assets.spawn + step);
        assert!(!resolved.is_blocked(), "blocked stepping {:?}", step);
    }

    // ... but cannot walk out through the room walls (30 units out)
    let mut position = assets.spawn;
    for _ in 0..100 {
        position = resolver.resolve(position, position + Vec3::new(0.5, 0.0, 0.0)).position;
    }
    assert!(position.x < 30.0);
}

#[test]
fn test_manifest_bounds_override() {
    let manifest = SceneManifest {
        bounds: Some(WorldBounds::new(Vec3::new(-20.0, -5.0, -20.0), Vec3::new(20.0, 20.0, 20.0))),
        spawn: Some(Vec3::new(50.0, 3.5, 0.0)),
        ..Default::default()
    };
    let assets = SceneBuilder::default().build(Ok(manifest));
    assert_eq!(assets.bounds.max.x, 20.0);
    // Spawn outside the overridden bounds is replaced
    assert_eq!(assets.spawn, Vec3::new(0.0, 3.5, 0.0));
}

#[test]
fn test_default_spawn_inside_desk_is_relocated() {
    // A desk exported right on top of the default spawn (70, 3.5, 10)
    let temp_dir = TempDir::new().unwrap();
    let provider = write_manifest(
        &temp_dir,
        r#"{ "boxes": [{ "name": "coll_desk", "min": [67, 0, 8], "max": [73, 4, 12] }] }"#,
    );
    let assets = SceneBuilder::default().load_or_fallback(&provider);
    assert_eq!(assets.source, SceneSource::Manifest);
    assert_ne!(assets.spawn, Vec3::new(70.0, 3.5, 10.0));
    assert_eq!(assets.spawn.y, 3.5);

    let footprint = PlayerFootprint::new(0.3, 7.0, 3.5);
    let resolver = CollisionResolver::new(assets.colliders, assets.bounds, footprint);
    assert_eq!(resolver.first_blocking(assets.spawn), None);

    // Not stuck: some step away from the desk is accepted
    let free = [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z]
        .into_iter()
        .any(|step| !resolver.resolve(assets.spawn, assets.spawn + step * 0.5).is_blocked());
    assert!(free);
}
