//! Movement Tests - Integrator, Resolver and Bounds Together
//!
//! End-to-end checks of one frame step: intent -> candidate -> resolved position.

use glam::Vec3;
use in_a_soup_engine::input::{InputState, KeyCode, MovementIntent};
use in_a_soup_engine::physics::{Aabb, Collider, ColliderSet, CollisionResolver, PlayerFootprint};
use in_a_soup_engine::player::MovementIntegrator;
use in_a_soup_engine::world::{SceneBuilder, SceneManifest, WorldBounds};

const EYE: f32 = 3.5;

fn footprint() -> PlayerFootprint {
    PlayerFootprint::new(0.3, 7.0, EYE)
}

fn slow_integrator() -> MovementIntegrator {
    MovementIntegrator::new(3.0, 0.05, 0.25)
}

fn blocker() -> Collider {
    Collider::BoundingBox(Aabb::new(Vec3::new(-1.0, -10.0, -4.0), Vec3::new(1.0, 50.0, -2.0)))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_open_field_move() {
    let resolver = CollisionResolver::new(ColliderSet::default(), WorldBounds::default(), footprint());
    let integrator = slow_integrator();
    let start = Vec3::new(0.0, EYE, 0.0);

    // yaw 0, forward, speed 3, dt 1
    let candidate = start + integrator.displacement(&MovementIntent::new(1.0, 0.0), 0.0, 1.0);
    assert!(candidate.x.abs() < 1e-6);
    assert!((candidate.z + 3.0).abs() < 1e-6);

    let resolved = resolver.resolve(start, candidate);
    assert!(!resolved.is_blocked());
    assert!(resolved.position.x.abs() < 1e-6);
    assert!((resolved.position.z + 3.0).abs() < 1e-6);
}

#[test]
fn test_blocked_move() {
    let resolver = CollisionResolver::new(ColliderSet::new(vec![blocker()]), WorldBounds::default(), footprint());
    let integrator = slow_integrator();
    let start = Vec3::new(0.0, EYE, 0.0);

    let candidate = start + integrator.displacement(&MovementIntent::new(1.0, 0.0), 0.0, 1.0);
    let resolved = resolver.resolve(start, candidate);
    assert_eq!(resolved.position, start);
    assert_eq!(resolved.blocked_by, Some(0));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_zero_intent_never_moves() {
    let integrator = MovementIntegrator::default();
    let resolver = CollisionResolver::new(ColliderSet::new(vec![blocker()]), WorldBounds::default(), footprint());
    let start = Vec3::new(12.0, EYE, 7.0);
    for dt in [0.0, 0.016, 0.05, 1.0, 10.0, -3.0, f32::NAN] {
        let candidate = integrator.step(start, &MovementIntent::default(), 1.1, dt);
        assert_eq!(resolver.resolve(start, candidate).position, start, "dt = {}", dt);
    }
}

#[test]
fn test_stall_is_clamped() {
    let integrator = MovementIntegrator::default();
    let intent = MovementIntent::new(1.0, -1.0);
    for yaw in [0.0, 0.4, 2.0, -2.9] {
        let stalled = integrator.step(Vec3::ZERO, &intent, yaw, 10.0);
        let capped = integrator.displacement(&intent, yaw, 0.05);
        assert!(stalled.length() <= capped.length() + 1e-5);
    }
}

#[test]
fn test_rejection_keeps_both_axes() {
    let resolver = CollisionResolver::new(ColliderSet::new(vec![blocker()]), WorldBounds::default(), footprint());
    let start = Vec3::new(1.5, EYE, -1.5);
    // Diagonal into the corner region: only x would be clear on its own
    let candidate = Vec3::new(0.9, EYE, -2.1);
    let resolved = resolver.resolve(start, candidate);
    assert_eq!(resolved.position.x, start.x);
    assert_eq!(resolved.position.z, start.z);
}

#[test]
fn test_random_walk_stays_contained_and_clear() {
    let builder = SceneBuilder::default();
    let assets = builder.build(Ok(SceneManifest::default()));
    let bounds = assets.bounds;
    let resolver = CollisionResolver::new(assets.colliders, bounds, footprint());
    let integrator = MovementIntegrator::default();

    let mut position = assets.spawn;
    let mut yaw = 0.0_f32;
    for _ in 0..3000 {
        yaw += (rand::random::<f32>() - 0.5) * 0.6;
        let intent = MovementIntent::new(
            (rand::random::<u8>() % 3) as f32 - 1.0,
            (rand::random::<u8>() % 3) as f32 - 1.0,
        );
        let dt = rand::random::<f32>() * 0.2;
        let candidate = integrator.step(position, &intent, yaw, dt);
        position = resolver.resolve(position, candidate).position;

        assert!(bounds.contains(position), "escaped to {:?}", position);
        let player = footprint().box_at(position);
        for collider in resolver.colliders() {
            if let Collider::BoundingBox(aabb) = collider {
                assert_eq!(aabb.overlap_volume(&player), 0.0, "inside {:?} at {:?}", aabb, position);
            }
        }
    }
}

#[test]
fn test_held_keys_drive_movement() {
    let mut input = InputState::new();
    let integrator = MovementIntegrator::default();
    input.on_key_down(KeyCode::W);
    input.on_key_down(KeyCode::D);

    let snapshot = input.sample();
    assert_eq!(snapshot.intent, MovementIntent::new(1.0, 1.0));
    let moved = integrator.step(Vec3::ZERO, &snapshot.intent, 0.0, 0.02);
    assert!((moved.x - 0.3).abs() < 1e-5);
    assert!((moved.z + 0.3).abs() < 1e-5);

    input.on_key_down(KeyCode::S);
    assert_eq!(input.sample().intent.forward_axis, 0.0);
}

#[test]
fn test_wheel_nudge_is_resolved() {
    let resolver = CollisionResolver::new(ColliderSet::new(vec![blocker()]), WorldBounds::default(), footprint());
    let integrator = MovementIntegrator::default();
    // Facing -Z (yaw 0) with the blocker ahead: a scroll-down nudge walks into it
    let start = Vec3::new(0.0, EYE, -1.6);
    let candidate = integrator.nudge(start, 0.0, 1.0);
    assert!(candidate.z < start.z);
    assert_eq!(resolver.resolve(start, candidate).position, start);

    // Scrolling up backs away from it
    let candidate = integrator.nudge(start, 0.0, -1.0);
    assert!(!resolver.resolve(start, candidate).is_blocked());
}

#[test]
fn test_scroll_down_walks_forward() {
    let mut input = InputState::new();
    let integrator = MovementIntegrator::default();
    input.on_wheel(1.0);

    let snapshot = input.sample();
    let moved = integrator.nudge(Vec3::ZERO, 0.0, snapshot.wheel);
    assert!(moved.x.abs() < 1e-6);
    assert!((moved.z + 0.25).abs() < 1e-6);
}
