//! Raycast Module
//!
//! Screen-to-world rays for click-to-interact picking.

use glam::Vec3;

use crate::physics::Ray;

/// Convert a window pixel position to normalized device coordinates.
///
/// Returns (x, y) in [-1, 1] with +y up. A zero-sized window maps to the centre.
pub fn ndc_from_pixel(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    ((x / width) * 2.0 - 1.0, 1.0 - (y / height) * 2.0)
}

/// Build a world-space ray through a pointer position.
///
/// # Arguments
/// * `eye` - Camera position in world space
/// * `forward`, `right`, `up` - Orthonormal camera basis
/// * `ndc` - Pointer position in normalized device coordinates (+y up)
/// * `aspect_ratio` - Screen aspect ratio (width / height)
/// * `fov` - Vertical field of view in radians
pub fn pick_ray(
    eye: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    ndc: (f32, f32),
    aspect_ratio: f32,
    fov: f32,
) -> Ray {
    let half_fov = (fov * 0.5).tan();
    let direction = forward + right * (ndc.0 * aspect_ratio * half_fov) + up * (ndc.1 * half_fov);
    Ray::new(eye, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_corners() {
        assert_eq!(ndc_from_pixel(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
        assert_eq!(ndc_from_pixel(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(ndc_from_pixel(400.0, 300.0, 800.0, 600.0), (0.0, 0.0));
        assert_eq!(ndc_from_pixel(10.0, 10.0, 0.0, 600.0), (0.0, 0.0));
    }

    #[test]
    fn test_pick_ray_edges() {
        let fov = std::f32::consts::FRAC_PI_2; // tan(45°) = 1
        let ray = pick_ray(Vec3::ZERO, Vec3::NEG_Z, Vec3::X, Vec3::Y, (1.0, 0.0), 1.0, fov);
        // Right edge of a 90° square frustum is 45° off axis
        let expected = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert!((ray.direction - expected).length() < 1e-5);

        let ray = pick_ray(Vec3::ZERO, Vec3::NEG_Z, Vec3::X, Vec3::Y, (0.0, 1.0), 1.0, fov);
        assert!(ray.direction.y > 0.0);
    }
}
