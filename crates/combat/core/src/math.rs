//! Planar helpers on the XZ ground plane.
//!
//! Convention: yaw 0 faces -Z, and positive yaw turns counter-clockwise when
//! seen from above. Planar vectors store `(x, z)` in a [`Vec2`].

use glam::{Vec2, Vec3};

/// Below this length a planar vector counts as "no direction".
pub const DIRECTION_EPSILON: f32 = 1e-3;

/// Unit forward direction for a yaw angle.
pub fn forward_from_yaw(yaw: f32) -> Vec2 {
    Vec2::new(-yaw.sin(), -yaw.cos())
}

/// Yaw angle that faces along `direction`.
pub fn yaw_from_direction(direction: Vec2) -> f32 {
    (-direction.x).atan2(-direction.y)
}

/// Rotates a stick-style intent (x = right, y = forward) into world space
/// relative to a camera yaw.
pub fn camera_relative(intent: Vec2, camera_yaw: f32) -> Vec2 {
    let (sin, cos) = camera_yaw.sin_cos();
    let right = Vec2::new(cos, -sin);
    let forward = Vec2::new(-sin, -cos);
    right * intent.x + forward * intent.y
}

/// Clamps each axis to `[-1, 1]` and the magnitude to 1.
pub fn clamp_intent(intent: Vec2) -> Vec2 {
    if !intent.is_finite() {
        return Vec2::ZERO;
    }
    intent
        .clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
        .clamp_length_max(1.0)
}

/// Moves `current` toward `target` by at most `max_delta`.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Unsigned angle between two planar directions, in radians.
/// Returns 0 if either vector has no direction.
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    if a.length() < DIRECTION_EPSILON || b.length() < DIRECTION_EPSILON {
        return 0.0;
    }
    a.normalize().dot(b.normalize()).clamp(-1.0, 1.0).acos()
}

pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

pub fn with_horizontal(v: Vec3, planar: Vec2) -> Vec3 {
    Vec3::new(planar.x, v.y, planar.y)
}
