//! Additional math helpers layered on top of `glam`.
//!
//! Vectors and quaternions are plain `glam` values; add, subtract, scale,
//! dot, cross, length and the Hamilton product come straight from its
//! operators. The helpers here pin down the edge-case behaviour the step
//! relies on.

use glam::{Quat, Vec3};

/// Normalizes `v`, returning it unchanged when its length is exactly zero.
pub fn normalize_or_unchanged(v: Vec3) -> Vec3 {
    let len = v.length();
    if len == 0.0 {
        return v;
    }
    v * (1.0 / len)
}

/// Embeds a vector as a pure quaternion (w = 0).
pub fn pure_quat(v: Vec3) -> Quat {
    Quat::from_xyzw(v.x, v.y, v.z, 0.0)
}

/// Divides every component by the magnitude.
///
/// A zero quaternion yields NaN components; callers must never build one.
pub fn quat_normalize(q: Quat) -> Quat {
    let m = q.length();
    Quat::from_xyzw(q.x / m, q.y / m, q.z / m, q.w / m)
}

/// First-order world-frame orientation update:
/// `normalize(q + dt * 0.5 * (omega * q))`.
pub fn integrate_orientation(rotation: Quat, angular: Vec3, dt: f32) -> Quat {
    let spin = (pure_quat(angular) * rotation) * 0.5;
    quat_normalize(rotation + spin * dt)
}
