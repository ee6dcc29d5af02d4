//! Spherical linear interpolation of 3D vectors.

use glam::DVec3;

/// Angle below which slerp degrades to plain lerp to avoid dividing by a
/// vanishing sine.
const MIN_ANGLE: f64 = 1e-9;

/// Spherical linear interpolation between two vectors.
///
/// The direction travels along the great arc between `a` and `b` while the
/// magnitude is interpolated linearly, so bisecting a cube face with this
/// produces points on the circumscribed sphere rather than on the flat face.
///
/// `t` is clamped to `[0, 1]`. For near-parallel (or near-degenerate) inputs
/// this falls back to linear interpolation.
#[must_use]
pub fn slerp(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    let t = t.clamp(0.0, 1.0);

    let len_a = a.length();
    let len_b = b.length();
    if len_a < MIN_ANGLE || len_b < MIN_ANGLE {
        return a.lerp(b, t);
    }

    let dir_a = a / len_a;
    let dir_b = b / len_b;

    let angle = dir_a.dot(dir_b).clamp(-1.0, 1.0).acos();
    let length = len_a + (len_b - len_a) * t;

    if angle < MIN_ANGLE || (std::f64::consts::PI - angle) < MIN_ANGLE {
        // Parallel or antiparallel: the great arc is degenerate.
        return a.lerp(b, t).normalize_or_zero() * length;
    }

    let sin_angle = angle.sin();
    let dir = (dir_a * ((1.0 - t) * angle).sin() + dir_b * (t * angle).sin()) / sin_angle;

    dir * length
}
