//! Tangent-plane vector utilities.

use glam::{DQuat, DVec3};

/// Remove the component of `v` along `normal`.
///
/// `normal` does not need to be unit length. A zero normal leaves `v`
/// unchanged.
pub fn project_on_plane(v: DVec3, normal: DVec3) -> DVec3 {
    let len_sq = normal.length_squared();
    if len_sq < f64::MIN_POSITIVE {
        return v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

/// Rotate `v` by `degrees` about `axis` (right-handed).
///
/// A zero axis leaves `v` unchanged.
pub fn rotate_about_axis(v: DVec3, axis: DVec3, degrees: f64) -> DVec3 {
    let axis = axis.normalize_or_zero();
    if axis == DVec3::ZERO {
        return v;
    }
    DQuat::from_axis_angle(axis, degrees.to_radians()) * v
}
