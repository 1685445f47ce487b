//! Rotation that turns one direction onto another, as Euler angles

use std::f64::consts::PI;

use glam::{DMat3, DVec3};

use crate::config::ResolveConfig;

/// Rotation aligning one normal with another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalAlignment {
    /// Unit rotation axis
    pub axis: DVec3,
    /// Rotation angle in radians, in `[0, π]`
    pub angle: f64,
    /// Same rotation as X-Y-Z Euler angles in degrees
    pub euler_degrees: DVec3,
}

/// Compute the rotation taking direction `from` onto `to`
///
/// Parallel and anti-parallel inputs have no defined cross-product axis. The
/// axis is then taken from [`ResolveConfig::flip_axis`] (see
/// [`orthogonal_axis`]) and the angle is 0 or 180 degrees depending on the
/// sign of the dot product. For anti-parallel normals every orthogonal axis is
/// an equally valid answer, so callers that care must pick the hint.
pub fn align_normals(from: DVec3, to: DVec3, config: &ResolveConfig) -> NormalAlignment {
    let from = from.normalize_or_zero();
    let to = to.normalize_or_zero();
    let cross = from.cross(to);
    let cos = from.dot(to).clamp(-1.0, 1.0);

    let (axis, angle) = if cross.length() <= config.parallel_epsilon {
        let angle = if cos < 0.0 { PI } else { 0.0 };
        (orthogonal_axis(from, config.flip_axis), angle)
    } else {
        (cross.normalize(), cos.acos())
    };

    let rotation = DMat3::from_axis_angle(axis, angle);
    let euler = euler_angles(&rotation, config.gimbal_epsilon);

    NormalAlignment {
        axis,
        angle,
        euler_degrees: DVec3::new(
            euler.x.to_degrees(),
            euler.y.to_degrees(),
            euler.z.to_degrees(),
        ),
    }
}

/// Unit vector orthogonal to `v`, as close as possible to `hint`
///
/// Falls back to [`plane_orthogonal`] when `hint` is (nearly) parallel to `v`.
pub fn orthogonal_axis(v: DVec3, hint: DVec3) -> DVec3 {
    let v = v.normalize_or_zero();
    if v == DVec3::ZERO {
        return hint.try_normalize().unwrap_or(DVec3::X);
    }

    let projected = hint - v * hint.dot(v);
    match projected.try_normalize() {
        Some(axis) if projected.length() > 1e-6 => axis,
        _ => plane_orthogonal(v),
    }
}

/// Solve `u · v = 0` with two components of `u` fixed to 1
///
/// The derived component is the one where `v` is largest, so the division
/// never hits zero for a non-zero `v`.
pub fn plane_orthogonal(v: DVec3) -> DVec3 {
    let a = v.abs();
    let u = if a.z >= a.x && a.z >= a.y {
        DVec3::new(1.0, 1.0, -(v.x + v.y) / v.z)
    } else if a.y >= a.x {
        DVec3::new(1.0, -(v.x + v.z) / v.y, 1.0)
    } else {
        DVec3::new(-(v.y + v.z) / v.x, 1.0, 1.0)
    };
    u.normalize()
}

/// Decompose a rotation matrix into X-Y-Z Euler angles (radians)
///
/// The result satisfies `m = Rz(z) · Ry(y) · Rx(x)`. When `cos(y)` falls
/// below `gimbal_epsilon` X and Z rotate about the same axis, so Z is pinned
/// to 0 and the whole remaining rotation goes into X.
pub fn euler_angles(m: &DMat3, gimbal_epsilon: f64) -> DVec3 {
    // glam matrices are column-major: m.x_axis is the first column
    let m00 = m.x_axis.x;
    let m10 = m.x_axis.y;
    let m20 = m.x_axis.z;
    let m11 = m.y_axis.y;
    let m21 = m.y_axis.z;
    let m12 = m.z_axis.y;
    let m22 = m.z_axis.z;

    let sy = (m00 * m00 + m10 * m10).sqrt();
    if sy < gimbal_epsilon {
        DVec3::new((-m12).atan2(m11), (-m20).atan2(sy), 0.0)
    } else {
        DVec3::new(m21.atan2(m22), (-m20).atan2(sy), m10.atan2(m00))
    }
}
