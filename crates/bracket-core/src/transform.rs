//! Rigid-body transform used to place solids in the scene

use glam::{DAffine3, DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// Affine rigid-body transform (rotation + translation)
///
/// Transforms compose like nested modelling operations: `a.append(b)` yields
/// `a · b`, so `b` is applied to the geometry first and `a` last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    affine: DAffine3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        affine: DAffine3::IDENTITY,
    };

    /// Largest per-entry difference at which two transforms count as identical
    pub const DEFAULT_TOLERANCE: f64 = 1e-9;

    /// Pure translation
    pub fn from_translation(offset: DVec3) -> Self {
        Self {
            affine: DAffine3::from_translation(offset),
        }
    }

    /// Rotation by Euler angles in degrees, applied around X, then Y, then Z
    pub fn from_euler_degrees(angles: DVec3) -> Self {
        let rotation = DMat3::from_rotation_z(angles.z.to_radians())
            * DMat3::from_rotation_y(angles.y.to_radians())
            * DMat3::from_rotation_x(angles.x.to_radians());
        Self {
            affine: DAffine3::from_mat3(rotation),
        }
    }

    /// Rotation by `degrees` around `axis`; the axis does not need to be unit length
    ///
    /// A zero axis yields the identity.
    pub fn from_axis_angle_degrees(degrees: f64, axis: DVec3) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return Self::IDENTITY;
        }
        Self {
            affine: DAffine3::from_axis_angle(axis, degrees.to_radians()),
        }
    }

    /// Wrap an existing affine matrix
    pub fn from_affine(affine: DAffine3) -> Self {
        Self { affine }
    }

    /// Right-compose `other` onto this transform in place
    pub fn append(&mut self, other: &Transform) {
        self.affine = self.affine * other.affine;
    }

    /// Builder form of [`Transform::append`]
    pub fn appended(mut self, other: &Transform) -> Self {
        self.append(other);
        self
    }

    pub fn inverse(&self) -> Self {
        Self {
            affine: self.affine.inverse(),
        }
    }

    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.affine.transform_point3(point)
    }

    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.affine.transform_vector3(vector)
    }

    pub fn translation(&self) -> DVec3 {
        self.affine.translation
    }

    pub fn affine(&self) -> &DAffine3 {
        &self.affine
    }

    /// Entry-wise comparison with an absolute tolerance
    pub fn approx_eq(&self, other: &Transform, tolerance: f64) -> bool {
        self.affine.abs_diff_eq(other.affine, tolerance)
    }

    /// Column-major 3x4 matrix (three basis columns followed by the translation)
    pub fn to_cols_array(&self) -> [f64; 12] {
        self.affine.to_cols_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_applies_right_operand_first() {
        let mut transform = Transform::from_translation(DVec3::new(1.0, 0.0, 0.0));
        transform.append(&Transform::from_euler_degrees(DVec3::new(0.0, 0.0, 90.0)));

        let moved = transform.transform_point(DVec3::X);
        assert!(moved.abs_diff_eq(DVec3::new(1.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_euler_order_is_x_then_y_then_z() {
        let rotation = Transform::from_euler_degrees(DVec3::new(90.0, 90.0, 0.0));
        // X first takes Y to Z, then Y takes Z to X
        let rotated = rotation.transform_vector(DVec3::Y);
        assert!(rotated.abs_diff_eq(DVec3::X, 1e-12));
    }

    #[test]
    fn test_axis_angle_normalizes_axis() {
        let a = Transform::from_axis_angle_degrees(45.0, DVec3::new(0.0, 0.0, -5.0));
        let b = Transform::from_axis_angle_degrees(45.0, DVec3::NEG_Z);
        assert!(a.approx_eq(&b, Transform::DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let t = Transform::from_axis_angle_degrees(30.0, DVec3::ZERO);
        assert_eq!(t, Transform::IDENTITY);
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::from_translation(DVec3::new(0.0, 2.0, -3.5))
            .appended(&Transform::from_axis_angle_degrees(30.0, DVec3::ONE));
        let product = t.appended(&t.inverse());
        assert!(product.approx_eq(&Transform::IDENTITY, 1e-12));
    }
}
