//! Numerical settings for anchor resolution

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::transform::Transform;

/// Settings used by [`crate::AnchorGraph::resolve`] and [`crate::align_normals`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolveConfig {
    /// Preferred rotation axis when two normals are parallel or anti-parallel.
    /// Projected onto the plane orthogonal to the source normal.
    pub flip_axis: DVec3,
    /// Below this cross-product length two normals count as parallel
    pub parallel_epsilon: f64,
    /// Below this value Euler extraction takes the gimbal-lock branch
    pub gimbal_epsilon: f64,
    /// Per-entry tolerance when a solid is reached twice
    pub transform_tolerance: f64,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            flip_axis: DVec3::Y,
            parallel_epsilon: 1e-9,
            gimbal_epsilon: 1e-6,
            transform_tolerance: Transform::DEFAULT_TOLERANCE,
        }
    }
}

impl ResolveConfig {
    pub fn with_flip_axis(mut self, axis: DVec3) -> Self {
        self.flip_axis = axis;
        self
    }

    pub fn with_transform_tolerance(mut self, tolerance: f64) -> Self {
        self.transform_tolerance = tolerance;
        self
    }
}
