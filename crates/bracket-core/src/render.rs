//! Hand-off from a resolved anchor graph to a scene renderer

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorGraph, SolidId};
use crate::error::{AnchorError, AnchorResult};
use crate::transform::Transform;

/// Tessellation quality settings passed to a renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderSettings {
    /// Minimum angle of a curve fragment, in degrees
    pub fragment_angle: f64,
    /// Minimum length of a curve fragment
    pub fragment_size: f64,
    /// Fixed fragment count for a full circle; 0 defers to angle and size
    pub fragment_count: u16,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fragment_angle: 12.0,
            fragment_size: 2.0,
            fragment_count: 0,
        }
    }
}

impl RenderSettings {
    /// Lower bound for fragment angle and size
    pub const MIN_FRAGMENT: f64 = 0.01;

    /// Finer settings for final output
    pub fn production() -> Self {
        Self {
            fragment_angle: 5.0,
            fragment_size: 0.5,
            fragment_count: 0,
        }
    }

    pub fn with_fragment_angle(mut self, degrees: f64) -> Self {
        self.fragment_angle = degrees.max(Self::MIN_FRAGMENT);
        self
    }

    pub fn with_fragment_size(mut self, size: f64) -> Self {
        self.fragment_size = size.max(Self::MIN_FRAGMENT);
        self
    }

    pub fn with_fragment_count(mut self, count: u16) -> Self {
        self.fragment_count = count;
        self
    }

    /// Clamp values that came from an untrusted source (e.g. a config file)
    pub fn sanitized(self) -> Self {
        self.with_fragment_angle(self.fragment_angle)
            .with_fragment_size(self.fragment_size)
    }
}

/// A resolved solid ready to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a> {
    pub solid: SolidId,
    pub name: &'a str,
    pub kind: &'static str,
    /// Bounding box size in the solid's local frame
    pub extent: DVec3,
    /// World transform assigned by resolution
    pub transform: Transform,
}

/// Consumer of resolved placements, e.g. a text serializer
pub trait SceneRenderer {
    type Error: From<AnchorError>;

    fn render(
        &mut self,
        settings: &RenderSettings,
        placements: &[Placement<'_>],
    ) -> Result<(), Self::Error>;
}

impl AnchorGraph {
    /// Every solid with its world transform
    ///
    /// Fails with [`AnchorError::NotYetResolved`] on the first solid that
    /// resolution never reached.
    pub fn placements(&self) -> AnchorResult<Vec<Placement<'_>>> {
        self.solid_ids()
            .map(|id| {
                let solid = self.solid(id)?;
                let transform = solid.anchor_transform().copied().ok_or_else(|| {
                    AnchorError::NotYetResolved {
                        solid: solid.name().to_string(),
                    }
                })?;
                Ok(Placement {
                    solid: id,
                    name: solid.name(),
                    kind: solid.kind(),
                    extent: solid.extent(),
                    transform,
                })
            })
            .collect()
    }

    /// Collect placements and hand them to `renderer`
    pub fn render_with<R: SceneRenderer>(
        &self,
        renderer: &mut R,
        settings: &RenderSettings,
    ) -> Result<(), R::Error> {
        let placements = self.placements()?;
        renderer.render(settings, &placements)
    }
}
