use glam::DVec3;
use tracing::debug;

use super::dimensions::FOOT_THICKNESS_FRONT;
use super::{RackFoot, RackSegment, SideBrace};
use crate::anchor::{AnchorGraph, SolidId};
use crate::error::AnchorResult;
use crate::transform::Transform;

/// Handles of every part of a rack bracket
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rack {
    /// Spine segments, top first
    pub segments: Vec<SolidId>,
    /// One brace per segment, in the same order
    pub braces: Vec<SolidId>,
    pub foot: Option<SolidId>,
}

impl Rack {
    /// Add a rack of `height_units` segments to `graph` and connect its parts
    ///
    /// Segments stack bottom-to-top, each carries a side brace on its `left`
    /// anchor, and the lowest one stands on the foot. A zero-unit rack is empty.
    pub fn build(graph: &mut AnchorGraph, height_units: u8) -> AnchorResult<Self> {
        let mut rack = Rack::default();
        if height_units == 0 {
            return Ok(rack);
        }

        for i in 0..height_units {
            let segment = graph.add_solid(|anchors| RackSegment::new(format!("segment-{i}"), anchors))?;
            let unit = height_units - 1 - i;
            let brace = graph.add_solid(|anchors| {
                SideBrace::new(format!("brace-{i}"), height_units, unit, anchors)
            })?;

            if let Some(&previous) = rack.segments.last() {
                graph.connect_named((previous, "bottom"), (segment, "top"), 0.0)?;
            }
            graph.connect_named((segment, "left"), (brace, "segmentattach"), 0.0)?;

            rack.segments.push(segment);
            rack.braces.push(brace);
        }

        let foot = graph.add_solid(|anchors| RackFoot::new("foot", anchors))?;
        if let Some(&lowest) = rack.segments.last() {
            graph.connect_named((lowest, "bottom"), (foot, "top"), 0.0)?;
        }
        rack.foot = Some(foot);

        debug!("Built rack with {} segments", rack.segments.len());
        Ok(rack)
    }

    /// Placement of the whole scene, raising the resolved rack by the foot's front thickness
    pub fn scene_origin() -> Transform {
        Transform::from_translation(DVec3::new(0.0, 0.0, FOOT_THICKNESS_FRONT))
    }

    /// Solid to start resolution from
    pub fn root(&self) -> Option<SolidId> {
        self.foot
    }

    /// All parts of the rack
    pub fn solids(&self) -> impl Iterator<Item = SolidId> + '_ {
        self.segments
            .iter()
            .chain(self.braces.iter())
            .chain(self.foot.iter())
            .copied()
    }
}
