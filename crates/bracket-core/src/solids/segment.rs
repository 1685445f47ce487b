use std::collections::BTreeMap;

use glam::DVec3;

use super::dimensions::{SEGMENT_HEIGHT, SEGMENT_HOLE_SPACING, SPINE_THICKNESS, SPINE_WIDTH};
use crate::anchor::{AnchorBuilder, AnchorFrame, AnchorId, Anchored};
use crate::error::AnchorResult;
use crate::transform::Transform;

/// One rack unit of spine with three screw holes, centred on its origin
#[derive(Debug, Clone)]
pub struct RackSegment {
    name: String,
    frame: AnchorFrame,
}

impl RackSegment {
    pub fn new(name: impl Into<String>, anchors: &mut AnchorBuilder<'_>) -> AnchorResult<Self> {
        anchors.anchor(
            "top",
            Transform::from_translation(DVec3::new(0.0, 0.0, SEGMENT_HEIGHT / 2.0)),
            DVec3::Z,
        )?;
        anchors.anchor(
            "left",
            Transform::from_translation(DVec3::new(SPINE_WIDTH / 2.0, 0.0, 0.0)),
            DVec3::X,
        )?;
        anchors.anchor(
            "bottom",
            Transform::from_translation(DVec3::new(0.0, 0.0, -SEGMENT_HEIGHT / 2.0)),
            DVec3::NEG_Z,
        )?;

        Ok(Self {
            name: name.into(),
            frame: anchors.frame(),
        })
    }

    /// Screw hole centres along the spine, top to bottom
    pub fn hole_centers() -> [DVec3; 3] {
        let offset = SEGMENT_HEIGHT / 2.0 - SEGMENT_HOLE_SPACING;
        [
            DVec3::new(0.0, 0.0, offset),
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, -offset),
        ]
    }
}

impl Anchored for RackSegment {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "segment"
    }

    fn extent(&self) -> DVec3 {
        DVec3::new(SPINE_WIDTH, SPINE_THICKNESS, SEGMENT_HEIGHT)
    }

    fn anchors(&self) -> &BTreeMap<String, AnchorId> {
        self.frame.anchors()
    }

    fn set_anchor_transform(&mut self, transform: Transform) -> AnchorResult<()> {
        self.frame.set_transform(transform)
    }

    fn anchor_transform(&self) -> Option<&Transform> {
        self.frame.transform()
    }
}
