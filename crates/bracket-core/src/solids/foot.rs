use std::collections::BTreeMap;

use glam::DVec3;

use super::dimensions::{FOOT_LENGTH, FOOT_THICKNESS_FRONT, FOOT_WIDTH, SPINE_INLAY_WIDTH, SPINE_THICKNESS};
use crate::anchor::{AnchorBuilder, AnchorFrame, AnchorId, Anchored};
use crate::error::AnchorResult;
use crate::transform::Transform;

/// Wedge the rack stands on; the spine sits in an inlay near its front edge
#[derive(Debug, Clone)]
pub struct RackFoot {
    name: String,
    frame: AnchorFrame,
}

impl RackFoot {
    pub fn new(name: impl Into<String>, anchors: &mut AnchorBuilder<'_>) -> AnchorResult<Self> {
        anchors.anchor(
            "top",
            Transform::from_translation(DVec3::new(0.0, SPINE_THICKNESS / 2.0 + SPINE_INLAY_WIDTH, 0.0)),
            DVec3::Z,
        )?;

        Ok(Self {
            name: name.into(),
            frame: anchors.frame(),
        })
    }
}

impl Anchored for RackFoot {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "foot"
    }

    fn extent(&self) -> DVec3 {
        DVec3::new(FOOT_WIDTH, FOOT_LENGTH, FOOT_THICKNESS_FRONT)
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
