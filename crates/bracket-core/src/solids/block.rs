use std::collections::BTreeMap;

use glam::DVec3;

use crate::anchor::{AnchorBuilder, AnchorFrame, AnchorId, Anchored};
use crate::error::AnchorResult;
use crate::transform::Transform;

/// Cube centred on its origin
#[derive(Debug, Clone)]
pub struct Block {
    name: String,
    edge: f64,
    frame: AnchorFrame,
}

impl Block {
    /// Cube of `edge` length with anchors on its top, bottom and +X faces
    pub fn new(name: impl Into<String>, edge: f64, anchors: &mut AnchorBuilder<'_>) -> AnchorResult<Self> {
        let half = edge / 2.0;
        anchors.anchor("top", Transform::from_translation(DVec3::new(0.0, 0.0, half)), DVec3::Z)?;
        anchors.anchor("bottom", Transform::from_translation(DVec3::new(0.0, 0.0, -half)), DVec3::NEG_Z)?;
        anchors.anchor("right", Transform::from_translation(DVec3::new(half, 0.0, 0.0)), DVec3::X)?;

        Ok(Self {
            name: name.into(),
            edge,
            frame: anchors.frame(),
        })
    }

    pub fn edge(&self) -> f64 {
        self.edge
    }
}

impl Anchored for Block {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "block"
    }

    fn extent(&self) -> DVec3 {
        DVec3::splat(self.edge)
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
