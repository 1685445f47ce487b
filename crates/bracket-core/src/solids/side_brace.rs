use std::collections::BTreeMap;

use glam::DVec3;

use super::dimensions::{
    FOOT_LENGTH, SEGMENT_HEIGHT, SIDE_BRACE_ATTACHMENT_DEPTH, SIDE_BRACE_WIDTH, SPINE_THICKNESS,
};
use crate::anchor::{AnchorBuilder, AnchorFrame, AnchorId, Anchored};
use crate::error::AnchorResult;
use crate::transform::Transform;

/// Flat brace running from one segment down to the foot
///
/// Lower braces reach further along the foot and get a shallower tab; the
/// shape depends on how many segments sit below the brace's own.
#[derive(Debug, Clone)]
pub struct SideBrace {
    name: String,
    /// Number of segments in the rack
    total_height: u8,
    /// Index of the segment the brace attaches to, 0 being the lowest
    height_unit: u8,
    frame: AnchorFrame,
}

impl SideBrace {
    pub fn new(
        name: impl Into<String>,
        total_height: u8,
        height_unit: u8,
        anchors: &mut AnchorBuilder<'_>,
    ) -> AnchorResult<Self> {
        anchors.anchor(
            "segmentattach",
            Transform::from_translation(DVec3::new(
                SEGMENT_HEIGHT / 2.0,
                SPINE_THICKNESS / 2.0,
                -SIDE_BRACE_WIDTH / 2.0,
            )),
            DVec3::Z,
        )?;

        Ok(Self {
            name: name.into(),
            total_height: total_height.max(1),
            height_unit: height_unit.min(total_height.saturating_sub(1)),
            frame: anchors.frame(),
        })
    }

    /// Segments from this brace's own down to the foot, inclusive
    fn span(&self) -> u8 {
        self.total_height - self.height_unit
    }

    /// How far the brace reaches along the foot
    pub fn foot_reach(&self) -> f64 {
        (f64::from(self.span()) / f64::from(self.total_height)).sqrt() * FOOT_LENGTH * 2.0 / 3.0
    }

    /// Depth of the tab that rests on the foot
    pub fn attachment_depth(&self) -> f64 {
        SIDE_BRACE_ATTACHMENT_DEPTH * 0.8f64.powi(i32::from(self.span()) - 1)
    }
}

impl Anchored for SideBrace {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> &'static str {
        "side-brace"
    }

    fn extent(&self) -> DVec3 {
        DVec3::new(
            f64::from(self.span()) * SEGMENT_HEIGHT,
            self.foot_reach(),
            SIDE_BRACE_WIDTH,
        )
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
