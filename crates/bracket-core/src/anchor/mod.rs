//! Anchor graph: named, oriented attachment points on solids
//!
//! Solids and anchors live in an [`AnchorGraph`] arena and refer to each other
//! through [`SolidId`] / [`AnchorId`] handles:
//! - an [`Anchor`] knows its parent solid and at most one [`Connection`]
//! - an [`Anchored`] solid exposes its anchors by name and holds one world transform
//! - [`AnchorGraph::connect`] pairs anchors, [`AnchorGraph::resolve`] places solids

mod graph;
mod resolve;

pub use graph::{AnchorBuilder, reciprocal_angle};
pub use resolve::Resolution;

use std::collections::BTreeMap;
use std::fmt;

use glam::DVec3;

use crate::error::{AnchorError, AnchorResult};
use crate::transform::Transform;

/// Handle of a solid inside an [`AnchorGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolidId(pub(crate) usize);

/// Handle of an anchor inside an [`AnchorGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub(crate) usize);

impl SolidId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl AnchorId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One side of a connection between two anchors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Anchor on the other side
    pub target: AnchorId,
    /// Twist in degrees around this anchor's normal, in `[0, 360)`
    pub angle: f64,
    /// Set on both sides once the resolver has crossed this connection
    pub resolved: bool,
}

impl Connection {
    pub(crate) fn new(target: AnchorId, angle: f64) -> Self {
        Self {
            target,
            angle,
            resolved: false,
        }
    }

    /// Same target and twist, ignoring resolution state
    pub(crate) fn links(&self, other: &Connection) -> bool {
        self.target == other.target && graph::angles_match(self.angle, other.angle)
    }
}

/// A named, oriented attachment point on a solid
#[derive(Debug, Clone)]
pub struct Anchor {
    pub(crate) name: String,
    pub(crate) parent: SolidId,
    /// Transform from the parent's origin to the anchor point
    pub(crate) local_offset: Transform,
    /// Unit direction, in the parent's frame, along which the anchor mates
    pub(crate) normal: DVec3,
    pub(crate) connection: Option<Connection>,
}

impl Anchor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> SolidId {
        self.parent
    }

    pub fn local_offset(&self) -> &Transform {
        &self.local_offset
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }
}

/// Capability shared by every solid that can be joined through anchors
pub trait Anchored: fmt::Debug {
    /// Instance name, used in logs and exported scenes
    fn name(&self) -> &str;

    /// Kind of solid ("segment", "foot", ...)
    fn kind(&self) -> &'static str;

    /// Size of the solid's bounding box in its local frame
    fn extent(&self) -> DVec3;

    /// Anchors of this solid by unique name
    fn anchors(&self) -> &BTreeMap<String, AnchorId>;

    /// Assign the world transform; fails with [`AnchorError::AlreadySet`] if a
    /// different one is already present
    fn set_anchor_transform(&mut self, transform: Transform) -> AnchorResult<()>;

    fn anchor_transform(&self) -> Option<&Transform>;
}

/// Anchor bookkeeping that [`Anchored`] implementors delegate to
#[derive(Debug, Clone, Default)]
pub struct AnchorFrame {
    anchors: BTreeMap<String, AnchorId>,
    transform: Option<Transform>,
}

impl AnchorFrame {
    pub(crate) fn new(anchors: BTreeMap<String, AnchorId>) -> Self {
        Self {
            anchors,
            transform: None,
        }
    }

    pub fn anchors(&self) -> &BTreeMap<String, AnchorId> {
        &self.anchors
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// Write-once assignment; re-assigning an identical transform is accepted
    pub fn set_transform(&mut self, transform: Transform) -> AnchorResult<()> {
        match &self.transform {
            Some(existing) if existing.approx_eq(&transform, Transform::DEFAULT_TOLERANCE) => Ok(()),
            Some(_) => Err(AnchorError::AlreadySet),
            None => {
                self.transform = Some(transform);
                Ok(())
            }
        }
    }
}

/// Arena owning every solid and anchor of a scene
#[derive(Debug, Default)]
pub struct AnchorGraph {
    pub(crate) solids: Vec<Box<dyn Anchored>>,
    pub(crate) anchors: Vec<Anchor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_write_once() {
        let mut frame = AnchorFrame::default();
        let placed = Transform::from_translation(DVec3::new(0.0, 0.0, -3.5));

        assert!(frame.set_transform(placed).is_ok());
        assert!(frame.set_transform(placed).is_ok());
        assert_eq!(
            frame.set_transform(Transform::IDENTITY),
            Err(AnchorError::AlreadySet)
        );
        assert_eq!(frame.transform(), Some(&placed));
    }

    #[test]
    fn test_connection_links_ignores_resolved() {
        let mut a = Connection::new(AnchorId(3), 45.0);
        let b = Connection::new(AnchorId(3), 45.0);
        a.resolved = true;
        assert!(a.links(&b));
        assert!(!a.links(&Connection::new(AnchorId(3), 90.0)));
        assert!(!a.links(&Connection::new(AnchorId(4), 45.0)));
    }
}
