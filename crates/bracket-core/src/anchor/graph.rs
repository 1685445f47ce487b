//! Graph operations for AnchorGraph (add solids, look up, connect, disconnect)

use std::collections::BTreeMap;

use glam::DVec3;
use tracing::debug;

use super::{Anchor, AnchorFrame, AnchorGraph, AnchorId, Anchored, Connection, SolidId};
use crate::error::{AnchorError, AnchorResult};
use crate::transform::Transform;

/// Twist seen from the other side of a connection
pub fn reciprocal_angle(angle: f64) -> f64 {
    normalize_angle(360.0 - angle)
}

/// Map an angle in degrees into `[0, 360)`
fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Largest distance on the circle, in degrees, at which two twists are equal
pub(crate) const ANGLE_TOLERANCE: f64 = 1e-9;

/// Compare two twists on the circle, so that 359.9999999999 and 0 match
pub(super) fn angles_match(a: f64, b: f64) -> bool {
    let delta = (a - b).rem_euclid(360.0);
    delta.min(360.0 - delta) <= ANGLE_TOLERANCE
}

/// Registers the anchors of a solid while it is being added to the graph
pub struct AnchorBuilder<'a> {
    parent: SolidId,
    anchors: &'a mut Vec<Anchor>,
    names: BTreeMap<String, AnchorId>,
}

impl AnchorBuilder<'_> {
    /// Handle the solid under construction will receive
    pub fn solid(&self) -> SolidId {
        self.parent
    }

    /// Declare an anchor at `offset` from the solid's origin, mating along `normal`
    pub fn anchor(
        &mut self,
        name: impl Into<String>,
        offset: Transform,
        normal: DVec3,
    ) -> AnchorResult<AnchorId> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(AnchorError::DuplicateAnchor(name));
        }
        let normal = normal.normalize_or_zero();
        if normal == DVec3::ZERO {
            return Err(AnchorError::InvalidNormal(name));
        }

        let id = AnchorId(self.anchors.len());
        self.anchors.push(Anchor {
            name: name.clone(),
            parent: self.parent,
            local_offset: offset,
            normal,
            connection: None,
        });
        self.names.insert(name, id);
        Ok(id)
    }

    /// Anchor bookkeeping holding every anchor declared so far
    pub fn frame(&self) -> AnchorFrame {
        AnchorFrame::new(self.names.clone())
    }
}

impl AnchorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid together with its anchors
    ///
    /// `build` declares the anchors through the builder and returns the solid.
    /// If it fails, no anchor of the solid stays registered.
    pub fn add_solid<S, F>(&mut self, build: F) -> AnchorResult<SolidId>
    where
        S: Anchored + 'static,
        F: FnOnce(&mut AnchorBuilder<'_>) -> AnchorResult<S>,
    {
        let id = SolidId(self.solids.len());
        let mark = self.anchors.len();
        let mut builder = AnchorBuilder {
            parent: id,
            anchors: &mut self.anchors,
            names: BTreeMap::new(),
        };

        match build(&mut builder) {
            Ok(solid) => {
                debug!(
                    "Added {} {} with {} anchors",
                    solid.kind(),
                    solid.name(),
                    solid.anchors().len()
                );
                self.solids.push(Box::new(solid));
                Ok(id)
            }
            Err(e) => {
                self.anchors.truncate(mark);
                Err(e)
            }
        }
    }

    /// Number of solids
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn solid_ids(&self) -> impl Iterator<Item = SolidId> + '_ {
        (0..self.solids.len()).map(SolidId)
    }

    pub fn solid(&self, id: SolidId) -> AnchorResult<&dyn Anchored> {
        self.solids
            .get(id.0)
            .map(|s| s.as_ref())
            .ok_or(AnchorError::UnknownSolid(id))
    }

    pub(crate) fn solid_mut(&mut self, id: SolidId) -> AnchorResult<&mut Box<dyn Anchored>> {
        self.solids
            .get_mut(id.0)
            .ok_or(AnchorError::UnknownSolid(id))
    }

    pub fn anchor(&self, id: AnchorId) -> AnchorResult<&Anchor> {
        self.anchors.get(id.0).ok_or(AnchorError::UnknownAnchor(id))
    }

    /// Find an anchor of `solid` by name
    pub fn anchor_id(&self, solid: SolidId, name: &str) -> AnchorResult<AnchorId> {
        let owner = self.solid(solid)?;
        owner
            .anchors()
            .get(name)
            .copied()
            .ok_or_else(|| AnchorError::AnchorNotFound {
                solid: owner.name().to_string(),
                name: name.to_string(),
            })
    }

    /// World transform of a solid, if resolution reached it
    pub fn world_transform(&self, solid: SolidId) -> AnchorResult<Option<Transform>> {
        Ok(self.solid(solid)?.anchor_transform().copied())
    }

    /// "solid.anchor" label for logs and errors
    pub(crate) fn anchor_label(&self, id: AnchorId) -> String {
        match self.anchors.get(id.0) {
            Some(anchor) => match self.solids.get(anchor.parent.0) {
                Some(parent) => format!("{}.{}", parent.name(), anchor.name),
                None => anchor.name.clone(),
            },
            None => format!("{id:?}"),
        }
    }

    /// Connect two anchors with a twist of `angle` degrees around `a`'s normal
    ///
    /// `b` receives the reciprocal connection with angle `(360 - angle) mod 360`.
    /// Repeating an identical call is a no-op; rebinding either anchor fails
    /// with [`AnchorError::AlreadyConnected`] and leaves both untouched.
    pub fn connect(&mut self, a: AnchorId, b: AnchorId, angle: f64) -> AnchorResult<()> {
        let source = self.anchor(a)?;
        let target = self.anchor(b)?;
        if a == b {
            return Err(AnchorError::SelfConnection(self.anchor_label(a)));
        }

        if !angle.is_finite() {
            return Err(AnchorError::InvalidAngle {
                anchor: self.anchor_label(a),
                angle,
            });
        }

        let angle = normalize_angle(angle);
        let forward = Connection::new(b, angle);
        let backward = Connection::new(a, reciprocal_angle(angle));

        if let (Some(existing), Some(reciprocal)) = (&source.connection, &target.connection)
            && existing.links(&forward)
            && reciprocal.links(&backward)
        {
            return Ok(());
        }
        if source.connection.is_some_and(|c| !c.links(&forward)) {
            return Err(AnchorError::AlreadyConnected {
                anchor: self.anchor_label(a),
            });
        }
        if target.connection.is_some_and(|c| !c.links(&backward)) {
            return Err(AnchorError::AlreadyConnected {
                anchor: self.anchor_label(b),
            });
        }

        debug!(
            "Connected {} -> {} at {}°",
            self.anchor_label(a),
            self.anchor_label(b),
            angle
        );
        self.anchors[a.0].connection = Some(forward);
        self.anchors[b.0].connection = Some(backward);
        Ok(())
    }

    /// Connect anchors looked up by solid and name
    pub fn connect_named(
        &mut self,
        a: (SolidId, &str),
        b: (SolidId, &str),
        angle: f64,
    ) -> AnchorResult<()> {
        let source = self.anchor_id(a.0, a.1)?;
        let target = self.anchor_id(b.0, b.1)?;
        self.connect(source, target, angle)
    }

    /// Remove the connection of `a` and its reciprocal
    pub fn disconnect(&mut self, a: AnchorId) -> AnchorResult<Connection> {
        let connection = self
            .anchor(a)?
            .connection
            .ok_or_else(|| AnchorError::NotConnected(self.anchor_label(a)))?;

        self.anchors[a.0].connection = None;
        if let Some(other) = self.anchors.get_mut(connection.target.0)
            && other.connection.is_some_and(|c| c.target == a)
        {
            other.connection = None;
        }
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solids::Block;

    fn two_blocks() -> (AnchorGraph, SolidId, SolidId) {
        let mut graph = AnchorGraph::new();
        let one = graph.add_solid(|anchors| Block::new("one", 7.0, anchors)).unwrap();
        let two = graph.add_solid(|anchors| Block::new("two", 2.0, anchors)).unwrap();
        (graph, one, two)
    }

    #[test]
    fn test_reciprocal_angle() {
        assert_eq!(reciprocal_angle(45.0), 315.0);
        assert_eq!(reciprocal_angle(0.0), 0.0);
        assert_eq!(reciprocal_angle(180.0), 180.0);
        assert_eq!(reciprocal_angle(reciprocal_angle(90.0)), 90.0);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(400.0), 40.0);
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(-1e-20), 0.0);
    }

    #[test]
    fn test_connect_sets_reciprocal() {
        let (mut graph, one, two) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        let right = graph.anchor_id(two, "right").unwrap();

        graph.connect(bottom, right, 45.0).unwrap();

        let forward = graph.anchor(bottom).unwrap().connection().copied().unwrap();
        let backward = graph.anchor(right).unwrap().connection().copied().unwrap();
        assert_eq!(forward.target, right);
        assert_eq!(forward.angle, 45.0);
        assert_eq!(backward.target, bottom);
        assert_eq!(backward.angle, 315.0);
        assert!(!forward.resolved && !backward.resolved);
    }

    #[test]
    fn test_connect_is_idempotent() {
        let (mut graph, one, two) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        let top = graph.anchor_id(two, "top").unwrap();

        graph.connect(bottom, top, 30.0).unwrap();
        assert!(graph.connect(bottom, top, 30.0).is_ok());
        // the reverse direction of the same pairing is also a no-op
        assert!(graph.connect(top, bottom, 330.0).is_ok());
    }

    #[test]
    fn test_connect_reverse_with_inexact_angle() {
        let (mut graph, one, two) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        let top = graph.anchor_id(two, "top").unwrap();

        graph.connect(bottom, top, 0.1).unwrap();
        let stored = graph.anchor(top).unwrap().connection().unwrap().angle;
        assert!(graph.connect(top, bottom, stored).is_ok());
        assert!(graph.connect(top, bottom, 359.9).is_ok());
        assert!(graph.connect(bottom, top, 0.1).is_ok());
        assert!(matches!(
            graph.connect(top, bottom, 359.8),
            Err(AnchorError::AlreadyConnected { .. })
        ));
    }

    #[test]
    fn test_angles_match_across_zero() {
        assert!(angles_match(0.0, 360.0 - 1e-12));
        assert!(angles_match(0.1, reciprocal_angle(reciprocal_angle(0.1))));
        assert!(!angles_match(0.0, 1e-6));
        assert!(!angles_match(f64::NAN, f64::NAN));
    }

    #[test]
    fn test_connect_rejects_non_finite_angle() {
        let (mut graph, one, two) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        let top = graph.anchor_id(two, "top").unwrap();

        for angle in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                graph.connect(bottom, top, angle),
                Err(AnchorError::InvalidAngle { .. })
            ));
        }
        assert!(graph.anchor(bottom).unwrap().connection().is_none());
        assert!(graph.anchor(top).unwrap().connection().is_none());

        // the anchors stay free for a valid connection
        graph.connect(bottom, top, 0.0).unwrap();
        assert!(graph.connect(bottom, top, 0.0).is_ok());
    }

    #[test]
    fn test_connect_rejects_different_angle() {
        let (mut graph, one, two) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        let top = graph.anchor_id(two, "top").unwrap();

        graph.connect(bottom, top, 30.0).unwrap();
        let result = graph.connect(bottom, top, 60.0);
        assert!(matches!(result, Err(AnchorError::AlreadyConnected { .. })));
        assert_eq!(graph.anchor(bottom).unwrap().connection().unwrap().angle, 30.0);
        assert_eq!(graph.anchor(top).unwrap().connection().unwrap().angle, 330.0);
    }

    #[test]
    fn test_connect_rejects_bound_target() {
        let (mut graph, one, two) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        let top = graph.anchor_id(one, "top").unwrap();
        let right = graph.anchor_id(two, "right").unwrap();

        graph.connect(bottom, right, 0.0).unwrap();
        let result = graph.connect(top, right, 0.0);
        assert_eq!(
            result,
            Err(AnchorError::AlreadyConnected {
                anchor: "two.right".to_string()
            })
        );
        assert!(graph.anchor(top).unwrap().connection().is_none());
    }

    #[test]
    fn test_connect_rejects_self() {
        let (mut graph, one, _) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        assert!(matches!(
            graph.connect(bottom, bottom, 0.0),
            Err(AnchorError::SelfConnection(_))
        ));
    }

    #[test]
    fn test_connect_unknown_anchor() {
        let (mut graph, one, _) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        let missing = AnchorId(999);
        assert_eq!(
            graph.connect(bottom, missing, 0.0),
            Err(AnchorError::UnknownAnchor(missing))
        );
    }

    #[test]
    fn test_anchor_not_found() {
        let (graph, one, _) = two_blocks();
        assert_eq!(
            graph.anchor_id(one, "left"),
            Err(AnchorError::AnchorNotFound {
                solid: "one".to_string(),
                name: "left".to_string()
            })
        );
    }

    #[test]
    fn test_disconnect_clears_both_sides() {
        let (mut graph, one, two) = two_blocks();
        let bottom = graph.anchor_id(one, "bottom").unwrap();
        let top = graph.anchor_id(two, "top").unwrap();

        graph.connect(bottom, top, 0.0).unwrap();
        let removed = graph.disconnect(top).unwrap();
        assert_eq!(removed.target, bottom);
        assert!(graph.anchor(bottom).unwrap().connection().is_none());
        assert!(graph.anchor(top).unwrap().connection().is_none());
        assert!(matches!(graph.disconnect(top), Err(AnchorError::NotConnected(_))));

        // freed anchors can be bound again
        assert!(graph.connect(bottom, top, 90.0).is_ok());
    }

    #[test]
    fn test_failed_solid_leaves_no_anchors() {
        let mut graph = AnchorGraph::new();
        let result = graph.add_solid(|anchors| {
            anchors.anchor("a", Transform::IDENTITY, DVec3::Z)?;
            anchors.anchor("a", Transform::IDENTITY, DVec3::X)?;
            Block::new("broken", 1.0, anchors)
        });
        assert_eq!(result, Err(AnchorError::DuplicateAnchor("a".to_string())));
        assert!(graph.is_empty());
        assert!(graph.anchors.is_empty());
    }

    #[test]
    fn test_zero_normal_is_rejected() {
        let mut graph = AnchorGraph::new();
        let result = graph.add_solid(|anchors| {
            anchors.anchor("flat", Transform::IDENTITY, DVec3::ZERO)?;
            Block::new("broken", 1.0, anchors)
        });
        assert_eq!(result, Err(AnchorError::InvalidNormal("flat".to_string())));
    }

    #[test]
    fn test_normals_are_normalized() {
        let mut graph = AnchorGraph::new();
        let mut id = None;
        graph
            .add_solid(|anchors| {
                id = Some(anchors.anchor("tilted", Transform::IDENTITY, DVec3::new(3.0, 4.0, 0.0))?);
                Block::new("tilted", 1.0, anchors)
            })
            .unwrap();
        let normal = graph.anchor(id.unwrap()).unwrap().normal();
        assert!(normal.abs_diff_eq(DVec3::new(0.6, 0.8, 0.0), 1e-12));
    }
}
