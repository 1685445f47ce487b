//! World transform resolution for AnchorGraph

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info};

use super::{AnchorGraph, AnchorId, SolidId};
use crate::config::ResolveConfig;
use crate::error::{AnchorError, AnchorResult};
use crate::rotation::align_normals;
use crate::transform::Transform;

/// Outcome of a resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Solids that received a transform, in placement order (start first)
    pub placed: Vec<SolidId>,
}

impl AnchorGraph {
    /// Place every solid reachable from `start`
    ///
    /// `start` gets the identity; the pass then walks connections breadth-first.
    /// Crossing a connection from anchor `a` (on an already placed solid with
    /// transform `T`) to anchor `b` places `b`'s solid at
    /// `T · offset(a) · twist(angle, normal(a)) · align(normal(a), normal(b)) · offset(b)⁻¹`.
    /// Each connection is crossed once. Solids that cannot be reached keep no
    /// transform.
    pub fn resolve(&mut self, start: SolidId, config: &ResolveConfig) -> AnchorResult<Resolution> {
        let mut resolution = Resolution::default();
        if self.place(start, Transform::IDENTITY, config)? {
            resolution.placed.push(start);
        }

        let mut queue = VecDeque::from([start]);
        let mut visited = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }

            let solid = self.solid(current)?;
            let Some(&transform) = solid.anchor_transform() else {
                panic!("solid {} was queued without a transform", solid.name());
            };
            // BTreeMap order keeps the pass independent of insertion order
            let anchor_ids: Vec<AnchorId> = solid.anchors().values().copied().collect();

            for anchor_id in anchor_ids {
                let Some(target) = self.cross(anchor_id, &transform, config)? else {
                    continue;
                };
                if target.newly_placed {
                    resolution.placed.push(target.solid);
                }
                if !visited.contains(&target.solid) {
                    queue.push_back(target.solid);
                }
            }
        }

        info!(
            "Resolved {} of {} solids starting from {}",
            resolution.placed.len(),
            self.len(),
            self.solid(start)?.name()
        );
        Ok(resolution)
    }

    /// Cross the connection of `anchor_id`, if it has an unresolved one
    fn cross(
        &mut self,
        anchor_id: AnchorId,
        transform: &Transform,
        config: &ResolveConfig,
    ) -> AnchorResult<Option<Crossing>> {
        let anchor = self.anchor(anchor_id)?;
        let Some(connection) = anchor.connection else {
            return Ok(None);
        };
        if connection.resolved {
            return Ok(None);
        }

        let target_anchor = self.anchor(connection.target)?;
        let target = target_anchor.parent;

        let alignment = align_normals(anchor.normal, target_anchor.normal, config);
        let twist = Transform::from_axis_angle_degrees(connection.angle, anchor.normal);
        let world = transform
            .appended(&anchor.local_offset)
            .appended(&twist)
            .appended(&Transform::from_euler_degrees(alignment.euler_degrees))
            .appended(&target_anchor.local_offset.inverse());

        debug!(
            "Crossing {} -> {} (twist {}°, align {:?})",
            self.anchor_label(anchor_id),
            self.anchor_label(connection.target),
            connection.angle,
            alignment.euler_degrees
        );

        let newly_placed = self.place(target, world, config)?;
        self.mark_resolved(anchor_id, connection.target);

        Ok(Some(Crossing {
            solid: target,
            newly_placed,
        }))
    }

    /// Assign `transform` to `solid`; returns false if it already held an equal one
    fn place(
        &mut self,
        solid: SolidId,
        transform: Transform,
        config: &ResolveConfig,
    ) -> AnchorResult<bool> {
        let entry = self.solid_mut(solid)?;
        if let Some(existing) = entry.anchor_transform() {
            if existing.approx_eq(&transform, config.transform_tolerance) {
                return Ok(false);
            }
            return Err(AnchorError::ConflictingTransform {
                solid: entry.name().to_string(),
            });
        }

        match entry.set_anchor_transform(transform) {
            Ok(()) => Ok(true),
            Err(AnchorError::AlreadySet) => Err(AnchorError::ConflictingTransform {
                solid: entry.name().to_string(),
            }),
            Err(e) => Err(e),
        }
    }

    fn mark_resolved(&mut self, a: AnchorId, b: AnchorId) {
        for id in [a, b] {
            if let Some(connection) = self.anchors.get_mut(id.0).and_then(|x| x.connection.as_mut()) {
                connection.resolved = true;
            }
        }
    }
}

struct Crossing {
    solid: SolidId,
    newly_placed: bool,
}
