//! End-to-end resolution of small anchor graphs

use bracket_core::{AnchorError, AnchorGraph, Block, ResolveConfig, SolidId, Transform, reciprocal_angle};
use glam::DVec3;

fn two_blocks() -> (AnchorGraph, SolidId, SolidId) {
    let mut graph = AnchorGraph::new();
    let one = graph.add_solid(|anchors| Block::new("one", 7.0, anchors)).unwrap();
    let two = graph.add_solid(|anchors| Block::new("two", 2.0, anchors)).unwrap();
    (graph, one, two)
}

fn world(graph: &AnchorGraph, solid: SolidId) -> Transform {
    graph.world_transform(solid).unwrap().expect("solid was not resolved")
}

#[test]
fn test_bottom_to_right_with_twist() {
    let (mut graph, one, two) = two_blocks();
    graph.connect_named((one, "bottom"), (two, "right"), 45.0).unwrap();
    graph.resolve(one, &ResolveConfig::default()).unwrap();

    // the last step undoes the target anchor's offset of (1, 0, 0)
    let expected = Transform::from_translation(DVec3::new(0.0, 0.0, -3.5))
        .appended(&Transform::from_axis_angle_degrees(45.0, DVec3::NEG_Z))
        .appended(&Transform::from_euler_degrees(DVec3::new(0.0, -90.0, 0.0)))
        .appended(&Transform::from_translation(DVec3::new(-1.0, 0.0, 0.0)));

    assert_eq!(world(&graph, one), Transform::IDENTITY);
    assert!(world(&graph, two).approx_eq(&expected, 1e-9));
}

#[test]
fn test_bottom_to_top_opposite_normals() {
    let (mut graph, one, two) = two_blocks();
    graph.connect_named((one, "bottom"), (two, "top"), 0.0).unwrap();
    graph.resolve(one, &ResolveConfig::default()).unwrap();

    let expected = Transform::from_translation(DVec3::new(0.0, 0.0, -3.5))
        .appended(&Transform::from_axis_angle_degrees(0.0, DVec3::NEG_Z))
        .appended(&Transform::from_euler_degrees(DVec3::new(0.0, 180.0, 0.0)))
        .appended(&Transform::from_translation(DVec3::new(0.0, 0.0, -1.0)));

    assert_eq!(world(&graph, one), Transform::IDENTITY);
    assert!(world(&graph, two).approx_eq(&expected, 1e-9));
}

#[test]
fn test_reciprocal_angles() {
    for angle in [0.0, 15.0, 45.0, 90.0, 180.0, 270.0, 359.5] {
        let (mut graph, one, two) = two_blocks();
        graph.connect_named((one, "top"), (two, "bottom"), angle).unwrap();

        let back = graph.anchor_id(two, "bottom").unwrap();
        let reciprocal = graph.anchor(back).unwrap().connection().unwrap().angle;
        assert_eq!(reciprocal, (360.0 - angle) % 360.0);
        assert_eq!(reciprocal, reciprocal_angle(angle));
    }
}

#[test]
fn test_repeated_connect() {
    let (mut graph, one, two) = two_blocks();
    graph.connect_named((one, "bottom"), (two, "top"), 10.0).unwrap();
    assert!(graph.connect_named((one, "bottom"), (two, "top"), 10.0).is_ok());
    assert!(matches!(
        graph.connect_named((one, "bottom"), (two, "top"), 20.0),
        Err(AnchorError::AlreadyConnected { .. })
    ));
}

/// Builds the same four-solid tree, registering solids and connections in the
/// order given by `order`, and returns each solid's transform by name.
fn star(order: [usize; 3]) -> Vec<(String, Transform)> {
    let mut graph = AnchorGraph::new();
    let hub = graph.add_solid(|anchors| Block::new("hub", 4.0, anchors)).unwrap();
    let spokes = [("top", "bottom", 30.0), ("bottom", "top", 0.0), ("right", "right", 120.0)];

    let mut leaves = Vec::new();
    for &i in &order {
        let (hub_anchor, leaf_anchor, angle) = spokes[i];
        let leaf = graph
            .add_solid(|anchors| Block::new(format!("leaf-{hub_anchor}"), 1.0 + i as f64, anchors))
            .unwrap();
        leaves.push((leaf, hub_anchor, leaf_anchor, angle));
    }
    for (leaf, hub_anchor, leaf_anchor, angle) in leaves.into_iter().rev() {
        graph
            .connect_named((hub, hub_anchor), (leaf, leaf_anchor), angle)
            .unwrap();
    }

    graph.resolve(hub, &ResolveConfig::default()).unwrap();
    let mut transforms: Vec<(String, Transform)> = graph
        .placements()
        .unwrap()
        .into_iter()
        .map(|p| (p.name.to_string(), p.transform))
        .collect();
    transforms.sort_by(|a, b| a.0.cmp(&b.0));
    transforms
}

#[test]
fn test_resolution_ignores_construction_order() {
    let reference = star([0, 1, 2]);
    assert_eq!(reference.len(), 4);
    for order in [[2, 1, 0], [1, 0, 2], [2, 0, 1]] {
        assert_eq!(star(order), reference);
    }
}

#[test]
fn test_unreachable_solids_stay_unplaced() {
    let (mut graph, one, two) = two_blocks();
    let loose = graph.add_solid(|anchors| Block::new("loose", 1.0, anchors)).unwrap();
    graph.connect_named((one, "top"), (two, "bottom"), 0.0).unwrap();

    let resolution = graph.resolve(one, &ResolveConfig::default()).unwrap();
    assert_eq!(resolution.placed, vec![one, two]);
    assert!(graph.world_transform(loose).unwrap().is_none());
    assert!(matches!(
        graph.placements(),
        Err(AnchorError::NotYetResolved { .. })
    ));
}
