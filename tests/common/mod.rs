#![allow(dead_code)]

use cozy_room::scene::{nodes, MeshPrimitive, NodeId, SceneGraph, SceneNode};
use glam::Vec3;

/// Axis-aligned box spanning `min`..`max`
pub fn cube(min: Vec3, max: Vec3) -> MeshPrimitive {
    let corners = [
        [min.x, min.y, min.z],
        [max.x, min.y, min.z],
        [max.x, max.y, min.z],
        [min.x, max.y, min.z],
        [min.x, min.y, max.z],
        [max.x, min.y, max.z],
        [max.x, max.y, max.z],
        [min.x, max.y, max.z],
    ];
    MeshPrimitive {
        positions: corners.to_vec(),
        uvs: vec![[0.0, 0.0]; 8],
        indices: vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7],
    }
}

pub fn mesh_node(name: &str, translation: Vec3) -> SceneNode {
    let mut node = SceneNode::new(name);
    node.translation = translation;
    node.primitives.push(cube(Vec3::splat(-0.5), Vec3::splat(0.5)));
    node
}

/// A graph carrying every node the room wires up, plus the optional player
///
/// The disc sits at the origin, the arm off to the side and the player
/// under both; everything else is stacked far away on +Y.
pub fn room_graph(with_player: bool) -> (SceneGraph, NodeId, NodeId) {
    let mut graph = SceneGraph::new();
    let scene = graph.add(SceneNode::new("Scene"), None);

    for (i, name) in nodes::REQUIRED.iter().enumerate() {
        if *name == nodes::VINYL_DISC || *name == nodes::VINYL_ARM {
            continue;
        }
        graph.add(mesh_node(name, Vec3::new(0.0, 20.0 + i as f32 * 2.0, 0.0)), Some(scene));
    }

    let disc = graph.add(mesh_node(nodes::VINYL_DISC, Vec3::ZERO), Some(scene));
    let arm = graph.add(mesh_node(nodes::VINYL_ARM, Vec3::new(3.0, 0.0, 0.0)), Some(scene));
    if with_player {
        graph.add(mesh_node(nodes::VINYL_PLAYER, Vec3::new(0.0, -2.0, 0.0)), Some(scene));
    }
    (graph, disc, arm)
}

/// Advance at 60 Hz for `seconds`, starting at `start`
pub fn frames(start: f32, seconds: f32) -> impl Iterator<Item = cozy_room::core::FrameInfo> {
    let step = 1.0 / 60.0;
    let count = (seconds / step).round() as u64;
    (1..=count).map(move |n| cozy_room::core::FrameInfo::new(n, start + n as f32 * step, step))
}
