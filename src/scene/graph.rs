use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::math::AABB;

use super::nodes::{NodeId, NodeLookup};

/// Triangle geometry of one glTF primitive, in node-local space
#[derive(Debug, Clone, Default)]
pub struct MeshPrimitive {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshPrimitive {
    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(self.positions.iter().map(|&p| Vec3::from(p)))
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// One node of the imported scene with its local transform
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub primitives: Vec<MeshPrimitive>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            primitives: Vec::new(),
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Union of the node's own primitive bounds
    pub fn local_bounds(&self) -> Option<AABB> {
        self.primitives
            .iter()
            .filter_map(MeshPrimitive::bounds)
            .reduce(|a, b| a.union(&b))
    }

    pub fn has_mesh(&self) -> bool {
        !self.primitives.is_empty()
    }
}

/// Flat node graph; parents always precede their children
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root_transform: Mat4,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root_transform: Mat4::IDENTITY,
        }
    }

    /// Append a node under `parent`
    pub fn add(&mut self, mut node: SceneNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p.0)) {
            parent.children.push(id);
        }
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.has_mesh()).count()
    }

    /// Uniform scale and offset applied above every node
    pub fn set_root_transform(&mut self, scale: f32, translation: Vec3) {
        self.root_transform = Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::IDENTITY,
            translation,
        );
    }

    pub fn root_transform(&self) -> Mat4 {
        self.root_transform
    }

    /// Node rotation as XYZ Euler angles
    pub fn euler(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(|n| {
            let (x, y, z) = n.rotation.to_euler(EulerRot::XYZ);
            Vec3::new(x, y, z)
        })
    }

    /// Set the rotation from XYZ Euler angles
    pub fn set_euler(&mut self, id: NodeId, euler: Vec3) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
        }
    }

    /// World matrix of every node, indexed by node id
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut world: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent = node
                .parent
                .and_then(|p| world.get(p.0).copied())
                .unwrap_or(self.root_transform);
            world.push(parent * node.local_matrix());
        }
        world
    }

    /// `id` followed by every node below it
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.node(next) {
                out.push(next);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// World-space bounds of a node and everything below it
    pub fn world_bounds(&self, id: NodeId, world: &[Mat4]) -> Option<AABB> {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| {
                let local = self.node(d)?.local_bounds()?;
                Some(local.transformed(world.get(d.0)?))
            })
            .reduce(|a, b| a.union(&b))
    }
}

impl NodeLookup for SceneGraph {
    fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(NodeId)
    }

    fn name_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cube() -> MeshPrimitive {
        MeshPrimitive {
            positions: vec![[-1.0, -1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
            uvs: vec![[0.0, 0.0]; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_add_links_parent_and_child() {
        let mut graph = SceneGraph::new();
        let root = graph.add(SceneNode::new("root"), None);
        let child = graph.add(SceneNode::new("child"), Some(root));

        assert_eq!(graph.node(child).unwrap().parent, Some(root));
        assert_eq!(graph.node(root).unwrap().children, vec![child]);
        assert_eq!(graph.find("child"), Some(child));
        assert_eq!(graph.find("missing"), None);
    }

    #[test]
    fn test_world_matrices_include_root_transform() {
        let mut graph = SceneGraph::new();
        let mut node = SceneNode::new("box");
        node.translation = Vec3::new(5.0, 0.0, 0.0);
        let id = graph.add(node, None);
        graph.set_root_transform(0.2, Vec3::new(0.0, -0.5, 0.0));

        let world = graph.world_matrices();
        let p = world[id.0].transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, -0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_world_bounds_cover_descendants() {
        let mut graph = SceneGraph::new();
        let parent = graph.add(SceneNode::new("player"), None);
        let mut arm = SceneNode::new("arm");
        arm.translation = Vec3::new(10.0, 0.0, 0.0);
        arm.primitives.push(unit_cube());
        graph.add(arm, Some(parent));

        let world = graph.world_matrices();
        let bounds = graph.world_bounds(parent, &world).unwrap();
        assert_eq!(bounds.min, Vec3::new(9.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn test_set_euler_round_trips_small_angles() {
        let mut graph = SceneGraph::new();
        let id = graph.add(SceneNode::new("disc"), None);

        graph.set_euler(id, Vec3::new(0.1, 0.5, 0.3));
        let euler = graph.euler(id).unwrap();
        assert!((euler.x - 0.1).abs() < 1e-4);
        assert!((euler.y - 0.5).abs() < 1e-4);
        assert!((euler.z - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_set_euler_past_quarter_turn() {
        let mut graph = SceneGraph::new();
        let id = graph.add(SceneNode::new("disc"), None);

        for step in 0..=40 {
            let y = step as f32 * std::f32::consts::TAU / 40.0;
            graph.set_euler(id, Vec3::new(0.0, y, 0.0));
            let rotation = graph.node(id).unwrap().rotation;
            let error = rotation.angle_between(Quat::from_rotation_y(y));
            assert!(error < 1e-3, "y {} off by {} rad", y, error);
        }
    }
}
