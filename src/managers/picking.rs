use glam::Mat4;

use crate::core::Countdown;
use crate::math::{Ray, AABB};
use crate::scene::{NodeId, SceneGraph};

/// A pickable mesh and its current world bounds
#[derive(Debug, Clone, PartialEq)]
pub struct PickTarget {
    pub node: NodeId,
    pub name: String,
    pub bounds: AABB,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub node: NodeId,
    pub distance: f32,
}

/// Ray caster over the interactive object set
#[derive(Debug, Clone, Default)]
pub struct Picker {
    targets: Vec<PickTarget>,
}

impl Picker {
    pub fn new(targets: Vec<PickTarget>) -> Self {
        Self { targets }
    }

    /// One target per mesh at or below each interactive root
    pub fn from_graph(graph: &SceneGraph, roots: &[NodeId], world: &[Mat4]) -> Self {
        let mut targets = Vec::new();
        for &root in roots {
            for id in graph.descendants(root) {
                let Some(node) = graph.node(id) else { continue };
                let Some(local) = node.local_bounds() else { continue };
                let Some(matrix) = world.get(id.0) else { continue };
                targets.push(PickTarget {
                    node: id,
                    name: node.name.clone(),
                    bounds: local.transformed(matrix),
                });
            }
        }
        Self { targets }
    }

    /// Move target bounds to the nodes' current world transforms
    pub fn refresh(&mut self, graph: &SceneGraph, world: &[Mat4]) {
        for target in &mut self.targets {
            let local = graph.node(target.node).and_then(|node| node.local_bounds());
            if let (Some(local), Some(matrix)) = (local, world.get(target.node.0)) {
                target.bounds = local.transformed(matrix);
            }
        }
    }

    pub fn targets(&self) -> &[PickTarget] {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Nearest target along the ray
    pub fn pick(&self, ray: &Ray) -> Option<PickHit> {
        self.targets
            .iter()
            .filter_map(|t| {
                ray.hit_distance(&t.bounds).map(|distance| PickHit {
                    node: t.node,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    pub fn name_of(&self, node: NodeId) -> Option<&str> {
        self.targets
            .iter()
            .find(|t| t.node == node)
            .map(|t| t.name.as_str())
    }
}

/// Change in hover between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTransition {
    None,
    Entered,
    Left,
}

/// The currently intersected object, recomputed each frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverState {
    hovered: Option<NodeId>,
}

impl HoverState {
    pub fn update(&mut self, hit: Option<NodeId>) -> HoverTransition {
        let transition = match (self.hovered.is_some(), hit.is_some()) {
            (false, true) => HoverTransition::Entered,
            (true, false) => HoverTransition::Left,
            _ => HoverTransition::None,
        };
        self.hovered = hit;
        transition
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn is_hovering(&self) -> bool {
        self.hovered.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    Default,
    Pointer,
}

/// Pointer cursor: shown while hovering and briefly after a click
#[derive(Debug, Clone, Copy)]
pub struct CursorState {
    flash: Countdown,
    hovering: bool,
}

impl CursorState {
    pub const FLASH_SECONDS: f32 = 0.3;

    pub fn new() -> Self {
        Self {
            flash: Countdown::new(Self::FLASH_SECONDS),
            hovering: false,
        }
    }

    pub fn flash(&mut self) {
        self.flash.start();
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn tick(&mut self, delta: f32) {
        self.flash.tick(delta);
    }

    pub fn icon(&self) -> CursorIcon {
        if self.hovering || self.flash.is_active() {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        }
    }
}

impl Default for CursorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn target(id: usize, z: f32) -> PickTarget {
        PickTarget {
            node: NodeId(id),
            name: format!("node-{id}"),
            bounds: AABB::new(Vec3::new(-1.0, -1.0, z - 0.5), Vec3::new(1.0, 1.0, z + 0.5)),
        }
    }

    #[test]
    fn test_pick_returns_nearest() {
        let picker = Picker::new(vec![target(1, -10.0), target(2, -5.0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = picker.pick(&ray).unwrap();
        assert_eq!(hit.node, NodeId(2));
        assert!((hit.distance - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_empty_picker_never_hits() {
        let picker = Picker::default();
        assert!(picker.pick(&Ray::new(Vec3::ZERO, Vec3::NEG_Z)).is_none());
    }

    #[test]
    fn test_hover_transitions() {
        let mut hover = HoverState::default();
        assert_eq!(hover.update(None), HoverTransition::None);
        assert_eq!(hover.update(Some(NodeId(1))), HoverTransition::Entered);
        assert_eq!(hover.update(Some(NodeId(2))), HoverTransition::None);
        assert_eq!(hover.hovered(), Some(NodeId(2)));
        assert_eq!(hover.update(None), HoverTransition::Left);
        assert!(!hover.is_hovering());
    }

    #[test]
    fn test_cursor_flash_expires() {
        let mut cursor = CursorState::new();
        cursor.flash();
        assert_eq!(cursor.icon(), CursorIcon::Pointer);
        cursor.tick(0.2);
        assert_eq!(cursor.icon(), CursorIcon::Pointer);
        cursor.tick(0.15);
        assert_eq!(cursor.icon(), CursorIcon::Default);
    }

    #[test]
    fn test_cursor_stays_pointer_while_hovering() {
        let mut cursor = CursorState::new();
        cursor.set_hovering(true);
        cursor.flash();
        cursor.tick(1.0);
        assert_eq!(cursor.icon(), CursorIcon::Pointer);
    }
}
