//! Per-frame driver.
//!
//! One redraw runs the [`Stage`]s in [`Stage::ORDER`]. The pipeline owns the
//! clock, the current pick ray and the hover state; everything else is reached
//! through a [`FrameHost`], so the whole cycle runs without a window.

use glam::Vec2;

use crate::core::{FrameInfo, TimeSource};
use crate::managers::picking::{HoverState, HoverTransition};
use crate::math::Ray;
use crate::scene::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ReadClock,
    TickComponents,
    CastPickRay,
    UpdateHover,
    UpdateControls,
    Render,
}

impl Stage {
    pub const ORDER: [Stage; 6] = [
        Stage::ReadClock,
        Stage::TickComponents,
        Stage::CastPickRay,
        Stage::UpdateHover,
        Stage::UpdateControls,
        Stage::Render,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::ReadClock => "read-clock",
            Stage::TickComponents => "tick-components",
            Stage::CastPickRay => "cast-pick-ray",
            Stage::UpdateHover => "update-hover",
            Stage::UpdateControls => "update-controls",
            Stage::Render => "render",
        }
    }
}

/// Anything driven by elapsed scene time
pub trait FrameTickable {
    fn tick(&mut self, frame: &FrameInfo);
}

/// The world a frame runs against
pub trait FrameHost {
    /// Call `f` once for every time-driven component
    fn for_each_tickable(&mut self, f: &mut dyn FnMut(&mut dyn FrameTickable));

    /// Last known pointer position in normalized device coordinates
    fn pointer_ndc(&self) -> Option<Vec2>;

    /// Ray from the camera through `ndc`
    fn camera_ray(&self, ndc: Vec2) -> Ray;

    /// Nearest interactive object along the ray
    fn pick(&self, ray: &Ray) -> Option<NodeId>;

    fn on_hover(&mut self, transition: HoverTransition, hovered: Option<NodeId>);

    fn update_controls(&mut self, delta: f32);

    fn render(&mut self, frame: &FrameInfo);
}

pub struct FramePipeline {
    clock: Box<dyn TimeSource>,
    frame: FrameInfo,
    ray: Option<Ray>,
    hover: HoverState,
}

impl FramePipeline {
    pub fn new(clock: Box<dyn TimeSource>) -> Self {
        let time = clock.elapsed();
        Self {
            clock,
            frame: FrameInfo::new(0, time, 0.0),
            ray: None,
            hover: HoverState::default(),
        }
    }

    /// Run every stage in order
    pub fn run_frame(&mut self, host: &mut dyn FrameHost) -> FrameInfo {
        for stage in Stage::ORDER {
            self.run_stage(stage, host);
        }
        self.frame
    }

    pub fn run_stage(&mut self, stage: Stage, host: &mut dyn FrameHost) {
        match stage {
            Stage::ReadClock => {
                self.frame = self.frame.next(self.clock.elapsed());
            }
            Stage::TickComponents => {
                let frame = self.frame;
                host.for_each_tickable(&mut |component| component.tick(&frame));
            }
            Stage::CastPickRay => {
                self.ray = host.pointer_ndc().map(|ndc| host.camera_ray(ndc));
            }
            Stage::UpdateHover => {
                let hit = self.ray.as_ref().and_then(|ray| host.pick(ray));
                let transition = self.hover.update(hit);
                host.on_hover(transition, self.hover.hovered());
            }
            Stage::UpdateControls => host.update_controls(self.frame.delta),
            Stage::Render => host.render(&self.frame),
        }
    }

    pub fn frame(&self) -> FrameInfo {
        self.frame
    }

    pub fn ray(&self) -> Option<&Ray> {
        self.ray.as_ref()
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hover.hovered()
    }
}
