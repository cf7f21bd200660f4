use crate::core::FrameInfo;
use crate::pipeline::FrameTickable;

use super::flame::{Flame, FlameKnob, FlameParams};
use super::{Material, RenderState};

/// Fireplace flame, drawn additively over the baked scene
#[derive(Debug, Clone)]
pub struct FireMaterial {
    flame: Flame,
}

impl FireMaterial {
    pub fn new(params: FlameParams) -> Self {
        Self {
            flame: Flame::new(params),
        }
    }

    pub fn update_time(&mut self, time: f32) {
        self.flame.update_time(time);
    }

    pub fn set(&mut self, knob: FlameKnob) {
        self.flame.set(knob);
    }

    pub fn flame(&self) -> &Flame {
        &self.flame
    }
}

impl Default for FireMaterial {
    fn default() -> Self {
        Self::new(FlameParams::fire())
    }
}

impl Material for FireMaterial {
    fn label(&self) -> &'static str {
        "fire"
    }

    fn render_state(&self) -> RenderState {
        RenderState::ADDITIVE
    }

    fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self.flame.uniforms())
    }
}

impl FrameTickable for FireMaterial {
    fn tick(&mut self, frame: &FrameInfo) {
        self.update_time(frame.time);
    }
}
