use bytemuck::{Pod, Zeroable};

use crate::core::FrameInfo;
use crate::pipeline::FrameTickable;

use super::{Material, RenderState};

/// Matches `SmokeUniforms` in smoke.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SmokeUniforms {
    pub time: f32,
    pub _padding: [f32; 3],
}

/// Rising smoke above the coffee mug, shaped by the shared noise texture
#[derive(Debug, Clone)]
pub struct CoffeeSmokeMaterial {
    uniforms: SmokeUniforms,
}

impl CoffeeSmokeMaterial {
    pub fn new() -> Self {
        Self {
            uniforms: SmokeUniforms::zeroed(),
        }
    }

    pub fn update_time(&mut self, time: f32) {
        self.uniforms.time = time;
    }

    pub fn time(&self) -> f32 {
        self.uniforms.time
    }
}

impl Default for CoffeeSmokeMaterial {
    fn default() -> Self {
        Self::new()
    }
}

impl Material for CoffeeSmokeMaterial {
    fn label(&self) -> &'static str {
        "coffee-smoke"
    }

    fn render_state(&self) -> RenderState {
        RenderState::ADDITIVE.double_sided()
    }

    fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniforms)
    }
}

impl FrameTickable for CoffeeSmokeMaterial {
    fn tick(&mut self, frame: &FrameInfo) {
        self.update_time(frame.time);
    }
}
