//! Uniform-bearing materials.
//!
//! Each material owns a `bytemuck::Pod` parameter block laid out for its WGSL
//! shader. The renderer uploads [`Material::uniform_bytes`] every frame and
//! builds one pipeline per [`RenderState`].

mod baked;
mod candles;
mod coffee_smoke;
mod emissive;
mod fire;
mod flame;

pub use baked::{BakedMaterial, BakedUniforms};
pub use candles::CandlesMaterial;
pub use coffee_smoke::{CoffeeSmokeMaterial, SmokeUniforms};
pub use emissive::{EmissiveMaterial, EmissiveUniforms};
pub use fire::FireMaterial;
pub use flame::{Flame, FlameKnob, FlameParams, FlameUniforms};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Opaque,
    Additive,
}

/// Fixed-function state a material draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderState {
    pub blend: BlendMode,
    pub double_sided: bool,
    pub depth_write: bool,
}

impl RenderState {
    pub const OPAQUE: RenderState = RenderState {
        blend: BlendMode::Opaque,
        double_sided: false,
        depth_write: true,
    };

    pub const ADDITIVE: RenderState = RenderState {
        blend: BlendMode::Additive,
        double_sided: false,
        depth_write: false,
    };

    pub const fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

pub trait Material {
    fn label(&self) -> &'static str;

    fn render_state(&self) -> RenderState;

    /// Uniform block as uploaded to the GPU
    fn uniform_bytes(&self) -> &[u8];
}
