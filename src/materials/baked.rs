use bytemuck::{Pod, Zeroable};

use super::{Material, RenderState};

/// Matches `BakedUniforms` in baked.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BakedUniforms {
    /// 0 shows the night lightmap, 1 the day lightmap
    pub night_mix: f32,
    pub _padding: [f32; 3],
}

/// Baked lighting blended between day and night lightmaps
#[derive(Debug, Clone)]
pub struct BakedMaterial {
    uniforms: BakedUniforms,
}

impl BakedMaterial {
    pub fn new(night_mix: f32) -> Self {
        Self {
            uniforms: BakedUniforms {
                night_mix: night_mix.clamp(0.0, 1.0),
                _padding: [0.0; 3],
            },
        }
    }

    pub fn night_mix(&self) -> f32 {
        self.uniforms.night_mix
    }

    pub fn set_night_mix(&mut self, value: f32) {
        self.uniforms.night_mix = value.clamp(0.0, 1.0);
    }
}

impl Default for BakedMaterial {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Material for BakedMaterial {
    fn label(&self) -> &'static str {
        "baked"
    }

    fn render_state(&self) -> RenderState {
        RenderState::OPAQUE
    }

    fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_mix_is_clamped() {
        let mut baked = BakedMaterial::default();
        assert_eq!(baked.night_mix(), 1.0);
        baked.set_night_mix(-2.0);
        assert_eq!(baked.night_mix(), 0.0);
        baked.set_night_mix(0.35);
        assert_eq!(baked.night_mix(), 0.35);
    }
}
