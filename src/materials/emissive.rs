use bytemuck::{Pod, Zeroable};

use crate::math::Color;

use super::{Material, RenderState};

/// Matches `EmissiveUniforms` in emissive.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct EmissiveUniforms {
    pub color: [f32; 3],
    pub _padding: f32,
}

/// Flat unlit color: lamp bulbs, fairy lights, candle wicks
#[derive(Debug, Clone)]
pub struct EmissiveMaterial {
    label: &'static str,
    color: Color,
    uniforms: EmissiveUniforms,
}

impl EmissiveMaterial {
    pub const LAMP_COLOR: Color = Color::new(244.0 / 255.0, 243.0 / 255.0, 215.0 / 255.0);

    pub fn new(label: &'static str, color: Color) -> Self {
        Self {
            label,
            color,
            uniforms: EmissiveUniforms {
                color: color.to_linear(),
                _padding: 0.0,
            },
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.uniforms.color = color.to_linear();
    }
}

impl Material for EmissiveMaterial {
    fn label(&self) -> &'static str {
        self.label
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
    fn test_lamp_color_hex() {
        assert_eq!(EmissiveMaterial::LAMP_COLOR.to_hex(), "#f4f3d7");
    }

    #[test]
    fn test_set_color_updates_uniform() {
        let mut lamp = EmissiveMaterial::new("lamp", EmissiveMaterial::LAMP_COLOR);
        lamp.set_color(Color::BLACK);
        assert_eq!(lamp.uniforms.color, [0.0; 3]);
        assert_eq!(lamp.color(), Color::BLACK);
    }
}
