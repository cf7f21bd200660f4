use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::Color;

/// Tunable flame look, as exposed in the debug panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlameParams {
    pub first_color: Color,
    pub second_color: Color,
    pub top_color: Color,
    pub top_intensity: f32,
    pub wavy_distortion: f32,
    pub rising_speed: f32,
    pub intensity: f32,
    pub remap_x: f32,
    pub remap_y: f32,
}

impl FlameParams {
    pub const FIRST_COLOR: Color = Color::new(1.0, 0.4, 0.0);
    pub const SECOND_COLOR: Color = Color::new(1.0, 123.0 / 255.0, 0.0);
    pub const TOP_COLOR: Color = Color::new(213.0 / 255.0, 201.0 / 255.0, 139.0 / 255.0);

    /// Fireplace defaults
    pub const fn fire() -> Self {
        Self {
            first_color: Self::FIRST_COLOR,
            second_color: Self::SECOND_COLOR,
            top_color: Self::TOP_COLOR,
            top_intensity: 1.5,
            wavy_distortion: 0.03,
            rising_speed: 0.15,
            intensity: 1.8,
            remap_x: 0.7,
            remap_y: 0.3,
        }
    }

    /// Candle defaults
    pub const fn candles() -> Self {
        Self {
            first_color: Self::FIRST_COLOR,
            second_color: Self::SECOND_COLOR,
            top_color: Self::TOP_COLOR,
            top_intensity: 1.5,
            wavy_distortion: 0.01,
            rising_speed: 0.15,
            intensity: 1.8,
            remap_x: 0.4,
            remap_y: 0.26,
        }
    }
}

/// One debug panel edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlameKnob {
    FirstColor(Color),
    SecondColor(Color),
    TopColor(Color),
    TopIntensity(f32),
    WavyDistortion(f32),
    RisingSpeed(f32),
    Intensity(f32),
    RemapX(f32),
    RemapY(f32),
}

/// Matches `FlameUniforms` in flame.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FlameUniforms {
    pub first_color: [f32; 3],
    pub time: f32,
    pub second_color: [f32; 3],
    pub top_intensity: f32,
    pub top_color: [f32; 3],
    pub wavy_distortion: f32,
    pub rising_speed: f32,
    pub intensity: f32,
    pub remap: [f32; 2],
}

impl FlameUniforms {
    pub fn from_params(params: &FlameParams) -> Self {
        Self {
            first_color: params.first_color.to_linear(),
            time: 0.0,
            second_color: params.second_color.to_linear(),
            top_intensity: params.top_intensity,
            top_color: params.top_color.to_linear(),
            wavy_distortion: params.wavy_distortion,
            rising_speed: params.rising_speed,
            intensity: params.intensity,
            remap: [params.remap_x, params.remap_y],
        }
    }
}

/// Shared state of the fire and candle materials
///
/// The panel copy of the parameters and the live uniforms are kept apart:
/// a knob writes both, but each uniform only changes when its own knob does.
#[derive(Debug, Clone)]
pub struct Flame {
    params: FlameParams,
    uniforms: FlameUniforms,
}

impl Flame {
    pub fn new(params: FlameParams) -> Self {
        Self {
            params,
            uniforms: FlameUniforms::from_params(&params),
        }
    }

    pub fn params(&self) -> &FlameParams {
        &self.params
    }

    pub fn uniforms(&self) -> &FlameUniforms {
        &self.uniforms
    }

    pub(super) fn uniforms_mut(&mut self) -> &mut FlameUniforms {
        &mut self.uniforms
    }

    pub fn update_time(&mut self, time: f32) {
        self.uniforms.time = time;
    }

    pub fn set(&mut self, knob: FlameKnob) {
        let (p, u) = (&mut self.params, &mut self.uniforms);
        match knob {
            FlameKnob::FirstColor(c) => {
                p.first_color = c;
                u.first_color = c.to_linear();
            }
            FlameKnob::SecondColor(c) => {
                p.second_color = c;
                u.second_color = c.to_linear();
            }
            FlameKnob::TopColor(c) => {
                p.top_color = c;
                u.top_color = c.to_linear();
            }
            FlameKnob::TopIntensity(v) => {
                p.top_intensity = v;
                u.top_intensity = v;
            }
            FlameKnob::WavyDistortion(v) => {
                p.wavy_distortion = v;
                u.wavy_distortion = v;
            }
            FlameKnob::RisingSpeed(v) => {
                p.rising_speed = v;
                u.rising_speed = v;
            }
            FlameKnob::Intensity(v) => {
                p.intensity = v;
                u.intensity = v;
            }
            FlameKnob::RemapX(v) => {
                p.remap_x = v;
                u.remap[0] = v;
            }
            FlameKnob::RemapY(v) => {
                p.remap_y = v;
                u.remap[1] = v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_block_is_four_vec4s() {
        assert_eq!(std::mem::size_of::<FlameUniforms>(), 64);
    }

    #[test]
    fn test_default_colors_match_hex() {
        assert_eq!(FlameParams::FIRST_COLOR.to_hex(), "#ff6600");
        assert_eq!(FlameParams::SECOND_COLOR.to_hex(), "#ff7b00");
        assert_eq!(FlameParams::TOP_COLOR.to_hex(), "#d5c98b");
    }

    #[test]
    fn test_knob_updates_only_its_uniform() {
        let mut flame = Flame::new(FlameParams::fire());
        flame.update_time(3.0);
        flame.set(FlameKnob::RemapY(0.9));

        assert_eq!(flame.uniforms().remap, [0.7, 0.9]);
        assert_eq!(flame.uniforms().time, 3.0);
        assert_eq!(flame.params().remap_y, 0.9);
        assert_eq!(flame.uniforms().intensity, 1.8);
    }
}
