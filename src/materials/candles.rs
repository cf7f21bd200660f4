use crate::core::FrameInfo;
use crate::pipeline::FrameTickable;

use super::flame::{Flame, FlameKnob, FlameParams};
use super::{Material, RenderState};

/// Candle flames; both faces visible
///
/// The intensity uniform starts below the panel default and only follows
/// the panel once the intensity knob is touched.
#[derive(Debug, Clone)]
pub struct CandlesMaterial {
    flame: Flame,
}

impl CandlesMaterial {
    pub const INITIAL_INTENSITY: f32 = 1.5;

    pub fn new(params: FlameParams) -> Self {
        let mut flame = Flame::new(params);
        flame.uniforms_mut().intensity = Self::INITIAL_INTENSITY;
        Self { flame }
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

impl Default for CandlesMaterial {
    fn default() -> Self {
        Self::new(FlameParams::candles())
    }
}

impl Material for CandlesMaterial {
    fn label(&self) -> &'static str {
        "candles"
    }

    fn render_state(&self) -> RenderState {
        RenderState::ADDITIVE.double_sided()
    }

    fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self.flame.uniforms())
    }
}

impl FrameTickable for CandlesMaterial {
    fn tick(&mut self, frame: &FrameInfo) {
        self.update_time(frame.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_intensity_differs_from_panel() {
        let candles = CandlesMaterial::default();
        assert_eq!(candles.flame().uniforms().intensity, 1.5);
        assert_eq!(candles.flame().params().intensity, 1.8);
        assert_eq!(candles.flame().uniforms().remap, [0.4, 0.26]);
    }

    #[test]
    fn test_other_knobs_leave_intensity_alone() {
        let mut candles = CandlesMaterial::default();
        candles.set(FlameKnob::TopIntensity(3.0));
        assert_eq!(candles.flame().uniforms().intensity, 1.5);

        candles.set(FlameKnob::Intensity(2.5));
        assert_eq!(candles.flame().uniforms().intensity, 2.5);
    }

    #[test]
    fn test_candles_are_double_sided() {
        let state = CandlesMaterial::default().render_state();
        assert!(state.double_sided);
        assert!(!state.depth_write);
    }
}
