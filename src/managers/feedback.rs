use crate::core::{Animatable, Ease, FrameInfo, Tween, TweenHandle, TweenSet};
use crate::pipeline::FrameTickable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackChannel {
    Scale,
    Rotation,
}

/// Scale and rotation of an on-screen control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlTransform {
    pub scale: f32,
    pub rotation_deg: f32,
}

impl Default for ControlTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_deg: 0.0,
        }
    }
}

impl Animatable<FeedbackChannel> for ControlTransform {
    fn get(&self, key: FeedbackChannel) -> f32 {
        match key {
            FeedbackChannel::Scale => self.scale,
            FeedbackChannel::Rotation => self.rotation_deg,
        }
    }

    fn set(&mut self, key: FeedbackChannel, value: f32) {
        match key {
            FeedbackChannel::Scale => self.scale = value,
            FeedbackChannel::Rotation => self.rotation_deg = value,
        }
    }
}

/// Grow-and-tilt animation played while a control is hovered
#[derive(Debug, Clone, Default)]
pub struct HoverFeedback {
    transform: ControlTransform,
    tweens: TweenSet<FeedbackChannel>,
    running: Vec<TweenHandle>,
    hovered: bool,
}

impl HoverFeedback {
    pub const HOVER_SCALE: f32 = 1.5;
    pub const HOVER_ROTATION_DEG: f32 = -15.0;
    pub const DURATION: f32 = 0.5;
    const EASE: Ease = Ease::BackOut(2.0);

    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the control's hover flag each frame; edges start animations
    pub fn set_hovered(&mut self, hovered: bool) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        if hovered {
            self.animate_to(Self::HOVER_SCALE, Self::HOVER_ROTATION_DEG);
        } else {
            self.animate_to(1.0, 0.0);
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn advance(&mut self, delta: f32) {
        self.tweens.advance(delta, &mut self.transform);
        self.running.retain(|h| self.tweens.is_active(*h));
    }

    pub fn transform(&self) -> ControlTransform {
        self.transform
    }

    fn animate_to(&mut self, scale: f32, rotation_deg: f32) {
        for handle in self.running.drain(..) {
            self.tweens.kill(handle);
        }
        self.running.push(self.tweens.to(
            Tween::to(FeedbackChannel::Scale, scale, Self::DURATION).ease(Self::EASE),
        ));
        self.running.push(self.tweens.to(
            Tween::to(FeedbackChannel::Rotation, rotation_deg, Self::DURATION).ease(Self::EASE),
        ));
    }
}

impl FrameTickable for HoverFeedback {
    fn tick(&mut self, frame: &FrameInfo) {
        self.advance(frame.delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_then_settle() {
        let mut feedback = HoverFeedback::new();
        feedback.set_hovered(true);
        feedback.advance(0.25);
        assert!(feedback.transform().scale > 1.0);

        feedback.advance(0.5);
        assert_eq!(feedback.transform().scale, 1.5);
        assert_eq!(feedback.transform().rotation_deg, -15.0);
    }

    #[test]
    fn test_leave_returns_to_rest() {
        let mut feedback = HoverFeedback::new();
        feedback.set_hovered(true);
        feedback.advance(0.1);
        feedback.set_hovered(false);
        feedback.advance(1.0);
        assert_eq!(feedback.transform(), ControlTransform::default());
    }

    #[test]
    fn test_repeated_flag_does_not_restart() {
        let mut feedback = HoverFeedback::new();
        feedback.set_hovered(true);
        feedback.advance(0.5);
        feedback.set_hovered(true);
        feedback.advance(0.1);
        assert_eq!(feedback.transform().scale, 1.5);
    }
}
