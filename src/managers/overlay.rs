use bytemuck::{Pod, Zeroable};

use crate::core::{Animatable, Countdown, Ease, FrameInfo, Tween, TweenSet};
use crate::pipeline::FrameTickable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayChannel {
    Alpha,
    BarCollapse,
}

/// Animated values of the loading screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLook {
    /// Opacity of the full-screen black quad
    pub alpha: f32,
    /// 1 while the loading bar is visible, 0 once it has collapsed
    pub bar_visibility: f32,
}

impl Animatable<OverlayChannel> for OverlayLook {
    fn get(&self, key: OverlayChannel) -> f32 {
        match key {
            OverlayChannel::Alpha => self.alpha,
            OverlayChannel::BarCollapse => self.bar_visibility,
        }
    }

    fn set(&mut self, key: OverlayChannel, value: f32) {
        match key {
            OverlayChannel::Alpha => self.alpha = value,
            OverlayChannel::BarCollapse => self.bar_visibility = value,
        }
    }
}

/// Matches `OverlayUniforms` in overlay.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct OverlayUniforms {
    pub alpha: f32,
    pub _padding: [f32; 3],
}

/// Loading screen: progress bar plus a black quad that fades out on completion
#[derive(Debug, Clone)]
pub struct OverlayManager {
    progress: Option<f32>,
    look: OverlayLook,
    tweens: TweenSet<OverlayChannel>,
    reveal: Countdown,
    completed: bool,
    bar_ended: bool,
    panel_visible: bool,
    fade_starts: u32,
}

impl OverlayManager {
    pub const REVEAL_DELAY: f32 = 0.5;
    pub const FADE_DELAY: f32 = 1.0;
    pub const FADE_SECONDS: f32 = 3.0;
    pub const BAR_COLLAPSE_SECONDS: f32 = 1.5;

    pub fn new() -> Self {
        Self {
            progress: Some(0.0),
            look: OverlayLook {
                alpha: 1.0,
                bar_visibility: 1.0,
            },
            tweens: TweenSet::new(),
            reveal: Countdown::new(Self::REVEAL_DELAY),
            completed: false,
            bar_ended: false,
            panel_visible: false,
            fade_starts: 0,
        }
    }

    /// Loading bar fill; the caller guarantees `total > 0`
    pub fn on_progress(&mut self, loaded: usize, total: usize) {
        let ratio = loaded as f32 / total as f32;
        log::debug!("loading {}/{} ({:.0}%)", loaded, total, ratio * 100.0);
        self.progress = Some(ratio);
    }

    /// Schedule the reveal; only the first call per load has an effect
    pub fn on_load_complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        self.reveal.start();
        true
    }

    pub fn advance(&mut self, delta: f32) {
        if self.reveal.tick(delta) {
            self.panel_visible = true;
            self.tweens.to(
                Tween::to(OverlayChannel::Alpha, 0.0, Self::FADE_SECONDS).delay(Self::FADE_DELAY),
            );
            self.tweens.to(
                Tween::to(OverlayChannel::BarCollapse, 0.0, Self::BAR_COLLAPSE_SECONDS)
                    .ease(Ease::Power2InOut),
            );
            self.fade_starts += 1;
            self.bar_ended = true;
            self.progress = None;
        }
        self.tweens.advance(delta, &mut self.look);
    }

    /// Loading bar scale, `None` once the progress transform was cleared
    pub fn progress(&self) -> Option<f32> {
        self.progress
    }

    pub fn alpha(&self) -> f32 {
        self.look.alpha
    }

    pub fn look(&self) -> OverlayLook {
        self.look
    }

    pub fn is_bar_ended(&self) -> bool {
        self.bar_ended
    }

    /// The debug panel stays hidden until the reveal
    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn fade_starts(&self) -> u32 {
        self.fade_starts
    }

    /// Nothing left to draw
    pub fn is_finished(&self) -> bool {
        self.bar_ended && self.look.alpha <= 0.0 && self.tweens.active_count() == 0
    }

    pub fn uniforms(&self) -> OverlayUniforms {
        OverlayUniforms {
            alpha: self.look.alpha,
            _padding: [0.0; 3],
        }
    }
}

impl Default for OverlayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTickable for OverlayManager {
    fn tick(&mut self, frame: &FrameInfo) {
        self.advance(frame.delta);
    }
}
