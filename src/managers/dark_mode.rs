use crate::core::FrameInfo;
use crate::materials::BakedMaterial;
use crate::pipeline::FrameTickable;

use super::feedback::HoverFeedback;

/// What the surrounding UI shows for the current theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemePresentation {
    /// Dark styling applied to the on-screen controls
    pub dark_class: bool,
    /// Pressed state of the theme toggle
    pub toggle_pressed: bool,
}

/// Day/night theme state machine driving the baked lightmap blend
#[derive(Debug, Clone)]
pub struct DarkModeManager {
    is_dark: bool,
    baked: BakedMaterial,
    presentation: ThemePresentation,
    toggle_feedback: HoverFeedback,
}

impl DarkModeManager {
    /// Start from the host preference when known, else from `default_dark`
    pub fn new(baked: BakedMaterial, system_dark: Option<bool>, default_dark: bool) -> Self {
        let mut manager = Self {
            is_dark: system_dark.unwrap_or(default_dark),
            baked,
            presentation: ThemePresentation::default(),
            toggle_feedback: HoverFeedback::new(),
        };
        manager.update_theme();
        manager
    }

    pub fn toggle(&mut self) {
        self.is_dark = !self.is_dark;
        self.update_theme();
    }

    pub fn set_dark_mode(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
        self.update_theme();
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark
    }

    /// Host color-scheme preference changed
    pub fn on_system_theme(&mut self, is_dark: bool) {
        log::debug!("system theme changed, dark: {}", is_dark);
        self.set_dark_mode(is_dark);
    }

    /// Debug slider edit; may leave the blend between the two lightmaps
    pub fn set_night_mix(&mut self, value: f32) {
        self.baked.set_night_mix(value);
        self.is_dark = self.baked.night_mix() == 0.0;
        self.update_presentation();
    }

    pub fn night_mix(&self) -> f32 {
        self.baked.night_mix()
    }

    pub fn baked(&self) -> &BakedMaterial {
        &self.baked
    }

    pub fn presentation(&self) -> ThemePresentation {
        self.presentation
    }

    pub fn toggle_feedback(&self) -> &HoverFeedback {
        &self.toggle_feedback
    }

    pub fn toggle_feedback_mut(&mut self) -> &mut HoverFeedback {
        &mut self.toggle_feedback
    }

    fn update_theme(&mut self) {
        self.baked.set_night_mix(if self.is_dark { 0.0 } else { 1.0 });
        self.update_presentation();
    }

    fn update_presentation(&mut self) {
        self.presentation = ThemePresentation {
            dark_class: self.is_dark,
            toggle_pressed: self.is_dark,
        };
    }
}

impl FrameTickable for DarkModeManager {
    fn tick(&mut self, frame: &FrameInfo) {
        self.toggle_feedback.advance(frame.delta);
    }
}
