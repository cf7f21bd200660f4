//! Debug/tuning panel, the two on-screen toggles and the loading bar.

use egui::{Color32, FontId};

use crate::managers::{
    ControlTransform, DarkModeManager, HoverFeedback, OverlayManager, PostProcessingManager,
};
use crate::materials::{CandlesMaterial, EmissiveMaterial, FireMaterial, FlameKnob, FlameParams};
use crate::math::Color;
use crate::particles::FireParticles;

/// Everything the panel and the controls read or edit this frame
pub struct PanelModel<'a> {
    /// Debug panel allowed at all (`--no-ui` clears it)
    pub show_debug: bool,
    pub overlay: &'a OverlayManager,
    pub lamp: &'a mut EmissiveMaterial,
    pub fire: &'a mut FireMaterial,
    pub candles: &'a mut CandlesMaterial,
    pub fire_particles: &'a mut FireParticles,
    pub dark_mode: &'a mut DarkModeManager,
    pub sound_feedback: &'a mut HoverFeedback,
    pub is_playing: bool,
    pub post: &'a mut PostProcessingManager,
    pub clear_color: &'a mut Color,
}

/// Toggle clicks collected while drawing, applied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelActions {
    pub toggle_theme: bool,
    pub toggle_sound: bool,
}

struct FlameLimits {
    intensity: f32,
    rising_speed: f32,
    remap_step: f64,
}

const FIRE_LIMITS: FlameLimits = FlameLimits {
    intensity: 10.0,
    rising_speed: 1.0,
    remap_step: 0.1,
};

const CANDLE_LIMITS: FlameLimits = FlameLimits {
    intensity: 5.0,
    rising_speed: 0.5,
    remap_step: 0.01,
};

const CONTROL_SIZE: f32 = 48.0;

pub fn draw(ctx: &egui::Context, model: &mut PanelModel) -> PanelActions {
    draw_loading_bar(ctx, model.overlay);
    let actions = draw_controls(ctx, model);

    if model.show_debug && model.overlay.is_panel_visible() {
        draw_debug_panel(ctx, model);
    }
    actions
}

fn draw_loading_bar(ctx: &egui::Context, overlay: &OverlayManager) {
    let screen = ctx.screen_rect();
    let look = overlay.look();
    let (left, width) = if overlay.is_bar_ended() {
        // Collapses toward the right edge
        let width = screen.width() * look.bar_visibility;
        (screen.right() - width, width)
    } else {
        match overlay.progress() {
            Some(progress) => (screen.left(), screen.width() * progress),
            None => return,
        }
    };
    if width <= 0.0 {
        return;
    }

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("loading-bar"),
    ));
    let rect = egui::Rect::from_min_size(
        egui::pos2(left, screen.center().y - 1.0),
        egui::vec2(width, 2.0),
    );
    painter.rect_filled(rect, 0.0, Color32::WHITE);
}

fn draw_controls(ctx: &egui::Context, model: &mut PanelModel) -> PanelActions {
    let mut actions = PanelActions::default();
    let dark = model.dark_mode.presentation();

    egui::Area::new(egui::Id::new("toggles"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -24.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let icon = if dark.toggle_pressed { "🌙" } else { "☀" };
                let theme = feedback_button(
                    ui,
                    icon,
                    dark.dark_class,
                    dark.toggle_pressed,
                    model.dark_mode.toggle_feedback().transform(),
                );
                model.dark_mode.toggle_feedback_mut().set_hovered(theme.hovered());
                actions.toggle_theme = theme.clicked();

                let icon = if model.is_playing { "🎵" } else { "🔇" };
                let sound = feedback_button(
                    ui,
                    icon,
                    dark.dark_class,
                    model.is_playing,
                    model.sound_feedback.transform(),
                );
                model.sound_feedback.set_hovered(sound.hovered());
                actions.toggle_sound = sound.clicked();
            });
        });

    actions
}

fn feedback_button(
    ui: &mut egui::Ui,
    icon: &str,
    dark_style: bool,
    pressed: bool,
    transform: ControlTransform,
) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(CONTROL_SIZE, CONTROL_SIZE), egui::Sense::click());
    let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);

    let (fill, ink) = match (dark_style, pressed) {
        (true, _) => (Color32::from_rgb(38, 38, 64), Color32::from_rgb(244, 243, 215)),
        (false, true) => (Color32::from_rgb(213, 201, 139), Color32::from_rgb(20, 20, 30)),
        (false, false) => (Color32::from_rgb(244, 243, 215), Color32::from_rgb(20, 20, 30)),
    };

    let painter = ui.painter();
    painter.circle_filled(rect.center(), CONTROL_SIZE * 0.4 * transform.scale, fill);

    let galley = painter.layout_no_wrap(
        icon.to_string(),
        FontId::proportional(20.0 * transform.scale),
        ink,
    );
    let angle = transform.rotation_deg.to_radians();
    // Text rotates about its top-left corner; offset so it spins in place
    let pos = rect.center() - egui::emath::Rot2::from_angle(angle) * (galley.size() / 2.0);
    painter.add(egui::epaint::TextShape::new(pos, galley, ink).with_angle(angle));

    response
}

fn draw_debug_panel(ctx: &egui::Context, model: &mut PanelModel) {
    egui::Window::new("Debug")
        .default_pos(egui::pos2(12.0, 12.0))
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            egui::CollapsingHeader::new("Lamp & Fairy emissions").show(ui, |ui| {
                if let Some(color) = color_row(ui, "Color", model.lamp.color()) {
                    model.lamp.set_color(color);
                }
            });

            for knob in flame_folder(ui, "Fire", model.fire.flame().params(), &FIRE_LIMITS) {
                model.fire.set(knob);
            }
            let candles = model.candles.flame().params();
            for knob in flame_folder(ui, "Candles", candles, &CANDLE_LIMITS) {
                model.candles.set(knob);
            }

            egui::CollapsingHeader::new("Fire Particles").show(ui, |ui| {
                let mut params = model.fire_particles.params();
                let mut changed = false;
                changed |= slider(ui, "Size", &mut params.size, 0.0..=200.0, 1.0);
                changed |= slider(ui, "Rising Speed", &mut params.rise_speed, 0.0..=2.0, 0.01);
                changed |= slider(ui, "Rising Height", &mut params.rise_height, 0.0..=2.0, 0.01);
                changed |= slider(ui, "Random Seed", &mut params.random_seed, 0.0..=200.0, 1.0);
                changed |= slider(ui, "Turbulence X", &mut params.turbulence_x, 0.0..=2.0, 0.01);
                changed |= slider(ui, "Turbulence Z", &mut params.turbulence_z, 0.0..=2.0, 0.01);
                if changed {
                    model.fire_particles.set_params(params);
                }
            });

            egui::CollapsingHeader::new("Theme").show(ui, |ui| {
                let mut mix = model.dark_mode.night_mix();
                if slider(ui, "Night Mix", &mut mix, 0.0..=1.0, 0.01) {
                    model.dark_mode.set_night_mix(mix);
                }
            });

            post_folder(ui, model.post);

            if let Some(color) = color_row(ui, "Clear Color", *model.clear_color) {
                *model.clear_color = color;
            }
        });
}

fn flame_folder(
    ui: &mut egui::Ui,
    title: &str,
    params: &FlameParams,
    limits: &FlameLimits,
) -> Vec<FlameKnob> {
    let mut knobs = Vec::new();
    let mut p = *params;

    egui::CollapsingHeader::new(title).show(ui, |ui| {
        if let Some(color) = color_row(ui, "First Color", p.first_color) {
            knobs.push(FlameKnob::FirstColor(color));
        }
        if let Some(color) = color_row(ui, "Second Color", p.second_color) {
            knobs.push(FlameKnob::SecondColor(color));
        }
        if let Some(color) = color_row(ui, "Top Color", p.top_color) {
            knobs.push(FlameKnob::TopColor(color));
        }
        if slider(ui, "Top Intensity", &mut p.top_intensity, 0.0..=10.0, 0.1) {
            knobs.push(FlameKnob::TopIntensity(p.top_intensity));
        }
        if slider(ui, "Wavy Distortion", &mut p.wavy_distortion, 0.0..=0.5, 0.01) {
            knobs.push(FlameKnob::WavyDistortion(p.wavy_distortion));
        }
        if slider(ui, "Rising Speed", &mut p.rising_speed, 0.0..=limits.rising_speed, 0.01) {
            knobs.push(FlameKnob::RisingSpeed(p.rising_speed));
        }
        if slider(ui, "Intensity", &mut p.intensity, 0.0..=limits.intensity, 0.1) {
            knobs.push(FlameKnob::Intensity(p.intensity));
        }
        if slider(ui, "Remap X", &mut p.remap_x, 0.0..=1.0, limits.remap_step) {
            knobs.push(FlameKnob::RemapX(p.remap_x));
        }
        if slider(ui, "Remap Y", &mut p.remap_y, 0.0..=1.0, limits.remap_step) {
            knobs.push(FlameKnob::RemapY(p.remap_y));
        }
    });

    knobs
}

fn post_folder(ui: &mut egui::Ui, post: &mut PostProcessingManager) {
    egui::CollapsingHeader::new("Post Processing").show(ui, |ui| {
        let mut enabled = post.is_enabled();
        if ui.checkbox(&mut enabled, "Enabled").changed() {
            post.set_enabled(enabled);
        }

        if let Some(slot) = post.pass_mut(PostProcessingManager::BLOOM) {
            ui.checkbox(&mut slot.enabled, "Bloom");
        }
        if let Some(bloom) = post.bloom_mut() {
            slider(ui, "Strength", &mut bloom.strength, 0.0..=3.0, 0.01);
            slider(ui, "Radius", &mut bloom.radius, 0.0..=2.0, 0.01);
            slider(ui, "Threshold", &mut bloom.threshold, 0.0..=1.0, 0.01);
        }

        if let Some(slot) = post.pass_mut(PostProcessingManager::GAMMA) {
            ui.checkbox(&mut slot.enabled, "Gamma Correction");
        }

        ui.label(format!("Pass Count: {}", post.pass_count()));
    });
}

fn slider(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut f32,
    range: std::ops::RangeInclusive<f32>,
    step: f64,
) -> bool {
    ui.add(egui::Slider::new(value, range).step_by(step).text(label))
        .changed()
}

fn color_row(ui: &mut egui::Ui, label: &str, color: Color) -> Option<Color> {
    let mut rgb = to_srgb8(color);
    let changed = ui
        .horizontal(|ui| {
            ui.label(label);
            ui.color_edit_button_srgb(&mut rgb).changed()
        })
        .inner;
    changed.then(|| from_srgb8(rgb))
}

fn to_srgb8(color: Color) -> [u8; 3] {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [byte(color.r), byte(color.g), byte(color.b)]
}

fn from_srgb8(rgb: [u8; 3]) -> Color {
    Color::new(
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb8_round_trip_matches_hex() {
        let lamp = EmissiveMaterial::LAMP_COLOR;
        assert_eq!(to_srgb8(lamp), [244, 243, 215]);
        assert_eq!(from_srgb8(to_srgb8(lamp)).to_hex(), lamp.to_hex());
    }

    #[test]
    fn test_candle_limits_are_tighter_than_fire() {
        assert!(CANDLE_LIMITS.intensity < FIRE_LIMITS.intensity);
        assert!(CANDLE_LIMITS.rising_speed < FIRE_LIMITS.rising_speed);
    }
}
