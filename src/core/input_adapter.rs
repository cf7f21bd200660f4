use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::controller::{Button, Controller};
use super::window::WindowDimensions;

/// Maximum pointer travel in pixels between press and release for a click
pub const CLICK_SLOP: f32 = 5.0;

/// Pixels of trackpad scroll that count as one wheel line
const PIXELS_PER_LINE: f32 = 40.0;

/// Adapter that bridges winit events to pointer state, clicks and shortcuts
#[derive(Debug, Clone)]
pub struct WinitController {
    /// Currently pressed buttons
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    /// Buttons that went down since the last reset
    just_pressed: Vec<Button>,
    /// Current pointer position in physical pixels
    mouse_position: Option<Vec2>,
    /// Pointer travel while the left button is held, since last reset
    drag_delta: Vec2,
    /// Where the left button went down
    press_origin: Option<Vec2>,
    clicked: bool,
    scroll_lines: f32,
    dimensions: WindowDimensions,
}

impl WinitController {
    pub fn new(dimensions: WindowDimensions) -> Self {
        Self {
            pressed_keys: HashSet::new(),
            pressed_vec: Vec::new(),
            just_pressed: Vec::new(),
            mouse_position: None,
            drag_delta: Vec2::ZERO,
            press_origin: None,
            clicked: false,
            scroll_lines: 0.0,
            dimensions,
        }
    }

    /// Process a winit WindowEvent and update internal state
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = Self::keycode_to_button(keycode) {
                        self.on_button(button, event.state == ElementState::Pressed);
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(btn) = Self::mouse_button_to_button(*button) {
                    self.on_button(btn, *state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                self.press_origin = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                self.on_scroll(lines);
            }
            WindowEvent::Resized(size) => {
                self.set_dimensions(WindowDimensions::new(size.width, size.height));
            }
            _ => {}
        }
    }

    pub fn on_button(&mut self, button: Button, pressed: bool) {
        if pressed {
            if self.pressed_keys.insert(button) {
                self.pressed_vec.push(button);
                self.just_pressed.push(button);
            }
            if button == Button::MouseLeft {
                self.press_origin = self.mouse_position;
            }
        } else {
            if self.pressed_keys.remove(&button) {
                self.pressed_vec.retain(|&b| b != button);
            }
            if button == Button::MouseLeft {
                if let (Some(origin), Some(pos)) = (self.press_origin.take(), self.mouse_position) {
                    if origin.distance(pos) <= CLICK_SLOP {
                        self.clicked = true;
                    }
                }
            }
        }
    }

    pub fn on_cursor_moved(&mut self, position: Vec2) {
        if let Some(old) = self.mouse_position {
            if self.is_down(Button::MouseLeft) {
                self.drag_delta += position - old;
            }
        }
        self.mouse_position = Some(position);
    }

    pub fn on_scroll(&mut self, lines: f32) {
        self.scroll_lines += lines;
    }

    pub fn set_dimensions(&mut self, dimensions: WindowDimensions) {
        self.dimensions = dimensions;
    }

    /// Reset per-frame state
    /// Call this at the end of each frame after processing input
    pub fn reset_deltas(&mut self) {
        self.drag_delta = Vec2::ZERO;
        self.scroll_lines = 0.0;
        self.clicked = false;
        self.just_pressed.clear();
    }

    /// Current pointer position in physical pixels
    pub fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }

    /// Pointer in normalized device coordinates (x right, y up, both in [-1, 1])
    pub fn pointer_ndc(&self) -> Option<Vec2> {
        let pos = self.mouse_position?;
        if self.dimensions.width == 0 || self.dimensions.height == 0 {
            return None;
        }
        Some(Vec2::new(
            pos.x / self.dimensions.width as f32 * 2.0 - 1.0,
            -(pos.y / self.dimensions.height as f32 * 2.0 - 1.0),
        ))
    }

    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    pub fn scroll_lines(&self) -> f32 {
        self.scroll_lines
    }

    /// Left press and release without dragging since the last reset
    pub fn clicked(&self) -> bool {
        self.clicked
    }

    pub fn was_pressed(&self, button: Button) -> bool {
        self.just_pressed.contains(&button)
    }

    /// Map winit KeyCode to Button
    fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
        match keycode {
            KeyCode::KeyT => Some(Button::KeyT),
            KeyCode::KeyM => Some(Button::KeyM),
            KeyCode::Escape => Some(Button::Escape),
            _ => None,
        }
    }

    /// Map winit MouseButton to Button
    fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
        match button {
            MouseButton::Left => Some(Button::MouseLeft),
            MouseButton::Right => Some(Button::MouseRight),
            _ => None,
        }
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // winit events carry private fields, so these drive the handlers directly

    fn controller() -> WinitController {
        WinitController::new(WindowDimensions::new(800, 600))
    }

    #[test]
    fn test_new_controller_empty() {
        let controller = controller();
        assert!(!controller.is_down(Button::MouseLeft));
        assert_eq!(controller.get_down_keys().len(), 0);
        assert_eq!(controller.mouse_position(), None);
        assert_eq!(controller.pointer_ndc(), None);
    }

    #[test]
    fn test_pointer_ndc_corners() {
        let mut controller = controller();
        controller.on_cursor_moved(Vec2::new(400.0, 300.0));
        assert_eq!(controller.pointer_ndc(), Some(Vec2::ZERO));

        controller.on_cursor_moved(Vec2::new(0.0, 0.0));
        assert_eq!(controller.pointer_ndc(), Some(Vec2::new(-1.0, 1.0)));

        controller.on_cursor_moved(Vec2::new(800.0, 600.0));
        assert_eq!(controller.pointer_ndc(), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn test_click_without_drag() {
        let mut controller = controller();
        controller.on_cursor_moved(Vec2::new(100.0, 100.0));
        controller.on_button(Button::MouseLeft, true);
        controller.on_cursor_moved(Vec2::new(102.0, 101.0));
        controller.on_button(Button::MouseLeft, false);
        assert!(controller.clicked());

        controller.reset_deltas();
        assert!(!controller.clicked());
    }

    #[test]
    fn test_drag_is_not_click() {
        let mut controller = controller();
        controller.on_cursor_moved(Vec2::new(100.0, 100.0));
        controller.on_button(Button::MouseLeft, true);
        controller.on_cursor_moved(Vec2::new(160.0, 90.0));
        controller.on_button(Button::MouseLeft, false);

        assert!(!controller.clicked());
        assert_eq!(controller.drag_delta(), Vec2::new(60.0, -10.0));
    }

    #[test]
    fn test_moves_without_button_do_not_drag() {
        let mut controller = controller();
        controller.on_cursor_moved(Vec2::new(10.0, 10.0));
        controller.on_cursor_moved(Vec2::new(50.0, 50.0));
        assert_eq!(controller.drag_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_just_pressed_is_edge_triggered() {
        let mut controller = controller();
        controller.on_button(Button::KeyT, true);
        controller.on_button(Button::KeyT, true); // key repeat
        assert!(controller.was_pressed(Button::KeyT));

        controller.reset_deltas();
        assert!(!controller.was_pressed(Button::KeyT));
        assert!(controller.is_down(Button::KeyT));
    }

    #[test]
    fn test_delta_reset_keeps_position() {
        let mut controller = controller();
        controller.on_cursor_moved(Vec2::new(100.0, 200.0));
        controller.on_scroll(2.0);

        controller.reset_deltas();
        assert_eq!(controller.scroll_lines(), 0.0);
        assert_eq!(controller.mouse_position(), Some(Vec2::new(100.0, 200.0)));
    }

    #[test]
    fn test_resize_changes_ndc_mapping() {
        let mut controller = controller();
        controller.on_cursor_moved(Vec2::new(400.0, 300.0));
        controller.set_dimensions(WindowDimensions::new(1600, 600));
        assert_eq!(controller.pointer_ndc(), Some(Vec2::new(-0.5, 0.0)));
    }
}
