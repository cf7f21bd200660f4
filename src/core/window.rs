/// Maximum device pixel ratio the renderer honors
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Window dimensions in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for a degenerate window
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Device pixel ratio capped the way every pixel-density uniform expects
pub fn clamp_pixel_ratio(scale_factor: f64) -> f32 {
    (scale_factor as f32).min(MAX_PIXEL_RATIO)
}
