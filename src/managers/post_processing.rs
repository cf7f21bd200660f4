use serde::{Deserialize, Serialize};

use crate::core::WindowDimensions;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloomParams {
    pub strength: f32,
    pub radius: f32,
    pub threshold: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: 1.5,
            radius: 0.4,
            threshold: 0.85,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassKind {
    /// Draws the scene into the chain's input target
    Render,
    Bloom(BloomParams),
    GammaCorrection,
    /// Edge antialiasing on the final image
    Antialias,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassSlot {
    pub name: String,
    pub kind: PassKind,
    pub enabled: bool,
}

/// How the next frame reaches the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    Composer,
    Direct,
}

/// Ordered, named post-processing passes
///
/// This is the bookkeeping half of the chain; `render::PostChain` owns the
/// GPU targets and follows whatever this lists.
#[derive(Debug, Clone)]
pub struct PostProcessingManager {
    passes: Vec<PassSlot>,
    enabled: bool,
    size: WindowDimensions,
    pixel_ratio: f32,
    released: Vec<String>,
    disposed: bool,
}

impl PostProcessingManager {
    pub const RENDER: &'static str = "render";
    pub const BLOOM: &'static str = "bloom";
    pub const GAMMA: &'static str = "gamma";
    pub const ANTIALIAS: &'static str = "antialias";

    /// Standard chain; antialiasing only at pixel ratio 1 on a compliant adapter
    pub fn new(
        size: WindowDimensions,
        pixel_ratio: f32,
        webgpu_compliant: bool,
        bloom: BloomParams,
    ) -> Self {
        let mut manager = Self {
            passes: Vec::new(),
            enabled: true,
            size,
            pixel_ratio,
            released: Vec::new(),
            disposed: false,
        };

        manager.add_pass(Self::RENDER, PassKind::Render);
        manager.add_pass(Self::BLOOM, PassKind::Bloom(bloom));
        manager.add_pass(Self::GAMMA, PassKind::GammaCorrection);
        manager.set_pass_enabled(Self::GAMMA, false);
        if pixel_ratio == 1.0 && webgpu_compliant {
            manager.add_pass(Self::ANTIALIAS, PassKind::Antialias);
        }

        log::debug!("post chain: {:?}", manager.pass_names());
        manager
    }

    pub fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.size = WindowDimensions::new(width, height);
        self.pixel_ratio = pixel_ratio;
    }

    pub fn size(&self) -> WindowDimensions {
        self.size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append a pass; `false` when the name is taken or the chain is gone
    pub fn add_pass(&mut self, name: &str, kind: PassKind) -> bool {
        if self.disposed || self.pass(name).is_some() {
            return false;
        }
        self.passes.push(PassSlot {
            name: name.to_string(),
            kind,
            enabled: true,
        });
        true
    }

    /// Remove a pass and queue its resources for release
    pub fn remove_pass(&mut self, name: &str) -> bool {
        let Some(index) = self.passes.iter().position(|p| p.name == name) else {
            return false;
        };
        let slot = self.passes.remove(index);
        self.released.push(slot.name);
        true
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn passes(&self) -> &[PassSlot] {
        &self.passes
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn pass(&self, name: &str) -> Option<&PassSlot> {
        self.passes.iter().find(|p| p.name == name)
    }

    pub fn pass_mut(&mut self, name: &str) -> Option<&mut PassSlot> {
        self.passes.iter_mut().find(|p| p.name == name)
    }

    pub fn set_pass_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.pass_mut(name) {
            Some(slot) => {
                slot.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn bloom(&self) -> Option<BloomParams> {
        self.passes.iter().find_map(|p| match p.kind {
            PassKind::Bloom(params) => Some(params),
            _ => None,
        })
    }

    pub fn bloom_mut(&mut self) -> Option<&mut BloomParams> {
        self.passes.iter_mut().find_map(|p| match &mut p.kind {
            PassKind::Bloom(params) => Some(params),
            _ => None,
        })
    }

    pub fn render_path(&self) -> RenderPath {
        if self.enabled && !self.disposed {
            RenderPath::Composer
        } else {
            RenderPath::Direct
        }
    }

    /// Names of passes whose GPU resources should be dropped
    pub fn take_released(&mut self) -> Vec<String> {
        std::mem::take(&mut self.released)
    }

    /// Release every pass
    pub fn dispose(&mut self) {
        self.released.extend(self.passes.drain(..).map(|p| p.name));
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(pixel_ratio: f32, compliant: bool) -> PostProcessingManager {
        PostProcessingManager::new(
            WindowDimensions::new(800, 600),
            pixel_ratio,
            compliant,
            BloomParams::default(),
        )
    }

    #[test]
    fn test_gamma_starts_disabled() {
        let post = manager(2.0, true);
        assert!(!post.pass(PostProcessingManager::GAMMA).unwrap().enabled);
        assert!(post.pass(PostProcessingManager::BLOOM).unwrap().enabled);
    }

    #[test]
    fn test_bloom_mut_edits_in_place() {
        let mut post = manager(1.0, true);
        post.bloom_mut().unwrap().strength = 0.5;
        assert_eq!(post.bloom().unwrap().strength, 0.5);
    }
}
