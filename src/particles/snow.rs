use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::FrameInfo;
use crate::pipeline::FrameTickable;

use super::{ParticleVertex, PointCloud};

/// Matches `SnowUniforms` in snow.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SnowUniforms {
    pub time: f32,
    pub size: f32,
    pub pixel_ratio: f32,
    pub _padding: f32,
}

/// Flakes falling past the window
#[derive(Debug, Clone)]
pub struct Snow {
    cloud: PointCloud,
    uniforms: SnowUniforms,
}

impl Snow {
    pub const COUNT: usize = 15;
    pub const SIZE: f32 = 50.0;

    pub fn new(pixel_ratio: f32, rng: &mut impl Rng) -> Self {
        let vertices = (0..Self::COUNT)
            .map(|_| {
                let x = rng.random::<f32>() - 0.5 - 3.5;
                let z = rng.random::<f32>() - 0.5 + 0.3;
                ParticleVertex {
                    position: [x, 1.0, z],
                    scale: rng.random::<f32>(),
                    random: 0.0,
                }
            })
            .collect();

        Self {
            cloud: PointCloud::new(vertices),
            uniforms: SnowUniforms {
                time: 0.0,
                size: Self::SIZE,
                pixel_ratio,
                _padding: 0.0,
            },
        }
    }

    pub fn with_seed(pixel_ratio: f32, seed: u64) -> Self {
        Self::new(pixel_ratio, &mut StdRng::seed_from_u64(seed))
    }

    pub fn update(&mut self, time: f32) {
        self.uniforms.time = time;
    }

    pub fn handle_resize(&mut self, pixel_ratio: f32) {
        self.uniforms.pixel_ratio = pixel_ratio;
    }

    pub fn uniforms(&self) -> &SnowUniforms {
        &self.uniforms
    }

    pub fn particles(&self) -> &[ParticleVertex] {
        self.cloud.vertices()
    }

    pub fn dispose(&mut self) {
        self.cloud.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.cloud.is_disposed()
    }
}

impl FrameTickable for Snow {
    fn tick(&mut self, frame: &FrameInfo) {
        self.update(frame.time);
    }
}
