use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::FrameInfo;
use crate::pipeline::FrameTickable;

use super::{ParticleVertex, PointCloud};

/// Debug-tunable fire particle knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireParticleParams {
    pub size: f32,
    pub rise_speed: f32,
    pub rise_height: f32,
    pub random_seed: f32,
    pub turbulence_x: f32,
    pub turbulence_z: f32,
}

impl Default for FireParticleParams {
    fn default() -> Self {
        Self {
            size: 28.0,
            rise_speed: 0.2,
            rise_height: 0.9,
            random_seed: 100.0,
            turbulence_x: 0.02,
            turbulence_z: 0.05,
        }
    }
}

/// Matches `FireParticleUniforms` in fire_particles.wgsl
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FireParticleUniforms {
    pub time: f32,
    pub pixel_ratio: f32,
    pub size: f32,
    pub rise_speed: f32,
    pub rise_height: f32,
    pub random_seed: f32,
    pub turbulence_x: f32,
    pub turbulence_z: f32,
}

/// Embers rising out of the fireplace
#[derive(Debug, Clone)]
pub struct FireParticles {
    cloud: PointCloud,
    uniforms: FireParticleUniforms,
}

impl FireParticles {
    pub const COUNT: usize = 25;
    pub const ORIGIN: Vec3 = Vec3::new(0.0, -0.5, -1.8);

    pub fn new(params: FireParticleParams, pixel_ratio: f32, rng: &mut impl Rng) -> Self {
        let vertices = (0..Self::COUNT)
            .map(|_| {
                let x = Self::ORIGIN.x + (rng.random::<f32>() - 0.5) * 0.3;
                let y = Self::ORIGIN.y + rng.random::<f32>() * 0.1 - 0.05;
                let z = Self::ORIGIN.z + (rng.random::<f32>() - 0.5) * 0.2;
                ParticleVertex {
                    position: [x, y, z],
                    scale: 0.5 + rng.random::<f32>() * 0.3,
                    random: rng.random::<f32>(),
                }
            })
            .collect();

        let mut particles = Self {
            cloud: PointCloud::new(vertices),
            uniforms: FireParticleUniforms::zeroed(),
        };
        particles.set_params(params);
        particles.uniforms.pixel_ratio = pixel_ratio;
        particles
    }

    /// Deterministic construction for tests and reproducible runs
    pub fn with_seed(params: FireParticleParams, pixel_ratio: f32, seed: u64) -> Self {
        Self::new(params, pixel_ratio, &mut StdRng::seed_from_u64(seed))
    }

    pub fn update(&mut self, time: f32, pixel_ratio: f32) {
        self.uniforms.time = time;
        self.uniforms.pixel_ratio = pixel_ratio;
    }

    pub fn params(&self) -> FireParticleParams {
        FireParticleParams {
            size: self.uniforms.size,
            rise_speed: self.uniforms.rise_speed,
            rise_height: self.uniforms.rise_height,
            random_seed: self.uniforms.random_seed,
            turbulence_x: self.uniforms.turbulence_x,
            turbulence_z: self.uniforms.turbulence_z,
        }
    }

    pub fn set_params(&mut self, params: FireParticleParams) {
        self.uniforms.size = params.size;
        self.uniforms.rise_speed = params.rise_speed;
        self.uniforms.rise_height = params.rise_height;
        self.uniforms.random_seed = params.random_seed;
        self.uniforms.turbulence_x = params.turbulence_x;
        self.uniforms.turbulence_z = params.turbulence_z;
    }

    pub fn uniforms(&self) -> &FireParticleUniforms {
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

impl FrameTickable for FireParticles {
    fn tick(&mut self, frame: &FrameInfo) {
        let pixel_ratio = self.uniforms.pixel_ratio;
        self.update(frame.time, pixel_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_start_from_params() {
        let fire = FireParticles::with_seed(FireParticleParams::default(), 2.0, 7);
        let u = fire.uniforms();
        assert_eq!(u.size, 28.0);
        assert_eq!(u.random_seed, 100.0);
        assert_eq!(u.pixel_ratio, 2.0);
        assert_eq!(u.time, 0.0);
    }

    #[test]
    fn test_tick_keeps_pixel_ratio() {
        let mut fire = FireParticles::with_seed(FireParticleParams::default(), 1.5, 7);
        fire.tick(&FrameInfo::new(1, 2.0, 0.1));
        assert_eq!(fire.uniforms().time, 2.0);
        assert_eq!(fire.uniforms().pixel_ratio, 1.5);
    }
}
