//! Fixed-count point clouds generated once at construction.
//!
//! Positions, scales and phase seeds are drawn from an injected RNG; all
//! motion happens in the vertex shaders, so nothing is recycled on the CPU.

mod fire;
mod snow;

pub use fire::{FireParticleParams, FireParticleUniforms, FireParticles};
pub use snow::{Snow, SnowUniforms};

use bytemuck::{Pod, Zeroable};

/// Per-particle instance data, matches the vertex inputs of the point shaders
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub scale: f32,
    pub random: f32,
}

impl ParticleVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Generated particles plus their release state
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    vertices: Vec<ParticleVertex>,
    disposed: bool,
}

impl PointCloud {
    pub fn new(vertices: Vec<ParticleVertex>) -> Self {
        Self {
            vertices,
            disposed: false,
        }
    }

    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Drop the geometry; the GPU buffer is freed on the next upload pass
    pub fn dispose(&mut self) {
        self.vertices.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
