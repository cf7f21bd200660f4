//! GPU half of the post-processing chain.
//!
//! Follows the pass list of a [`PostProcessingManager`]: each enabled effect
//! reads the current image and writes the other ping-pong target, and the
//! result is blitted to the surface. Per-pass resources live in a map keyed by
//! pass name so removing a pass frees exactly what it allocated.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::core::WindowDimensions;
use crate::managers::{BloomParams, PassKind, PostProcessingManager, RenderPath};

use super::targets::{
    linear_sampler, sampler_entry, shader, texture_entry, uniform_entry, RenderTarget,
    UniformBinding, HDR_FORMAT,
};

const FULLSCREEN_WGSL: &str = include_str!("shaders/fullscreen.wgsl");

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
struct BloomUniforms {
    strength: f32,
    radius: f32,
    threshold: f32,
    _padding: f32,
    texel: [f32; 2],
    direction: [f32; 2],
}

impl BloomUniforms {
    fn new(params: BloomParams, texel: [f32; 2], direction: [f32; 2]) -> Self {
        Self {
            strength: params.strength,
            radius: params.radius,
            threshold: params.threshold,
            _padding: 0.0,
            texel,
            direction,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
struct FxaaUniforms {
    texel: [f32; 2],
    _padding: [f32; 2],
}

/// Half-resolution bright-pass and blur targets plus one uniform block per
/// draw, since every write lands before the encoder runs
struct BloomResources {
    half: [RenderTarget; 2],
    bright: wgpu::Buffer,
    blur_horizontal: wgpu::Buffer,
    blur_vertical: wgpu::Buffer,
}

enum PassResources {
    Bloom(BloomResources),
    Antialias(UniformBinding),
}

struct Pipelines {
    blit_surface: wgpu::RenderPipeline,
    gamma: wgpu::RenderPipeline,
    bloom_bright: wgpu::RenderPipeline,
    bloom_blur: wgpu::RenderPipeline,
    bloom_composite: wgpu::RenderPipeline,
    fxaa: wgpu::RenderPipeline,
}

fn fullscreen_pipeline(
    device: &wgpu::Device,
    label: &str,
    module: &wgpu::ShaderModule,
    entry_point: &str,
    layouts: &[&wgpu::BindGroupLayout],
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some(entry_point),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

pub struct PostChain {
    source_layout: wgpu::BindGroupLayout,
    bloom_layout: wgpu::BindGroupLayout,
    fxaa_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    pipelines: Pipelines,
    targets: [RenderTarget; 2],
    size: WindowDimensions,
    resources: HashMap<String, PassResources>,
}

impl PostChain {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        size: WindowDimensions,
    ) -> Self {
        let fragment = wgpu::ShaderStages::FRAGMENT;
        let source_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_source_layout"),
            entries: &[texture_entry(0, fragment), sampler_entry(1, fragment)],
        });
        let bloom_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bloom_layout"),
            entries: &[uniform_entry(0, fragment), texture_entry(1, fragment)],
        });
        let fxaa_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fxaa_layout"),
            entries: &[uniform_entry(0, fragment)],
        });

        let blit = shader(
            device,
            "Blit Shader",
            &[FULLSCREEN_WGSL, include_str!("shaders/blit.wgsl")],
        );
        let gamma = shader(
            device,
            "Gamma Shader",
            &[FULLSCREEN_WGSL, include_str!("shaders/gamma.wgsl")],
        );
        let bloom = shader(
            device,
            "Bloom Shader",
            &[FULLSCREEN_WGSL, include_str!("shaders/bloom.wgsl")],
        );
        let fxaa = shader(
            device,
            "FXAA Shader",
            &[FULLSCREEN_WGSL, include_str!("shaders/fxaa.wgsl")],
        );

        let source = [&source_layout];
        let with_bloom = [&source_layout, &bloom_layout];
        let with_fxaa = [&source_layout, &fxaa_layout];
        let pipeline = |label: &str,
                        module: &wgpu::ShaderModule,
                        entry_point: &str,
                        layouts: &[&wgpu::BindGroupLayout]| {
            fullscreen_pipeline(device, label, module, entry_point, layouts, HDR_FORMAT)
        };
        let pipelines = Pipelines {
            blit_surface: fullscreen_pipeline(
                device,
                "Blit Pipeline",
                &blit,
                "fs_main",
                &source,
                surface_format,
            ),
            gamma: pipeline("Gamma Pipeline", &gamma, "fs_main", &source),
            bloom_bright: pipeline("Bloom Bright Pipeline", &bloom, "fs_bright", &with_bloom),
            bloom_blur: pipeline("Bloom Blur Pipeline", &bloom, "fs_blur", &with_bloom),
            bloom_composite: pipeline(
                "Bloom Composite Pipeline",
                &bloom,
                "fs_composite",
                &with_bloom,
            ),
            fxaa: pipeline("FXAA Pipeline", &fxaa, "fs_main", &with_fxaa),
        };

        Self {
            sampler: linear_sampler(device, "Post Sampler", wgpu::AddressMode::ClampToEdge),
            targets: Self::create_targets(device, size),
            source_layout,
            bloom_layout,
            fxaa_layout,
            pipelines,
            size,
            resources: HashMap::new(),
        }
    }

    fn create_targets(device: &wgpu::Device, size: WindowDimensions) -> [RenderTarget; 2] {
        [
            RenderTarget::color(device, "Post Target A", size.width, size.height),
            RenderTarget::color(device, "Post Target B", size.width, size.height),
        ]
    }

    /// Number of passes currently holding GPU resources
    pub fn allocated_passes(&self) -> usize {
        self.resources.len()
    }

    /// Bring GPU resources in line with the manager: free released passes,
    /// follow size changes, allocate anything new
    pub fn sync(&mut self, device: &wgpu::Device, manager: &mut PostProcessingManager) {
        for name in manager.take_released() {
            if self.resources.remove(&name).is_some() {
                log::debug!("released post pass {:?}", name);
            }
        }

        let size = manager.size();
        if size != self.size && !size.is_empty() {
            self.targets = Self::create_targets(device, size);
            self.resources.clear();
            self.size = size;
            log::debug!("post targets resized to {}x{}", size.width, size.height);
        }

        for slot in manager.passes() {
            if self.resources.contains_key(&slot.name) {
                continue;
            }
            let resources = match slot.kind {
                PassKind::Bloom(_) => PassResources::Bloom(self.create_bloom(device)),
                PassKind::Antialias => PassResources::Antialias(self.create_fxaa(device)),
                PassKind::Render | PassKind::GammaCorrection => continue,
            };
            self.resources.insert(slot.name.clone(), resources);
        }
    }

    fn create_bloom(&self, device: &wgpu::Device) -> BloomResources {
        let width = (self.size.width / 2).max(1);
        let height = (self.size.height / 2).max(1);
        let uniform = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<BloomUniforms>() as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };

        BloomResources {
            half: [
                RenderTarget::color(device, "Bloom Half A", width, height),
                RenderTarget::color(device, "Bloom Half B", width, height),
            ],
            bright: uniform("Bloom Bright Uniforms"),
            blur_horizontal: uniform("Bloom Blur H Uniforms"),
            blur_vertical: uniform("Bloom Blur V Uniforms"),
        }
    }

    fn create_fxaa(&self, device: &wgpu::Device) -> UniformBinding {
        let uniforms = FxaaUniforms {
            texel: texel(self.size.width, self.size.height),
            _padding: [0.0; 2],
        };
        UniformBinding::new(
            device,
            "FXAA Uniforms",
            &self.fxaa_layout,
            bytemuck::bytes_of(&uniforms),
            &[],
        )
    }

    /// Run the chain over `input` and write the result into `output`
    pub fn run(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        input: &wgpu::TextureView,
        output: &wgpu::TextureView,
        manager: &PostProcessingManager,
    ) {
        let mut current = input;
        let mut next = 0;

        if manager.render_path() == RenderPath::Composer {
            for slot in manager.passes().iter().filter(|slot| slot.enabled) {
                let target = self.targets[next].view();
                let ran = match (slot.kind, self.resources.get(&slot.name)) {
                    (PassKind::Render, _) => false,
                    (PassKind::Bloom(params), Some(PassResources::Bloom(bloom))) => {
                        self.bloom(device, queue, encoder, current, target, params, bloom);
                        true
                    }
                    (PassKind::GammaCorrection, _) => {
                        let source = self.source_group(device, current);
                        self.fullscreen(
                            encoder,
                            "Gamma Pass",
                            &self.pipelines.gamma,
                            target,
                            &[&source],
                        );
                        true
                    }
                    (PassKind::Antialias, Some(PassResources::Antialias(uniforms))) => {
                        let source = self.source_group(device, current);
                        self.fullscreen(
                            encoder,
                            "FXAA Pass",
                            &self.pipelines.fxaa,
                            target,
                            &[&source, uniforms.bind_group()],
                        );
                        true
                    }
                    _ => {
                        log::warn!("post pass {:?} has no GPU resources yet", slot.name);
                        false
                    }
                };
                if ran {
                    current = target;
                    next = 1 - next;
                }
            }
        }

        let source = self.source_group(device, current);
        self.fullscreen(
            encoder,
            "Present Pass",
            &self.pipelines.blit_surface,
            output,
            &[&source],
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn bloom(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        input: &wgpu::TextureView,
        output: &wgpu::TextureView,
        params: BloomParams,
        bloom: &BloomResources,
    ) {
        let (width, height) = bloom.half[0].size();
        let half_texel = texel(width, height);
        let full_texel = texel(self.size.width, self.size.height);

        queue.write_buffer(
            &bloom.bright,
            0,
            bytemuck::bytes_of(&BloomUniforms::new(params, full_texel, [0.0, 0.0])),
        );
        queue.write_buffer(
            &bloom.blur_horizontal,
            0,
            bytemuck::bytes_of(&BloomUniforms::new(params, half_texel, [1.0, 0.0])),
        );
        queue.write_buffer(
            &bloom.blur_vertical,
            0,
            bytemuck::bytes_of(&BloomUniforms::new(params, half_texel, [0.0, 1.0])),
        );

        // A bound texture may not also be the attachment being drawn
        let [half_a, half_b] = &bloom.half;
        let group = |buffer: &wgpu::Buffer, texture: &wgpu::TextureView| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("bloom_bind_group"),
                layout: &self.bloom_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(texture),
                    },
                ],
            })
        };

        let source = self.source_group(device, input);
        let extra = group(&bloom.bright, half_b.view());
        self.fullscreen(
            encoder,
            "Bloom Bright Pass",
            &self.pipelines.bloom_bright,
            half_a.view(),
            &[&source, &extra],
        );

        let source = self.source_group(device, half_a.view());
        let extra = group(&bloom.blur_horizontal, half_a.view());
        self.fullscreen(
            encoder,
            "Bloom Blur H Pass",
            &self.pipelines.bloom_blur,
            half_b.view(),
            &[&source, &extra],
        );

        let source = self.source_group(device, half_b.view());
        let extra = group(&bloom.blur_vertical, half_b.view());
        self.fullscreen(
            encoder,
            "Bloom Blur V Pass",
            &self.pipelines.bloom_blur,
            half_a.view(),
            &[&source, &extra],
        );

        let source = self.source_group(device, input);
        let extra = group(&bloom.bright, half_a.view());
        self.fullscreen(
            encoder,
            "Bloom Composite Pass",
            &self.pipelines.bloom_composite,
            output,
            &[&source, &extra],
        );
    }

    fn source_group(&self, device: &wgpu::Device, view: &wgpu::TextureView) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("post_source_bind_group"),
            layout: &self.source_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    fn fullscreen(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        label: &str,
        pipeline: &wgpu::RenderPipeline,
        target: &wgpu::TextureView,
        groups: &[&wgpu::BindGroup],
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        pass.set_pipeline(pipeline);
        for (index, group) in groups.iter().enumerate() {
            pass.set_bind_group(index as u32, *group, &[]);
        }
        pass.draw(0..3, 0..1);
    }
}

fn texel(width: u32, height: u32) -> [f32; 2] {
    [1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_blocks_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<BloomUniforms>(), 32);
        assert_eq!(std::mem::size_of::<FxaaUniforms>(), 16);
    }

    #[test]
    fn test_texel_guards_zero_size() {
        assert_eq!(texel(0, 4), [1.0, 0.25]);
    }
}
