//! Scene pass: every mesh, both point clouds and the loading overlay, drawn
//! into an HDR target that the post chain reads.

use bytemuck::Zeroable;
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::managers::OverlayUniforms;
use crate::materials::{
    BakedMaterial, BlendMode, CandlesMaterial, CoffeeSmokeMaterial, EmissiveMaterial,
    EmissiveUniforms, FireMaterial, Material, RenderState,
};
use crate::math::Color;
use crate::particles::{FireParticles, ParticleVertex, Snow};
use crate::scene::{LoadedAssets, MaterialSlot, NodeId, SceneNodes};
use crate::types::{CameraUniform, ModelUniform, SceneVertex};

use super::targets::{
    linear_sampler, sampler_entry, shader, texture_entry, uniform_entry, upload_texture,
    RenderTarget, UniformBinding, DEPTH_FORMAT, HDR_FORMAT,
};

const COMMON_WGSL: &str = include_str!("shaders/common.wgsl");
const MESH_WGSL: &str = include_str!("shaders/mesh.wgsl");

/// Vertices per particle quad
const QUAD_VERTICES: u32 = 6;

/// Current state of everything the scene pass reads uniforms from
pub struct FrameMaterials<'a> {
    pub baked: &'a BakedMaterial,
    pub lamp: &'a EmissiveMaterial,
    pub smoke: &'a CoffeeSmokeMaterial,
    pub fire: &'a FireMaterial,
    pub candles: &'a CandlesMaterial,
    pub fire_particles: &'a FireParticles,
    pub snow: &'a Snow,
    pub overlay: OverlayUniforms,
}

struct Layouts {
    camera: wgpu::BindGroupLayout,
    model: wgpu::BindGroupLayout,
    uniform: wgpu::BindGroupLayout,
    baked: wgpu::BindGroupLayout,
    noise: wgpu::BindGroupLayout,
}

impl Layouts {
    fn new(device: &wgpu::Device) -> Self {
        let all = wgpu::ShaderStages::VERTEX_FRAGMENT;
        let fragment = wgpu::ShaderStages::FRAGMENT;
        let layout = |label: &str, entries: &[wgpu::BindGroupLayoutEntry]| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries,
            })
        };

        Self {
            camera: layout("camera_bind_group_layout", &[uniform_entry(0, all)]),
            model: layout(
                "model_bind_group_layout",
                &[uniform_entry(0, wgpu::ShaderStages::VERTEX)],
            ),
            uniform: layout("uniform_bind_group_layout", &[uniform_entry(0, all)]),
            baked: layout(
                "baked_bind_group_layout",
                &[
                    uniform_entry(0, fragment),
                    texture_entry(1, fragment),
                    texture_entry(2, fragment),
                    sampler_entry(3, fragment),
                ],
            ),
            noise: layout(
                "noise_bind_group_layout",
                &[uniform_entry(0, all), texture_entry(1, all), sampler_entry(2, all)],
            ),
        }
    }
}

struct Pipelines {
    baked: wgpu::RenderPipeline,
    emissive: wgpu::RenderPipeline,
    smoke: wgpu::RenderPipeline,
    fire: wgpu::RenderPipeline,
    candles: wgpu::RenderPipeline,
    fire_particles: wgpu::RenderPipeline,
    snow: wgpu::RenderPipeline,
    overlay: wgpu::RenderPipeline,
}

struct PipelineDesc<'a> {
    label: &'a str,
    module: &'a wgpu::ShaderModule,
    bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    blend: wgpu::BlendState,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    match mode {
        BlendMode::Opaque => wgpu::BlendState::REPLACE,
        BlendMode::Additive => wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::Zero,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        },
    }
}

fn cull_mode(state: RenderState) -> Option<wgpu::Face> {
    if state.double_sided {
        None
    } else {
        Some(wgpu::Face::Back)
    }
}

fn create_pipeline(device: &wgpu::Device, desc: PipelineDesc) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: desc.bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: desc.module,
            entry_point: Some("vs_main"),
            buffers: desc.buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: HDR_FORMAT,
                blend: Some(desc.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

impl Pipelines {
    fn new(device: &wgpu::Device, layouts: &Layouts) -> Self {
        let mesh_buffers = [SceneVertex::layout()];
        let particle_buffers = [ParticleVertex::layout()];

        let mesh_pipeline = |label: &str,
                             fragment: &str,
                             material_layout: &wgpu::BindGroupLayout,
                             state: RenderState| {
            let module = shader(device, label, &[COMMON_WGSL, MESH_WGSL, fragment]);
            create_pipeline(
                device,
                PipelineDesc {
                    label,
                    module: &module,
                    bind_group_layouts: &[&layouts.camera, material_layout, &layouts.model],
                    buffers: &mesh_buffers,
                    blend: blend_state(state.blend),
                    cull_mode: cull_mode(state),
                    depth_write: state.depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                },
            )
        };

        let flame_wgsl = include_str!("shaders/flame.wgsl");
        let baked = mesh_pipeline(
            "Baked Pipeline",
            include_str!("shaders/baked.wgsl"),
            &layouts.baked,
            BakedMaterial::default().render_state(),
        );
        let emissive = mesh_pipeline(
            "Emissive Pipeline",
            include_str!("shaders/emissive.wgsl"),
            &layouts.uniform,
            RenderState::OPAQUE,
        );
        let fire = mesh_pipeline(
            "Fire Pipeline",
            flame_wgsl,
            &layouts.noise,
            FireMaterial::default().render_state(),
        );
        let candles = mesh_pipeline(
            "Candles Pipeline",
            flame_wgsl,
            &layouts.noise,
            CandlesMaterial::default().render_state(),
        );

        // Smoke displaces vertices, so it brings its own vertex stage
        let smoke_state = CoffeeSmokeMaterial::default().render_state();
        let smoke_module = shader(
            device,
            "Smoke Shader",
            &[COMMON_WGSL, include_str!("shaders/smoke.wgsl")],
        );
        let smoke = create_pipeline(
            device,
            PipelineDesc {
                label: "Smoke Pipeline",
                module: &smoke_module,
                bind_group_layouts: &[&layouts.camera, &layouts.noise, &layouts.model],
                buffers: &mesh_buffers,
                blend: blend_state(smoke_state.blend),
                cull_mode: cull_mode(smoke_state),
                depth_write: smoke_state.depth_write,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        let particle_pipeline =
            |label: &str, source: &str, material_layout: &wgpu::BindGroupLayout| {
                let module = shader(device, label, &[COMMON_WGSL, source]);
                create_pipeline(
                    device,
                    PipelineDesc {
                        label,
                        module: &module,
                        bind_group_layouts: &[&layouts.camera, material_layout],
                        buffers: &particle_buffers,
                        blend: blend_state(BlendMode::Additive),
                        cull_mode: None,
                        depth_write: false,
                        depth_compare: wgpu::CompareFunction::Less,
                    },
                )
            };
        let fire_particles = particle_pipeline(
            "Fire Particles Pipeline",
            include_str!("shaders/fire_particles.wgsl"),
            &layouts.noise,
        );
        let snow = particle_pipeline(
            "Snow Pipeline",
            include_str!("shaders/snow.wgsl"),
            &layouts.uniform,
        );

        let overlay_module = shader(
            device,
            "Overlay Shader",
            &[include_str!("shaders/overlay.wgsl")],
        );
        let overlay = create_pipeline(
            device,
            PipelineDesc {
                label: "Overlay Pipeline",
                module: &overlay_module,
                bind_group_layouts: &[&layouts.uniform],
                buffers: &[],
                blend: wgpu::BlendState::ALPHA_BLENDING,
                cull_mode: None,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
            },
        );

        Self {
            baked,
            emissive,
            smoke,
            fire,
            candles,
            fire_particles,
            snow,
            overlay,
        }
    }
}

struct GpuMesh {
    node: NodeId,
    slot: MaterialSlot,
    /// Own color block for `MaterialSlot::Flat`
    flat: Option<UniformBinding>,
    model: UniformBinding,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn is_additive(&self) -> bool {
        matches!(
            self.slot,
            MaterialSlot::CoffeeSmoke | MaterialSlot::Fire | MaterialSlot::Candles
        )
    }
}

struct ParticleBatch {
    binding: UniformBinding,
    instances: Option<wgpu::Buffer>,
    count: u32,
}

impl ParticleBatch {
    fn new(
        device: &wgpu::Device,
        label: &str,
        binding: UniformBinding,
        particles: &[ParticleVertex],
    ) -> Self {
        let instances = (!particles.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(particles),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        Self {
            binding,
            instances,
            count: particles.len() as u32,
        }
    }

    fn release(&mut self) {
        if let Some(buffer) = self.instances.take() {
            buffer.destroy();
            self.count = 0;
        }
    }
}

/// Everything created once the assets arrive
struct GpuScene {
    meshes: Vec<GpuMesh>,
    baked: UniformBinding,
    lamp: UniformBinding,
    smoke: UniformBinding,
    fire: UniformBinding,
    candles: UniformBinding,
    fire_particles: ParticleBatch,
    snow: ParticleBatch,
    _textures: [wgpu::Texture; 3],
}

pub struct SceneRenderer {
    layouts: Layouts,
    pipelines: Pipelines,
    camera: UniformBinding,
    overlay: UniformBinding,
    color: RenderTarget,
    depth: RenderTarget,
    scene: Option<GpuScene>,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let layouts = Layouts::new(device);
        let pipelines = Pipelines::new(device, &layouts);

        let camera = UniformBinding::new(
            device,
            "Camera Buffer",
            &layouts.camera,
            bytemuck::bytes_of(&CameraUniform::zeroed()),
            &[],
        );
        let overlay = UniformBinding::new(
            device,
            "Overlay Buffer",
            &layouts.uniform,
            bytemuck::bytes_of(&OverlayUniforms {
                alpha: 1.0,
                _padding: [0.0; 3],
            }),
            &[],
        );

        Self {
            color: RenderTarget::color(device, "Scene Color", width, height),
            depth: RenderTarget::depth(device, "Scene Depth", width, height),
            layouts,
            pipelines,
            camera,
            overlay,
            scene: None,
        }
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    pub fn mesh_count(&self) -> usize {
        self.scene.as_ref().map_or(0, |scene| scene.meshes.len())
    }

    /// Upload textures and meshes, and bind each mesh to its material
    pub fn upload_scene(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        assets: &LoadedAssets,
        nodes: &SceneNodes,
        materials: &FrameMaterials,
    ) {
        let (noise_texture, noise_view) = upload_texture(
            device,
            queue,
            "Noise Texture",
            &assets.noise,
            wgpu::TextureFormat::Rgba8Unorm,
        );
        let (day_texture, day_view) = upload_texture(
            device,
            queue,
            "Baked Day Texture",
            &assets.baked_day,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );
        let (night_texture, night_view) = upload_texture(
            device,
            queue,
            "Baked Night Texture",
            &assets.baked_night,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        );

        let baked_sampler = linear_sampler(device, "Baked Sampler", wgpu::AddressMode::ClampToEdge);
        let noise_sampler = linear_sampler(device, "Noise Sampler", wgpu::AddressMode::Repeat);

        let noise_entries = [
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&noise_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&noise_sampler),
            },
        ];
        let noise_binding = |label: &str, material: &dyn Material| {
            UniformBinding::new(
                device,
                label,
                &self.layouts.noise,
                material.uniform_bytes(),
                &noise_entries,
            )
        };

        let baked = UniformBinding::new(
            device,
            "Baked Uniforms",
            &self.layouts.baked,
            materials.baked.uniform_bytes(),
            &[
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&day_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&night_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&baked_sampler),
                },
            ],
        );
        let lamp = UniformBinding::new(
            device,
            "Lamp Uniforms",
            &self.layouts.uniform,
            materials.lamp.uniform_bytes(),
            &[],
        );
        let smoke = noise_binding("Smoke Uniforms", materials.smoke);
        let fire = noise_binding("Fire Uniforms", materials.fire);
        let candles = noise_binding("Candles Uniforms", materials.candles);

        let fire_particles = ParticleBatch::new(
            device,
            "Fire Particles",
            UniformBinding::new(
                device,
                "Fire Particle Uniforms",
                &self.layouts.noise,
                bytemuck::bytes_of(materials.fire_particles.uniforms()),
                &noise_entries,
            ),
            materials.fire_particles.particles(),
        );
        let snow = ParticleBatch::new(
            device,
            "Snow Particles",
            UniformBinding::new(
                device,
                "Snow Uniforms",
                &self.layouts.uniform,
                bytemuck::bytes_of(materials.snow.uniforms()),
                &[],
            ),
            materials.snow.particles(),
        );

        let graph = &assets.graph;
        let world = graph.world_matrices();
        let meshes: Vec<GpuMesh> = graph
            .iter()
            .filter(|(_, node)| node.has_mesh())
            .filter_map(|(id, node)| {
                let mut vertices = Vec::new();
                let mut indices = Vec::new();
                for primitive in &node.primitives {
                    let base = vertices.len() as u32;
                    vertices.extend(primitive.positions.iter().enumerate().map(|(i, &position)| {
                        SceneVertex {
                            position,
                            uv: primitive.uvs.get(i).copied().unwrap_or([0.0; 2]),
                        }
                    }));
                    indices.extend(primitive.indices.iter().map(|index| base + index));
                }
                if indices.is_empty() {
                    return None;
                }

                let slot = nodes.slot_for(id);
                let flat = match slot {
                    MaterialSlot::Flat(color) => Some(flat_binding(
                        device,
                        &self.layouts.uniform,
                        &node.name,
                        color,
                    )),
                    _ => None,
                };
                let matrix = world.get(id.0).copied().unwrap_or(Mat4::IDENTITY);

                Some(GpuMesh {
                    node: id,
                    slot,
                    flat,
                    model: UniformBinding::new(
                        device,
                        &node.name,
                        &self.layouts.model,
                        bytemuck::bytes_of(&ModelUniform::new(matrix)),
                        &[],
                    ),
                    vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(node.name.as_str()),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                    index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some(node.name.as_str()),
                        contents: bytemuck::cast_slice(&indices),
                        usage: wgpu::BufferUsages::INDEX,
                    }),
                    index_count: indices.len() as u32,
                })
            })
            .collect();

        log::info!(
            "uploaded {} meshes, {} fire particles, {} snowflakes",
            meshes.len(),
            fire_particles.count,
            snow.count
        );

        self.scene = Some(GpuScene {
            meshes,
            baked,
            lamp,
            smoke,
            fire,
            candles,
            fire_particles,
            snow,
            _textures: [noise_texture, day_texture, night_texture],
        });
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if (width, height) == self.color.size() || width == 0 || height == 0 {
            return;
        }
        self.color = RenderTarget::color(device, "Scene Color", width, height);
        self.depth = RenderTarget::depth(device, "Scene Depth", width, height);
    }

    /// Input of the post chain
    pub fn output(&self) -> &wgpu::TextureView {
        self.color.view()
    }

    /// Write this frame's uniforms; `world` is indexed by node id
    pub fn prepare(
        &mut self,
        queue: &wgpu::Queue,
        camera: &CameraUniform,
        materials: &FrameMaterials,
        world: &[Mat4],
    ) {
        self.camera.write(queue, bytemuck::bytes_of(camera));
        self.overlay.write(queue, bytemuck::bytes_of(&materials.overlay));

        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        scene.baked.write(queue, materials.baked.uniform_bytes());
        scene.lamp.write(queue, materials.lamp.uniform_bytes());
        scene.smoke.write(queue, materials.smoke.uniform_bytes());
        scene.fire.write(queue, materials.fire.uniform_bytes());
        scene.candles.write(queue, materials.candles.uniform_bytes());

        if materials.fire_particles.is_disposed() {
            scene.fire_particles.release();
        } else {
            scene
                .fire_particles
                .binding
                .write(queue, bytemuck::bytes_of(materials.fire_particles.uniforms()));
        }
        if materials.snow.is_disposed() {
            scene.snow.release();
        } else {
            scene
                .snow
                .binding
                .write(queue, bytemuck::bytes_of(materials.snow.uniforms()));
        }

        for mesh in &scene.meshes {
            if let Some(matrix) = world.get(mesh.node.0) {
                mesh.model
                    .write(queue, bytemuck::bytes_of(&ModelUniform::new(*matrix)));
            }
        }
    }

    /// Record the scene pass; with `draw_scene` off only the clear happens
    pub fn draw(&self, encoder: &mut wgpu::CommandEncoder, clear_color: Color, draw_scene: bool) {
        let [r, g, b] = clear_color.to_linear();
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color.view(),
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: r as f64,
                        g: g as f64,
                        b: b as f64,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth.view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if !draw_scene {
            return;
        }

        pass.set_bind_group(0, self.camera.bind_group(), &[]);

        if let Some(scene) = &self.scene {
            // Opaque first so additive surfaces depth-test against the room
            let (opaque, additive): (Vec<&GpuMesh>, Vec<&GpuMesh>) =
                scene.meshes.iter().partition(|mesh| !mesh.is_additive());
            for mesh in opaque.into_iter().chain(additive) {
                let (pipeline, material) = self.material_for(scene, mesh);
                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, material, &[]);
                pass.set_bind_group(2, mesh.model.bind_group(), &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            for (pipeline, batch) in [
                (&self.pipelines.fire_particles, &scene.fire_particles),
                (&self.pipelines.snow, &scene.snow),
            ] {
                let Some(instances) = &batch.instances else {
                    continue;
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, batch.binding.bind_group(), &[]);
                pass.set_vertex_buffer(0, instances.slice(..));
                pass.draw(0..QUAD_VERTICES, 0..batch.count);
            }
        }

        // Overlay last, over everything
        pass.set_pipeline(&self.pipelines.overlay);
        pass.set_bind_group(0, self.overlay.bind_group(), &[]);
        pass.draw(0..3, 0..1);
    }

    fn material_for<'a>(
        &'a self,
        scene: &'a GpuScene,
        mesh: &'a GpuMesh,
    ) -> (&'a wgpu::RenderPipeline, &'a wgpu::BindGroup) {
        let pipelines = &self.pipelines;
        match mesh.slot {
            MaterialSlot::Baked => (&pipelines.baked, scene.baked.bind_group()),
            MaterialSlot::LampEmission => (&pipelines.emissive, scene.lamp.bind_group()),
            MaterialSlot::Flat(_) => (
                &pipelines.emissive,
                mesh.flat.as_ref().unwrap_or(&scene.lamp).bind_group(),
            ),
            MaterialSlot::CoffeeSmoke => (&pipelines.smoke, scene.smoke.bind_group()),
            MaterialSlot::Fire => (&pipelines.fire, scene.fire.bind_group()),
            MaterialSlot::Candles => (&pipelines.candles, scene.candles.bind_group()),
        }
    }
}

fn flat_binding(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    label: &str,
    color: Color,
) -> UniformBinding {
    let uniforms = EmissiveUniforms {
        color: color.to_linear(),
        _padding: 0.0,
    };
    UniformBinding::new(device, label, layout, bytemuck::bytes_of(&uniforms), &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_blend_keeps_destination() {
        let blend = blend_state(BlendMode::Additive);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(blend_state(BlendMode::Opaque), wgpu::BlendState::REPLACE);
    }

    #[test]
    fn test_double_sided_disables_culling() {
        assert_eq!(cull_mode(RenderState::OPAQUE), Some(wgpu::Face::Back));
        assert_eq!(cull_mode(RenderState::ADDITIVE.double_sided()), None);
    }
}
