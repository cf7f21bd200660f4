//! Window, event loop and per-frame wiring.
//!
//! [`RoomState`] is everything that lives without a GPU: camera, input,
//! materials, particles and the managers. [`GpuState`] owns the surface and
//! the three renderers. Each redraw polls the asset loader and then runs one
//! [`FramePipeline`] cycle against a [`RoomFrame`] that borrows both halves.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glam::{Mat4, Vec2, Vec3};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Theme, Window, WindowId};

use crate::audio::SilentTrack;
use crate::camera::OrbitCamera;
use crate::config::SceneConfig;
use crate::core::{
    clamp_pixel_ratio, Button, Clock, FixedHz, FrameInfo, GpuContext, WindowDimensions,
    WinitController,
};
use crate::managers::{
    CursorIcon, DarkModeManager, HoverFeedback, HoverTransition, OverlayManager, Picker,
    PostProcessingManager, RenderPath, VinylPlayerManager, VinylPose,
};
use crate::materials::{
    BakedMaterial, CandlesMaterial, CoffeeSmokeMaterial, EmissiveMaterial, FireMaterial,
};
use crate::math::{Color, Ray};
use crate::particles::{FireParticles, Snow};
use crate::pipeline::{FrameHost, FramePipeline, FrameTickable};
use crate::render::{
    panel, FrameMaterials, PanelActions, PanelModel, PostChain, SceneRenderer, UiLayer,
};
use crate::scene::{AssetLoader, LoadEvent, LoadedAssets, NodeId, SceneGraph, SceneNodes};

/// The imported model once every asset has arrived
struct LoadedScene {
    graph: SceneGraph,
    world: Vec<Mat4>,
}

/// Scene state that needs no GPU
pub struct RoomState {
    config: SceneConfig,
    camera: OrbitCamera,
    input: WinitController,
    lamp: EmissiveMaterial,
    fire: FireMaterial,
    candles: CandlesMaterial,
    smoke: CoffeeSmokeMaterial,
    fire_particles: FireParticles,
    snow: Snow,
    dark_mode: DarkModeManager,
    vinyl: VinylPlayerManager,
    overlay: OverlayManager,
    post: PostProcessingManager,
    sound_feedback: HoverFeedback,
    picker: Picker,
    scene: Option<LoadedScene>,
    disc_rest: Vec3,
    arm_rest: Vec3,
    clear_color: Color,
    dimensions: WindowDimensions,
    hovered: Option<NodeId>,
    ui_wants_pointer: bool,
}

impl RoomState {
    pub fn new(
        config: SceneConfig,
        dimensions: WindowDimensions,
        pixel_ratio: f32,
        system_dark: Option<bool>,
        webgpu_compliant: bool,
    ) -> Self {
        let (fire_particles, snow) = match config.particle_seed {
            Some(seed) => (
                FireParticles::with_seed(config.fire_particles, pixel_ratio, seed),
                Snow::with_seed(pixel_ratio, seed.wrapping_add(1)),
            ),
            None => {
                let mut rng = rand::rng();
                (
                    FireParticles::new(config.fire_particles, pixel_ratio, &mut rng),
                    Snow::new(pixel_ratio, &mut rng),
                )
            }
        };

        let mut post = PostProcessingManager::new(
            dimensions,
            pixel_ratio,
            webgpu_compliant,
            config.bloom,
        );
        post.set_enabled(config.post_processing);

        let track = SilentTrack::new("background track", config.background_volume);

        Self {
            camera: OrbitCamera::new(&config.camera, dimensions.aspect()),
            input: WinitController::new(dimensions),
            lamp: EmissiveMaterial::new("Lamp", config.lamp_color),
            fire: FireMaterial::new(config.fire),
            candles: CandlesMaterial::new(config.candles),
            smoke: CoffeeSmokeMaterial::new(),
            fire_particles,
            snow,
            dark_mode: DarkModeManager::new(
                BakedMaterial::new(1.0),
                system_dark,
                config.dark_by_default,
            ),
            vinyl: VinylPlayerManager::new(Box::new(track)),
            overlay: OverlayManager::new(),
            post,
            sound_feedback: HoverFeedback::new(),
            picker: Picker::default(),
            scene: None,
            disc_rest: Vec3::ZERO,
            arm_rest: Vec3::ZERO,
            clear_color: config.clear_color,
            dimensions,
            hovered: None,
            ui_wants_pointer: false,
            config,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.scene.is_some()
    }

    pub fn dark_mode(&self) -> &DarkModeManager {
        &self.dark_mode
    }

    pub fn vinyl(&self) -> &VinylPlayerManager {
        &self.vinyl
    }

    pub fn overlay(&self) -> &OverlayManager {
        &self.overlay
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn post(&self) -> &PostProcessingManager {
        &self.post
    }

    /// The stored model, once assets have loaded
    pub fn scene_graph(&self) -> Option<&SceneGraph> {
        self.scene.as_ref().map(|scene| &scene.graph)
    }

    /// Place the model, wire the record player and build pick targets
    pub fn attach_scene(&mut self, graph: &mut SceneGraph) -> Result<SceneNodes> {
        let [x, y, z] = self.config.model_offset;
        graph.set_root_transform(self.config.model_scale, Vec3::new(x, y, z));

        let nodes =
            SceneNodes::resolve(&*graph).context("model does not match the room layout")?;

        self.vinyl.initialize(
            Some(nodes.vinyl_disc),
            Some(nodes.vinyl_arm),
            nodes.vinyl_player,
        );
        // Decomposed once; the animated rotations are never read back.
        self.disc_rest = graph.euler(nodes.vinyl_disc).unwrap_or(Vec3::ZERO);
        self.arm_rest = graph.euler(nodes.vinyl_arm).unwrap_or(Vec3::ZERO);
        self.vinyl.set_rest_pose(VinylPose {
            disc_y: self.disc_rest.y,
            arm_x: self.arm_rest.x,
            arm_y: self.arm_rest.y,
        });

        let world = graph.world_matrices();
        self.picker = Picker::from_graph(graph, self.vinyl.interactive_objects(), &world);
        log::info!(
            "scene ready: {} nodes, {} pick targets",
            graph.len(),
            self.picker.targets().len()
        );
        Ok(nodes)
    }

    /// Keep the attached graph for animation and picking
    pub fn store_scene(&mut self, graph: SceneGraph) {
        let world = graph.world_matrices();
        self.scene = Some(LoadedScene { graph, world });
    }

    /// Push the animated disc and arm angles into the graph
    fn sync_vinyl_pose(&mut self) {
        let pose = self.vinyl.pose();
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        if let Some(disc) = self.vinyl.disc() {
            let rest = self.disc_rest;
            scene
                .graph
                .set_euler(disc, Vec3::new(rest.x, pose.disc_y, rest.z));
        }
        if let Some(arm) = self.vinyl.arm() {
            let rest = self.arm_rest;
            scene
                .graph
                .set_euler(arm, Vec3::new(pose.arm_x, pose.arm_y, rest.z));
        }
        scene.world = scene.graph.world_matrices();
        self.picker.refresh(&scene.graph, &scene.world);
    }

    /// Advance every time-driven component by one frame
    pub fn tick(&mut self, frame: &FrameInfo) {
        self.tick_all(&mut |component: &mut dyn FrameTickable| component.tick(frame));
        self.sync_vinyl_pose();
    }

    pub fn resize(&mut self, dimensions: WindowDimensions, pixel_ratio: f32) {
        self.dimensions = dimensions;
        self.camera.set_aspect(dimensions.aspect());
        self.input.set_dimensions(dimensions);
        self.post
            .resize(dimensions.width, dimensions.height, pixel_ratio);
        self.snow.handle_resize(pixel_ratio);
        let time = self.fire_particles.uniforms().time;
        self.fire_particles.update(time, pixel_ratio);
    }

    /// Theme and sound toggles from the on-screen controls or shortcuts
    pub fn apply(&mut self, actions: PanelActions) {
        if actions.toggle_theme {
            self.dark_mode.toggle();
        }
        if actions.toggle_sound {
            self.vinyl.handle_click();
        }
    }

    fn world(&self) -> &[Mat4] {
        self.scene.as_ref().map_or(&[], |scene| scene.world.as_slice())
    }

    fn frame_materials(&self) -> FrameMaterials<'_> {
        FrameMaterials {
            baked: self.dark_mode.baked(),
            lamp: &self.lamp,
            smoke: &self.smoke,
            fire: &self.fire,
            candles: &self.candles,
            fire_particles: &self.fire_particles,
            snow: &self.snow,
            overlay: self.overlay.uniforms(),
        }
    }

    fn panel_model(&mut self) -> PanelModel<'_> {
        PanelModel {
            show_debug: self.config.show_ui,
            overlay: &self.overlay,
            lamp: &mut self.lamp,
            fire: &mut self.fire,
            candles: &mut self.candles,
            fire_particles: &mut self.fire_particles,
            dark_mode: &mut self.dark_mode,
            sound_feedback: &mut self.sound_feedback,
            is_playing: self.vinyl.is_playing(),
            post: &mut self.post,
            clear_color: &mut self.clear_color,
        }
    }

    fn draws_scene(&self) -> bool {
        self.post.render_path() == RenderPath::Direct
            || self
                .post
                .pass(PostProcessingManager::RENDER)
                .is_some_and(|slot| slot.enabled)
    }

    fn tick_all(&mut self, f: &mut dyn FnMut(&mut dyn FrameTickable)) {
        f(&mut self.fire);
        f(&mut self.candles);
        f(&mut self.smoke);
        f(&mut self.fire_particles);
        f(&mut self.snow);
        f(&mut self.dark_mode);
        f(&mut self.vinyl);
        f(&mut self.overlay);
        f(&mut self.sound_feedback);
    }

    fn handle_shortcuts(&mut self) {
        if self.input.was_pressed(Button::KeyT) {
            self.dark_mode.toggle();
        }
        if self.input.was_pressed(Button::KeyM) {
            self.vinyl.handle_click();
        }
    }

    fn handle_click(&mut self) {
        if !self.input.clicked() || self.ui_wants_pointer {
            return;
        }
        let Some(node) = self.hovered else {
            return;
        };
        let name = self.picker.name_of(node).unwrap_or_default().to_owned();
        if self.vinyl.is_vinyl_object(node, &name) {
            self.vinyl.handle_click();
        }
    }
}

/// Surface, renderers and the optional UI layer
pub struct GpuState {
    context: GpuContext,
    renderer: SceneRenderer,
    post: PostChain,
    ui: Option<UiLayer>,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, with_ui: bool) -> Result<Self> {
        let context = GpuContext::new(window.clone()).await?;
        let dims = context.dimensions();
        let renderer = SceneRenderer::new(context.device(), dims.width, dims.height);
        let post = PostChain::new(context.device(), context.surface_format(), dims);
        let ui = with_ui.then(|| UiLayer::new(&window, context.device(), context.surface_format()));

        Ok(Self {
            context,
            renderer,
            post,
            ui,
        })
    }

    pub fn resize(&mut self, dimensions: WindowDimensions) {
        if dimensions.is_empty() {
            return;
        }
        self.context.resize(dimensions.width, dimensions.height);
        self.renderer
            .resize(self.context.device(), dimensions.width, dimensions.height);
    }

    fn upload(&mut self, assets: &LoadedAssets, nodes: &SceneNodes, room: &RoomState) {
        self.renderer.upload_scene(
            self.context.device(),
            self.context.queue(),
            assets,
            nodes,
            &room.frame_materials(),
        );
        log::debug!("uploaded {} meshes", self.renderer.mesh_count());
    }

    fn render(&mut self, room: &mut RoomState, window: &Window) -> Result<()> {
        let output = match self.context.surface().get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(anyhow!("failed to acquire surface texture: {}", e)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let dims = self.context.dimensions();
        let camera = room
            .camera
            .to_uniform([dims.width as f32, dims.height as f32]);
        self.renderer
            .prepare(self.context.queue(), &camera, &room.frame_materials(), room.world());

        let device = self.context.device();
        let queue = self.context.queue();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        self.renderer
            .draw(&mut encoder, room.clear_color, room.draws_scene());

        self.post.sync(device, &mut room.post);
        self.post.run(
            device,
            queue,
            &mut encoder,
            self.renderer.output(),
            &view,
            &room.post,
        );

        let mut actions = PanelActions::default();
        if let Some(ui) = &mut self.ui {
            ui.paint(
                device,
                queue,
                &mut encoder,
                &view,
                window,
                [dims.width, dims.height],
                |ctx| {
                    let mut model = room.panel_model();
                    actions = panel::draw(ctx, &mut model);
                },
            );
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();

        room.apply(actions);
        Ok(())
    }
}

/// One frame's view of the room, handed to the pipeline
struct RoomFrame<'a> {
    room: &'a mut RoomState,
    gpu: &'a mut GpuState,
    window: &'a Window,
    cursor: &'a mut CursorIcon,
    result: Result<()>,
}

impl FrameHost for RoomFrame<'_> {
    fn for_each_tickable(&mut self, f: &mut dyn FnMut(&mut dyn FrameTickable)) {
        self.room.tick_all(f);
        self.room.sync_vinyl_pose();
    }

    fn pointer_ndc(&self) -> Option<Vec2> {
        if self.room.ui_wants_pointer {
            return None;
        }
        self.room.input.pointer_ndc()
    }

    fn camera_ray(&self, ndc: Vec2) -> Ray {
        self.room.camera.pick_ray(ndc)
    }

    fn pick(&self, ray: &Ray) -> Option<NodeId> {
        self.room.picker.pick(ray).map(|hit| hit.node)
    }

    fn on_hover(&mut self, transition: HoverTransition, hovered: Option<NodeId>) {
        self.room.hovered = hovered;
        match transition {
            HoverTransition::Entered => log::debug!("hover enter {:?}", hovered),
            HoverTransition::Left => log::debug!("hover leave"),
            HoverTransition::None => {}
        }
        self.room.vinyl.cursor_mut().set_hovering(hovered.is_some());

        let icon = self.room.vinyl.cursor().icon();
        if icon != *self.cursor {
            self.window.set_cursor(match icon {
                CursorIcon::Pointer => winit::window::CursorIcon::Pointer,
                CursorIcon::Default => winit::window::CursorIcon::Default,
            });
            *self.cursor = icon;
        }
    }

    fn update_controls(&mut self, _delta: f32) {
        let room = &mut *self.room;
        room.handle_shortcuts();
        room.handle_click();

        if !room.ui_wants_pointer {
            let height = room.dimensions.height as f32;
            room.camera.rotate(room.input.drag_delta(), height);
            room.camera.zoom(room.input.scroll_lines());
        }
        room.camera.update();
    }

    fn render(&mut self, _frame: &FrameInfo) {
        self.result = self.gpu.render(self.room, self.window);
    }
}

/// Event loop handler; window and GPU come up on the first resume
pub struct App {
    config: SceneConfig,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    room: Option<RoomState>,
    loader: Option<AssetLoader>,
    pipeline: Option<FramePipeline>,
    cursor: CursorIcon,
    fps_timer: FixedHz,
    frame_count: u32,
    exit_code: i32,
}

impl App {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            window: None,
            gpu: None,
            room: None,
            loader: None,
            pipeline: None,
            cursor: CursorIcon::Default,
            fps_timer: FixedHz::new(1.0),
            frame_count: 0,
            exit_code: 0,
        }
    }

    /// Non-zero when the scene could not be loaded
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let settings = &self.config.window;
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(settings.title.clone())
                        .with_inner_size(winit::dpi::LogicalSize::new(
                            settings.width,
                            settings.height,
                        )),
                )
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(GpuState::new(window.clone(), self.config.show_ui))?;
        let dims = gpu.context.dimensions();
        let pixel_ratio = clamp_pixel_ratio(window.scale_factor());
        let system_dark = window.theme().map(|theme| theme == Theme::Dark);

        let room = RoomState::new(
            self.config.clone(),
            dims,
            pixel_ratio,
            system_dark,
            gpu.context.is_webgpu_compliant(),
        );
        let loader = AssetLoader::spawn(self.config.assets.clone())?;

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.room = Some(room);
        self.loader = Some(loader);
        self.pipeline = Some(FramePipeline::new(Box::new(Clock::new())));
        Ok(())
    }

    /// Drain loader events; `Err` means the scene cannot be shown
    fn poll_loader(&mut self) -> Result<()> {
        let (Some(loader), Some(room), Some(gpu)) =
            (&mut self.loader, &mut self.room, &mut self.gpu)
        else {
            return Ok(());
        };

        for event in loader.poll() {
            match event {
                LoadEvent::Progress { loaded, total } => room.overlay.on_progress(loaded, total),
                LoadEvent::Loaded(assets) => {
                    let mut assets = *assets;
                    let nodes = room.attach_scene(&mut assets.graph)?;
                    gpu.upload(&assets, &nodes, room);
                    room.store_scene(assets.graph);
                    room.overlay.on_load_complete();
                }
                LoadEvent::Failed(err) => return Err(err.context("failed to load scene assets")),
            }
        }
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        self.poll_loader()?;

        let (Some(window), Some(gpu), Some(room), Some(pipeline)) = (
            &self.window,
            &mut self.gpu,
            &mut self.room,
            &mut self.pipeline,
        ) else {
            return Ok(());
        };
        room.ui_wants_pointer = gpu.ui.as_ref().is_some_and(UiLayer::wants_pointer);

        let mut frame = RoomFrame {
            room,
            gpu,
            window,
            cursor: &mut self.cursor,
            result: Ok(()),
        };
        let info = pipeline.run_frame(&mut frame);
        if let Err(e) = frame.result {
            log::error!("Render error: {:#}", e);
        }

        room.input.reset_deltas();
        self.update_fps(info.delta);
        Ok(())
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        if self.fps_timer.tick(delta) {
            log::debug!("FPS: {:.1}", self.frame_count as f32 / self.fps_timer.interval);
            self.frame_count = 0;
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        let (Some(window), Some(gpu), Some(room)) =
            (&self.window, &mut self.gpu, &mut self.room)
        else {
            return;
        };
        let dims = WindowDimensions::new(width, height);
        gpu.resize(dims);
        room.resize(dims, clamp_pixel_ratio(window.scale_factor()));
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        self.exit_code = 1;
        if let Some(room) = &mut self.room {
            room.vinyl.dispose();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                eprintln!("Failed to initialize scene: {:#}", e);
                self.exit_code = 1;
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(gpu), Some(window)) = (&mut self.gpu, &self.window) {
            if let Some(ui) = &mut gpu.ui {
                if ui.handle_event(window, &event) {
                    return;
                }
            }
        }

        if let Some(room) = &mut self.room {
            room.input.process_event(&event);
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if let Some(room) = &mut self.room {
                    room.vinyl.dispose();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.resize(size.width, size.height);
                }
            }
            WindowEvent::ThemeChanged(theme) => {
                if let Some(room) = &mut self.room {
                    room.dark_mode.on_system_theme(theme == Theme::Dark);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_waits_for_window() {
        let app = App::new(SceneConfig::default());
        assert!(app.pipeline.is_none(), "frame clock started before init");
        assert!(app.room.is_none());
        assert_eq!(app.exit_code(), 0);
    }
}
