use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::graph::{MeshPrimitive, SceneGraph, SceneNode};
use super::nodes::NodeId;
use super::SceneError;

/// Where the model and its textures live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub model: PathBuf,
    /// Tiling noise shared by the flame and smoke shaders
    pub noise: PathBuf,
    pub baked_day: PathBuf,
    pub baked_night: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/cozy_place.glb"),
            noise: PathBuf::from("assets/perlin.png"),
            baked_day: PathBuf::from("assets/baked_day.jpg"),
            baked_night: PathBuf::from("assets/baked_night.jpg"),
        }
    }
}

/// Decoded RGBA8 image
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug)]
pub struct LoadedAssets {
    pub graph: SceneGraph,
    pub noise: TextureData,
    pub baked_day: TextureData,
    pub baked_night: TextureData,
}

#[derive(Debug)]
pub enum LoadEvent {
    Progress { loaded: usize, total: usize },
    Loaded(Box<LoadedAssets>),
    Failed(anyhow::Error),
}

/// Number of items reported through progress events
pub const ASSET_COUNT: usize = 4;

/// Loads a glTF/GLB file into a flat node graph
pub fn load_model(path: impl AsRef<Path>) -> Result<SceneGraph> {
    let path = path.as_ref();
    log::info!("Loading glTF file: {:?}", path);

    let (gltf, buffers, _images) =
        gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;

    log::debug!(
        "glTF loaded: {} scenes, {} nodes, {} meshes",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count()
    );

    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or(SceneError::EmptyModel)?;

    let mut graph = SceneGraph::new();
    for node in scene.nodes() {
        process_node(&node, &buffers, None, &mut graph)?;
    }

    if graph.is_empty() {
        return Err(SceneError::EmptyModel.into());
    }

    log::info!("Extracted {} nodes ({} with meshes)", graph.len(), graph.mesh_count());
    Ok(graph)
}

/// Recursively copies glTF nodes, parents first
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: Option<NodeId>,
    graph: &mut SceneGraph,
) -> Result<()> {
    let (translation, rotation, scale) = node.transform().decomposed();

    let mut scene_node = SceneNode::new(node.name().unwrap_or_default());
    scene_node.translation = Vec3::from_array(translation);
    scene_node.rotation = Quat::from_array(rotation);
    scene_node.scale = Vec3::from_array(scale);

    if let Some(mesh) = node.mesh() {
        scene_node.primitives = process_mesh(&mesh, buffers)?;
    }

    let id = graph.add(scene_node, parent);

    for child in node.children() {
        process_node(&child, buffers, Some(id), graph)?;
    }

    Ok(())
}

fn process_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Result<Vec<MeshPrimitive>> {
    let mut primitives = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("Skipping non-triangle primitive in mesh {:?}", mesh.name());
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .context(format!("Mesh {:?} primitive has no positions", mesh.name()))?
            .collect();

        if positions.is_empty() {
            continue;
        }

        let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
            Some(coords) => coords.into_f32().collect(),
            None => vec![[0.0, 0.0]; positions.len()],
        };

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        primitives.push(MeshPrimitive {
            positions,
            uvs,
            indices,
        });
    }

    Ok(primitives)
}

/// Decodes an image file to RGBA8
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureData> {
    let path = path.as_ref();
    let image = image::open(path)
        .context(format!("Failed to decode texture: {:?}", path))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    log::debug!("Loaded texture {:?} ({}x{})", path, width, height);

    Ok(TextureData {
        width,
        height,
        pixels: image.into_raw(),
    })
}

/// Loads every asset in order, reporting progress after each one
pub fn load_all(paths: &AssetPaths, mut report: impl FnMut(LoadEvent)) {
    match load_with_progress(paths, &mut report) {
        Ok(assets) => report(LoadEvent::Loaded(Box::new(assets))),
        Err(e) => report(LoadEvent::Failed(e)),
    }
}

fn load_with_progress(
    paths: &AssetPaths,
    report: &mut dyn FnMut(LoadEvent),
) -> Result<LoadedAssets> {
    let mut loaded = 0;
    let mut step = |report: &mut dyn FnMut(LoadEvent)| {
        loaded += 1;
        report(LoadEvent::Progress {
            loaded,
            total: ASSET_COUNT,
        });
    };

    let graph = load_model(&paths.model)?;
    step(report);
    let noise = load_texture(&paths.noise)?;
    step(report);
    let baked_day = load_texture(&paths.baked_day)?;
    step(report);
    let baked_night = load_texture(&paths.baked_night)?;
    step(report);

    Ok(LoadedAssets {
        graph,
        noise,
        baked_day,
        baked_night,
    })
}

/// Loads assets on a background thread and hands events to the frame loop
pub struct AssetLoader {
    receiver: Receiver<LoadEvent>,
    worker: Option<JoinHandle<()>>,
}

impl AssetLoader {
    pub fn spawn(paths: AssetPaths) -> Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("asset-loader".into())
            .spawn(move || Self::run(paths, sender))
            .context("failed to start asset loader thread")?;

        Ok(Self {
            receiver,
            worker: Some(worker),
        })
    }

    fn run(paths: AssetPaths, sender: Sender<LoadEvent>) {
        load_all(&paths, |event| {
            // The receiver is gone once the window closes
            let _ = sender.send(event);
        });
    }

    /// Loader over an existing channel
    pub fn from_receiver(receiver: Receiver<LoadEvent>) -> Self {
        Self {
            receiver,
            worker: None,
        }
    }

    /// Drain every event that arrived since the last poll
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        let events: Vec<LoadEvent> = self.receiver.try_iter().collect();
        let done = events
            .iter()
            .any(|e| matches!(e, LoadEvent::Loaded(_) | LoadEvent::Failed(_)));
        if done {
            if let Some(worker) = self.worker.take() {
                if worker.join().is_err() {
                    log::error!("asset loader thread panicked");
                }
            }
        }
        events
    }
}
