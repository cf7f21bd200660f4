//! Imported model, typed node wiring and background asset loading.

mod graph;
mod loader;
pub mod nodes;

pub use graph::{MeshPrimitive, SceneGraph, SceneNode};
pub use loader::{
    load_model, load_texture, AssetLoader, AssetPaths, LoadEvent, LoadedAssets, TextureData,
};
pub use nodes::{MaterialSlot, NodeId, NodeLookup, SceneNodes};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("model is missing required nodes: {}", .0.join(", "))]
    MissingNodes(Vec<String>),
    #[error("model contains no nodes")]
    EmptyModel,
}
