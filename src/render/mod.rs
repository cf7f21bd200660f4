//! GPU side of the room.
//!
//! [`SceneRenderer`] draws meshes, particles and the overlay into an HDR
//! target, [`PostChain`] runs the post passes over it into the surface, and
//! [`UiLayer`] paints the egui panel on top.

pub mod panel;
mod post;
mod renderer;
mod targets;
mod ui;

pub use panel::{PanelActions, PanelModel};
pub use post::PostChain;
pub use renderer::{FrameMaterials, SceneRenderer};
pub use targets::{RenderTarget, DEPTH_FORMAT, HDR_FORMAT};
pub use ui::UiLayer;
