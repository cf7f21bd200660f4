//! Scene-level state machines: theme, record player, loading overlay,
//! post-processing bookkeeping and pointer picking.

pub mod dark_mode;
pub mod feedback;
pub mod overlay;
pub mod picking;
pub mod post_processing;
pub mod vinyl;

pub use dark_mode::{DarkModeManager, ThemePresentation};
pub use feedback::{ControlTransform, HoverFeedback};
pub use overlay::{OverlayManager, OverlayUniforms};
pub use picking::{
    CursorIcon, CursorState, HoverState, HoverTransition, PickHit, PickTarget, Picker,
};
pub use post_processing::{BloomParams, PassKind, PassSlot, PostProcessingManager, RenderPath};
pub use vinyl::{PlaybackState, VinylPlayerManager, VinylPose};
