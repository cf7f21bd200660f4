pub mod clock;
pub mod controller;
pub mod frame;
pub mod gpu_context;
pub mod input_adapter;
pub mod timer;
pub mod tween;
pub mod window;

pub use clock::{Clock, ManualClock, TimeSource};
pub use controller::{Button, Controller};
pub use frame::FrameInfo;
pub use gpu_context::GpuContext;
pub use input_adapter::WinitController;
pub use timer::{Countdown, FixedHz};
pub use tween::{Animatable, Ease, Repeat, Tween, TweenHandle, TweenSet};
pub use window::{clamp_pixel_ratio, WindowDimensions};
