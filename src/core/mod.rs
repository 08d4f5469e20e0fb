pub mod acts;
pub mod bundle;
pub mod camera;
pub mod glow;
pub mod media;
pub mod particles;
pub mod ramp;
pub mod run;
pub mod style;
pub mod teardown;
pub mod trigger;

pub use acts::*;
pub use camera::Camera;
pub use run::{FrameVisuals, LoopPhase, WarpRun};

// Shaders bundled as string constants
pub static STARS_WGSL: &str = include_str!("../../shaders/stars.wgsl");
pub static GLOW_WGSL: &str = include_str!("../../shaders/glow.wgsl");
