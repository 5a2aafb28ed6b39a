//! Projection camera: pose, lens, stereo rig, damped free motion and the
//! matrices handed to the renderer.

mod core;
/// View frustum extraction and intersection tests.
pub mod frustum;
mod pose;
mod stereo;

pub use self::core::{CameraUniform, ProjectionCamera, DEFAULT_PITCH_LIMIT};
pub(crate) use self::core::check_timestep;
pub use frustum::Frustum;
pub use pose::CameraPose;
pub use stereo::{Eye, StereoParameters};
