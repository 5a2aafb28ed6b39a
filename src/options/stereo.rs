use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stereo output parameters, applied only when the render surface
/// negotiated stereo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stereo", inline)]
#[serde(default)]
pub struct StereoOptions {
    /// Request stereo when the surface supports it.
    #[schemars(title = "Enable Stereo")]
    pub enabled: bool,
    /// Distance to the zero-parallax plane.
    #[schemars(title = "Focal Length", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub focal_length: f32,
    /// Interocular distance in metres.
    #[schemars(title = "Eye Separation", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub eye_separation: f32,
}

impl Default for StereoOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            focal_length: 8.0,
            eye_separation: 0.15,
        }
    }
}
