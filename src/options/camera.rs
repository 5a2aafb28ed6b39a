use glam::{Vec2, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraPose, DEFAULT_PITCH_LIMIT};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial camera pose, lens and free-motion parameters.
pub struct CameraOptions {
    /// Initial eye position `[x, y, z]`.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Initial `[pitch, yaw]` in degrees.
    #[schemars(skip)]
    pub rotation: [f32; 2],
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Velocity decay rate (1/s) for free motion.
    #[schemars(title = "Damping", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub damping: f32,
    /// Free-navigation speed in metres per second.
    #[schemars(title = "Move Speed", range(min = 0.5, max = 30.0), extend("step" = 0.5))]
    pub move_speed: f32,
    /// Free-navigation turn rate in degrees per second.
    #[schemars(title = "Turn Speed", range(min = 10.0, max = 360.0), extend("step" = 5.0))]
    pub turn_speed: f32,
    /// Maximum absolute pitch in degrees.
    #[schemars(skip)]
    pub pitch_limit: f32,
}

impl CameraOptions {
    /// The configured initial pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(
            Vec3::from_array(self.position),
            Vec2::from_array(self.rotation),
            self.fovy,
            self.znear,
            self.zfar,
        )
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 7.0, -10.0],
            rotation: [-40.0, 180.0],
            fovy: 45.0,
            znear: 0.1,
            zfar: 200.0,
            damping: 4.0,
            move_speed: 8.0,
            turn_speed: 90.0,
            pitch_limit: DEFAULT_PITCH_LIMIT,
        }
    }
}
