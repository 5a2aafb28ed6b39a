//! Viewer camera options with TOML preset support.
//!
//! Camera pose and lens, stereo, tracking and controller settings are
//! consolidated here. Every section uses `#[serde(default)]` so partial TOML
//! files (e.g. only overriding `[tracking]`) work.

mod camera;
mod controller;
mod stereo;
mod tracking;

use std::path::Path;

pub use camera::CameraOptions;
pub use controller::ControllerOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use stereo::StereoOptions;
pub use tracking::TrackingOptions;

use crate::error::CameraError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Initial pose, lens and free-motion parameters.
    pub camera: CameraOptions,
    /// Stereo output parameters.
    pub stereo: StereoOptions,
    /// Target-tracking parameters.
    pub tracking: TrackingOptions,
    /// Controller selection and behavior.
    pub controller: ControllerOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, CameraError> {
        toml::from_str(content)
            .map_err(|e| CameraError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CameraError> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Check the motion, tracking and controller parameters. The pose and
    /// stereo values are checked when the camera is built.
    pub fn validate(&self) -> Result<(), CameraError> {
        let camera = &self.camera;
        check("camera.damping", camera.damping, camera.damping >= 0.0)?;
        check(
            "camera.move_speed",
            camera.move_speed,
            camera.move_speed >= 0.0,
        )?;
        check(
            "camera.turn_speed",
            camera.turn_speed,
            camera.turn_speed >= 0.0,
        )?;
        check(
            "camera.pitch_limit",
            camera.pitch_limit,
            (0.0..=90.0).contains(&camera.pitch_limit),
        )?;

        let tracking = &self.tracking;
        check(
            "tracking.smoothing",
            tracking.smoothing,
            tracking.smoothing > 0.0,
        )?;
        check(
            "tracking.framing_radius",
            tracking.framing_radius,
            tracking.framing_radius >= 0.0,
        )?;
        check(
            "tracking.elevation",
            tracking.elevation,
            (0.0..90.0).contains(&tracking.elevation),
        )?;
        check(
            "tracking.settle_tolerance",
            tracking.settle_tolerance,
            tracking.settle_tolerance > 0.0,
        )?;

        let controller = &self.controller;
        let transition = controller.vantage_transition_ms;
        if !(transition.is_finite() && transition >= 0.0) {
            return Err(CameraError::InvalidParameter(format!(
                "controller.vantage_transition_ms = {transition} is out of \
                 range"
            )));
        }
        check(
            "controller.pan_speed",
            controller.pan_speed,
            controller.pan_speed.is_finite(),
        )?;
        check(
            "controller.pan_radius",
            controller.pan_radius,
            controller.pan_radius > 0.0,
        )?;
        check(
            "controller.pan_height",
            controller.pan_height,
            controller.pan_height.is_finite(),
        )
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CameraError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CameraError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// `value` must be finite and satisfy `in_range`.
fn check(name: &str, value: f32, in_range: bool) -> Result<(), CameraError> {
    if value.is_finite() && in_range {
        Ok(())
    } else {
        Err(CameraError::InvalidParameter(format!(
            "{name} = {value} is out of range"
        )))
    }
}
