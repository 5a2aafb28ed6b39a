use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{
    CameraController, FreeNavigationController, ScriptedPanController,
    VantageController,
};
use crate::options::Options;

/// Registry of the available controller strategies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Fixed vantage points chosen by play mode.
    #[default]
    Vantage,
    /// Continuous orbit recentred on the ball.
    ScriptedPan,
    /// User-driven free flight.
    FreeNavigation,
}

impl ControllerKind {
    /// Every registered kind.
    pub const ALL: [Self; 3] =
        [Self::Vantage, Self::ScriptedPan, Self::FreeNavigation];

    /// Build a controller of this kind from `options`.
    #[must_use]
    pub fn build(self, options: &Options) -> Box<dyn CameraController> {
        let controller = &options.controller;
        match self {
            Self::Vantage => Box::new(VantageController::new(
                controller.vantage_transition_ms,
                controller.easing,
            )),
            Self::ScriptedPan => Box::new(ScriptedPanController::new(
                controller.pan_speed,
                controller.pan_radius,
                controller.pan_height,
            )),
            Self::FreeNavigation => Box::new(FreeNavigationController::new(
                options.camera.move_speed,
                options.camera.turn_speed,
            )),
        }
    }

    /// Stable name for logging.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Vantage => "vantage",
            Self::ScriptedPan => "scripted_pan",
            Self::FreeNavigation => "free_navigation",
        }
    }
}

impl std::fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
