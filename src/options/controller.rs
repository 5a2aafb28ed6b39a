use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::controller::ControllerKind;
use crate::util::easing::Easing;

/// Camera controller selection and behavior parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controller", inline)]
#[serde(default)]
pub struct ControllerOptions {
    /// Controller built at session start.
    #[schemars(title = "Controller")]
    pub kind: ControllerKind,
    /// Duration of vantage transitions in milliseconds. Zero cuts
    /// instantly.
    #[schemars(title = "Transition Time", range(min = 0.0, max = 5000.0), extend("step" = 50.0))]
    pub vantage_transition_ms: f64,
    /// Easing curve for vantage transitions.
    #[schemars(skip)]
    pub easing: Easing,
    /// Scripted pan orbit speed in degrees per second.
    #[schemars(title = "Pan Speed", range(min = 0.0, max = 90.0), extend("step" = 1.0))]
    pub pan_speed: f32,
    /// Scripted pan orbit radius in metres.
    #[schemars(title = "Pan Radius", range(min = 1.0, max = 60.0), extend("step" = 1.0))]
    pub pan_radius: f32,
    /// Scripted pan eye height in metres.
    #[schemars(title = "Pan Height", range(min = 0.5, max = 40.0), extend("step" = 0.5))]
    pub pan_height: f32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            kind: ControllerKind::default(),
            vantage_transition_ms: 750.0,
            easing: Easing::default(),
            pan_speed: 12.0,
            pan_radius: 18.0,
            pan_height: 8.0,
        }
    }
}
