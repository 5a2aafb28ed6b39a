use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Target-tracking overlay parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tracking", inline)]
#[serde(default)]
pub struct TrackingOptions {
    /// Exponential follow rate (1/s). Higher values catch up faster.
    #[schemars(title = "Smoothing", range(min = 0.1, max = 20.0), extend("step" = 0.1))]
    pub smoothing: f32,
    /// Radius of the sphere around the target kept in view.
    #[schemars(title = "Framing Radius", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub framing_radius: f32,
    /// Camera elevation above the target in degrees.
    #[schemars(title = "Elevation", range(min = 0.0, max = 85.0), extend("step" = 1.0))]
    pub elevation: f32,
    /// Distance to the desired eye point below which tracking is settled.
    #[schemars(skip)]
    pub settle_tolerance: f32,
}

impl Default for TrackingOptions {
    fn default() -> Self {
        Self {
            smoothing: 4.0,
            framing_radius: 3.0,
            elevation: 35.0,
            settle_tolerance: 0.05,
        }
    }
}
