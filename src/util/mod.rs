//! Small shared helpers: easing curves for camera transitions and frame
//! cost measurement.

pub mod easing;
pub mod frame_timing;
