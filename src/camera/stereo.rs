//! Parallel-axis stereo projection.
//!
//! Each eye is offset by half the eye separation along the camera's right
//! vector and gets an asymmetric (off-axis) frustum so that both frusta
//! converge on the plane at `focal_length` in front of the camera.

use glam::{Mat4, Vec4};

use crate::error::CameraError;

/// Which view to build matrices for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// The mono (cyclopean) camera.
    Center,
    /// Left eye of a stereo pair.
    Left,
    /// Right eye of a stereo pair.
    Right,
}

impl Eye {
    /// -1 for the left eye, +1 for the right eye, 0 for center.
    #[must_use]
    pub fn sign(self) -> f32 {
        match self {
            Self::Center => 0.0,
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Stereo rig parameters, present only once stereo has been negotiated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoParameters {
    /// Distance to the zero-parallax plane.
    pub focal_length: f32,
    /// Distance between the two eyes.
    pub eye_separation: f32,
}

impl StereoParameters {
    /// Validate and build stereo parameters.
    pub fn new(
        focal_length: f32,
        eye_separation: f32,
    ) -> Result<Self, CameraError> {
        if !(focal_length.is_finite() && focal_length > 0.0) {
            return Err(CameraError::InvalidParameter(format!(
                "stereo focal length {focal_length} must be positive"
            )));
        }
        if !(eye_separation.is_finite() && eye_separation > 0.0) {
            return Err(CameraError::InvalidParameter(format!(
                "stereo eye separation {eye_separation} must be positive"
            )));
        }
        Ok(Self {
            focal_length,
            eye_separation,
        })
    }

    /// Signed offset of an eye from the mono camera along its right vector.
    #[must_use]
    pub fn eye_offset(&self, eye: Eye) -> f32 {
        eye.sign() * self.eye_separation * 0.5
    }

    /// Off-axis projection for one eye. `fov` is vertical, in degrees.
    #[must_use]
    pub fn projection(
        &self,
        eye: Eye,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Mat4 {
        let top = near * (fov.to_radians() * 0.5).tan();
        let half_width = top * aspect;
        // Shift the frustum window opposite to the eye offset, scaled from
        // the focal plane back to the near plane.
        let shift = -self.eye_offset(eye) * near / self.focal_length;
        off_axis_rh(
            -half_width + shift,
            half_width + shift,
            -top,
            top,
            near,
            far,
        )
    }
}

/// Right-handed off-axis perspective with depth mapped to [0, 1], matching
/// `Mat4::perspective_rh` when the window is symmetric.
pub(crate) fn off_axis_rh(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far / (near - far);
    Mat4::from_cols(
        Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vec4::new(
            (right + left) / width,
            (top + bottom) / height,
            depth,
            -1.0,
        ),
        Vec4::new(0.0, 0.0, depth * near, 0.0),
    )
}
