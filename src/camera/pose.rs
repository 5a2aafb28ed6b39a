use glam::{Vec2, Vec3};

use crate::error::CameraError;

/// Position, orientation and lens of a camera.
///
/// Rotation is stored as Euler angles in degrees: `x` is pitch (positive
/// looks up), `y` is yaw (0 looks down -Z, 180 looks down +Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Pitch (`x`) and yaw (`y`) in degrees.
    pub rotation: Vec2,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl CameraPose {
    /// Build a pose without validating it. See [`Self::validate`].
    #[must_use]
    pub fn new(
        position: Vec3,
        rotation: Vec2,
        fov: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            rotation,
            fov,
            near,
            far,
        }
    }

    /// Check the pose invariants: everything finite, `0 < near < far`,
    /// `0 < fov < 180`.
    pub fn validate(&self) -> Result<(), CameraError> {
        if !self.position.is_finite() || !self.rotation.is_finite() {
            return Err(CameraError::InvalidParameter(format!(
                "non-finite position {} or rotation {}",
                self.position, self.rotation
            )));
        }
        if !self.near.is_finite() || !self.far.is_finite() {
            return Err(CameraError::InvalidParameter(format!(
                "non-finite clip planes near {} far {}",
                self.near, self.far
            )));
        }
        if self.near <= 0.0 {
            return Err(CameraError::InvalidParameter(format!(
                "near plane {} must be positive",
                self.near
            )));
        }
        if self.near >= self.far {
            return Err(CameraError::InvalidParameter(format!(
                "near plane {} must be closer than far plane {}",
                self.near, self.far
            )));
        }
        validate_fov(self.fov)
    }

    /// Unit view direction for this pose's rotation.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        forward_from_rotation(self.rotation)
    }
}

/// Field of view must lie strictly inside (0, 180) degrees.
pub(crate) fn validate_fov(fov: f32) -> Result<(), CameraError> {
    if fov.is_finite() && fov > 0.0 && fov < 180.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidParameter(format!(
            "field of view {fov} must lie in (0, 180) degrees"
        )))
    }
}

/// Forward vector for a pitch/yaw pair in degrees.
pub(crate) fn forward_from_rotation(rotation: Vec2) -> Vec3 {
    let pitch = rotation.x.to_radians();
    let yaw = rotation.y.to_radians();
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
    .normalize()
}

/// Pitch/yaw in degrees that look along `direction`. Yaw is wrapped to
/// [0, 360). Returns `None` for a zero-length direction.
pub(crate) fn rotation_towards(direction: Vec3) -> Option<Vec2> {
    let dir = direction.try_normalize()?;
    let pitch = dir.y.clamp(-1.0, 1.0).asin().to_degrees();
    let yaw = (-dir.x).atan2(-dir.z).to_degrees().rem_euclid(360.0);
    Some(Vec2::new(pitch, yaw))
}
