use glam::{Mat4, Vec2, Vec3};

use super::frustum::Frustum;
use super::pose::{
    forward_from_rotation, rotation_towards, validate_fov, CameraPose,
};
use super::stereo::{Eye, StereoParameters};
use crate::error::CameraError;
use crate::viewport::SurfaceCapabilities;

/// Default pitch limit in degrees; keeps the view direction off the poles.
pub const DEFAULT_PITCH_LIMIT: f32 = 89.0;

/// First-person perspective camera with damped free motion and optional
/// stereo output.
///
/// The camera is the single source of truth for the current pose.
/// Controllers and the tracking overlay edit it through the setters below;
/// [`ProjectionCamera::advance`] integrates velocity between frames.
#[derive(Debug, Clone)]
pub struct ProjectionCamera {
    pose: CameraPose,
    stereo: Option<StereoParameters>,
    stereo_negotiated: bool,
    /// World-space velocity in units per second.
    velocity: Vec3,
    /// Pitch/yaw rates in degrees per second.
    angular_velocity: Vec2,
    /// Exponential velocity decay rate (1/s). Zero disables damping.
    damping: f32,
    pitch_limit: f32,
}

/// Velocities below this are snapped to zero after damping.
const REST_EPSILON: f32 = 1e-6;

impl ProjectionCamera {
    /// Create a camera at `pose`. Fails with
    /// [`CameraError::InvalidParameter`] if the pose violates its
    /// invariants; values are never clamped.
    pub fn new(pose: CameraPose) -> Result<Self, CameraError> {
        pose.validate()?;
        Ok(Self {
            pose,
            stereo: None,
            stereo_negotiated: false,
            velocity: Vec3::ZERO,
            angular_velocity: Vec2::ZERO,
            damping: 0.0,
            pitch_limit: DEFAULT_PITCH_LIMIT,
        })
    }

    /// Record what the render surface negotiated. Stereo can only be
    /// enabled on a camera whose surface reported stereo support.
    #[must_use]
    pub fn with_surface(mut self, capabilities: SurfaceCapabilities) -> Self {
        self.stereo_negotiated = capabilities.stereo;
        self
    }

    /// Set the velocity damping rate (1/s). Negative or non-finite rates
    /// are ignored.
    #[must_use]
    pub fn with_damping(mut self, damping: f32) -> Self {
        if damping.is_finite() && damping >= 0.0 {
            self.damping = damping;
        } else {
            log::warn!("ignoring invalid damping rate {damping}");
        }
        self
    }

    /// Set the maximum absolute pitch in degrees. Limits outside
    /// [0, 90] are ignored.
    #[must_use]
    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        if (0.0..=90.0).contains(&limit) {
            self.pitch_limit = limit;
        } else {
            log::warn!("ignoring invalid pitch limit {limit}");
        }
        self
    }

    /// Turn on stereo output. Allowed once, and only when the surface
    /// negotiated stereo.
    pub fn enable_stereo(
        &mut self,
        focal_length: f32,
        eye_separation: f32,
    ) -> Result<(), CameraError> {
        if !self.stereo_negotiated {
            return Err(CameraError::UnsupportedCapability(
                "render surface did not negotiate stereo output".into(),
            ));
        }
        if self.stereo.is_some() {
            return Err(CameraError::StereoAlreadyEnabled);
        }
        self.stereo = Some(StereoParameters::new(focal_length, eye_separation)?);
        log::debug!(
            "stereo enabled: focal length {focal_length}, eye separation \
             {eye_separation}"
        );
        Ok(())
    }

    /// Stereo parameters, if stereo has been enabled.
    #[must_use]
    pub fn stereo(&self) -> Option<&StereoParameters> {
        self.stereo.as_ref()
    }

    /// Integrate in-flight motion over `elapsed_ms` milliseconds.
    ///
    /// Uses the closed-form solution of exponentially damped velocity, so
    /// one call with `t1 + t2` lands where two calls with `t1` and `t2` do.
    pub fn advance(&mut self, elapsed_ms: f64) -> Result<(), CameraError> {
        check_timestep(elapsed_ms)?;
        if elapsed_ms == 0.0 {
            return Ok(());
        }
        let dt = (elapsed_ms / 1000.0) as f32;

        let (travel, decay) = if self.damping > 0.0 {
            let decay = (-self.damping * dt).exp();
            ((1.0 - decay) / self.damping, decay)
        } else {
            (dt, 1.0)
        };

        self.pose.position += self.velocity * travel;
        if self.angular_velocity != Vec2::ZERO {
            let rotation = self.pose.rotation + self.angular_velocity * travel;
            self.set_rotation(rotation);
        }

        self.velocity *= decay;
        self.angular_velocity *= decay;
        if self.velocity.length_squared() < REST_EPSILON * REST_EPSILON {
            self.velocity = Vec3::ZERO;
        }
        if self.angular_velocity.length_squared()
            < REST_EPSILON * REST_EPSILON
        {
            self.angular_velocity = Vec2::ZERO;
        }
        Ok(())
    }

    /// The latest committed pose.
    #[must_use]
    pub fn current_pose(&self) -> CameraPose {
        self.pose
    }

    /// Eye position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Move the eye without touching orientation or velocity.
    pub fn set_position(&mut self, position: Vec3) {
        if position.is_finite() {
            self.pose.position = position;
        } else {
            log::warn!("ignoring non-finite camera position {position}");
        }
    }

    /// Set pitch/yaw in degrees. Pitch is clamped to the pitch limit and
    /// yaw wrapped to [0, 360).
    pub fn set_rotation(&mut self, rotation: Vec2) {
        if !rotation.is_finite() {
            log::warn!("ignoring non-finite camera rotation {rotation}");
            return;
        }
        self.pose.rotation = Vec2::new(
            rotation.x.max(-self.pitch_limit).min(self.pitch_limit),
            rotation.y.rem_euclid(360.0),
        );
    }

    /// Change the vertical field of view.
    pub fn set_fov(&mut self, fov: f32) -> Result<(), CameraError> {
        validate_fov(fov)?;
        self.pose.fov = fov;
        Ok(())
    }

    /// Turn to face `target`. Does nothing when `target` is the eye.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(rotation) = rotation_towards(target - self.pose.position) {
            self.set_rotation(rotation);
        }
    }

    /// World-space velocity in units per second.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Set the world-space velocity in units per second.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        if velocity.is_finite() {
            self.velocity = velocity;
        }
    }

    /// Set pitch/yaw rates in degrees per second.
    pub fn set_angular_velocity(&mut self, angular_velocity: Vec2) {
        if angular_velocity.is_finite() {
            self.angular_velocity = angular_velocity;
        }
    }

    /// Cancel all in-flight motion.
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec2::ZERO;
    }

    /// Whether any motion is still being integrated.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.velocity != Vec3::ZERO || self.angular_velocity != Vec2::ZERO
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        forward_from_rotation(self.pose.rotation)
    }

    /// Unit vector pointing to the right of the view direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward()
            .cross(Vec3::Y)
            .try_normalize()
            .unwrap_or(Vec3::X)
    }

    /// Unit vector pointing up relative to the view direction.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// World-to-view transform for the mono camera.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.pose.position, self.forward(), Vec3::Y)
    }

    /// Perspective projection for the given aspect ratio. Depth maps to
    /// [0, 1].
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.pose.fov.to_radians(),
            aspect,
            self.pose.near,
            self.pose.far,
        )
    }

    /// Combined projection * view.
    #[must_use]
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// View matrix for one eye. Without stereo every eye is the mono view.
    #[must_use]
    pub fn eye_view(&self, eye: Eye) -> Mat4 {
        match self.stereo {
            Some(stereo) if eye != Eye::Center => {
                let eye_pos =
                    self.pose.position + self.right() * stereo.eye_offset(eye);
                Mat4::look_to_rh(eye_pos, self.forward(), Vec3::Y)
            }
            _ => self.view_matrix(),
        }
    }

    /// Projection for one eye. Without stereo every eye is the mono
    /// projection.
    #[must_use]
    pub fn eye_projection(&self, eye: Eye, aspect: f32) -> Mat4 {
        match self.stereo {
            Some(stereo) if eye != Eye::Center => stereo.projection(
                eye,
                self.pose.fov,
                aspect,
                self.pose.near,
                self.pose.far,
            ),
            _ => self.projection_matrix(aspect),
        }
    }

    /// View frustum for visibility tests.
    #[must_use]
    pub fn frustum(&self, aspect: f32) -> Frustum {
        Frustum::from_view_projection(self.view_projection(aspect))
    }

    /// Snapshot for upload by an external renderer.
    #[must_use]
    pub fn uniform(&self, eye: Eye, aspect: f32) -> CameraUniform {
        let view_proj = self.eye_projection(eye, aspect) * self.eye_view(eye);
        let offset = self
            .stereo
            .map_or(0.0, |stereo| stereo.eye_offset(eye));
        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            position: (self.pose.position + self.right() * offset).to_array(),
            aspect,
            forward: self.forward().to_array(),
            fovy: self.pose.fov,
            near: self.pose.near,
            far: self.pose.far,
            eye: eye.sign(),
            _pad: 0.0,
        }
    }
}

/// Reject negative, NaN and infinite frame times.
pub(crate) fn check_timestep(elapsed_ms: f64) -> Result<(), CameraError> {
    if elapsed_ms.is_finite() && elapsed_ms >= 0.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidTimestep(elapsed_ms))
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Eye world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// -1 left eye, +1 right eye, 0 mono.
    pub eye: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn broadcast_pose() -> CameraPose {
        CameraPose::new(
            Vec3::new(0.0, 7.0, -10.0),
            Vec2::new(-40.0, 180.0),
            45.0,
            0.1,
            200.0,
        )
    }

    #[test]
    fn construction_reports_exact_pose() {
        let camera = ProjectionCamera::new(broadcast_pose()).unwrap();
        let pose = camera.current_pose();
        assert_eq!(pose.position, Vec3::new(0.0, 7.0, -10.0));
        assert_eq!(pose.rotation, Vec2::new(-40.0, 180.0));
        assert_eq!(pose.fov, 45.0);
        assert_eq!(pose.near, 0.1);
        assert_eq!(pose.far, 200.0);
    }

    #[test]
    fn any_valid_lens_is_reported_verbatim() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let near = rng.random_range(0.001..10.0_f32);
            let far = near + rng.random_range(0.001..1000.0_f32);
            let fov = rng.random_range(0.01..179.99_f32);
            let pose =
                CameraPose::new(Vec3::ZERO, Vec2::ZERO, fov, near, far);
            let camera = ProjectionCamera::new(pose).unwrap();
            assert_eq!(camera.current_pose(), pose);
        }
    }

    #[test]
    fn inverted_clip_planes_are_rejected() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let far = rng.random_range(0.001..100.0_f32);
            let near = far + rng.random_range(0.0..100.0_f32);
            let pose =
                CameraPose::new(Vec3::ZERO, Vec2::ZERO, 45.0, near, far);
            assert!(matches!(
                ProjectionCamera::new(pose),
                Err(CameraError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn stereo_requires_negotiation() {
        let mut camera = ProjectionCamera::new(broadcast_pose()).unwrap();
        assert!(matches!(
            camera.enable_stereo(8.0, 0.15),
            Err(CameraError::UnsupportedCapability(_))
        ));
        assert!(camera.stereo().is_none());
    }

    #[test]
    fn stereo_is_enabled_once() {
        let mut camera = ProjectionCamera::new(broadcast_pose())
            .unwrap()
            .with_surface(SurfaceCapabilities::STEREO);
        camera.enable_stereo(8.0, 0.15).unwrap();
        assert!(matches!(
            camera.enable_stereo(4.0, 0.1),
            Err(CameraError::StereoAlreadyEnabled)
        ));
        assert_eq!(camera.stereo().unwrap().focal_length, 8.0);
    }

    #[test]
    fn bad_timesteps_leave_state_untouched() {
        let mut camera = ProjectionCamera::new(broadcast_pose()).unwrap();
        camera.set_velocity(Vec3::X);
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                camera.advance(bad),
                Err(CameraError::InvalidTimestep(_))
            ));
        }
        assert_eq!(camera.position(), Vec3::new(0.0, 7.0, -10.0));
        assert_eq!(camera.velocity(), Vec3::X);
    }

    #[test]
    fn invalid_motion_settings_keep_defaults() {
        let mut camera = ProjectionCamera::new(broadcast_pose())
            .unwrap()
            .with_pitch_limit(f32::NAN)
            .with_damping(f32::NAN);
        camera.set_angular_velocity(Vec2::new(500.0, 0.0));
        camera.advance(1000.0).unwrap();
        assert_eq!(camera.current_pose().rotation.x, DEFAULT_PITCH_LIMIT);

        let mut camera = ProjectionCamera::new(broadcast_pose())
            .unwrap()
            .with_pitch_limit(120.0)
            .with_damping(-3.0);
        camera.set_velocity(Vec3::X);
        camera.advance(1000.0).unwrap();
        assert_eq!(camera.velocity(), Vec3::X);
    }

    #[test]
    fn translation_leaves_unnormalized_rotation_alone() {
        let pose = CameraPose::new(
            Vec3::ZERO,
            Vec2::new(120.0, 360.0),
            45.0,
            0.1,
            200.0,
        );
        let mut camera = ProjectionCamera::new(pose).unwrap();
        camera.set_velocity(Vec3::Z);
        camera.advance(500.0).unwrap();
        assert_eq!(camera.current_pose().rotation, Vec2::new(120.0, 360.0));
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn zero_advance_is_idempotent() {
        let mut camera =
            ProjectionCamera::new(broadcast_pose()).unwrap().with_damping(2.0);
        camera.set_velocity(Vec3::new(1.0, 0.5, -2.0));
        camera.set_angular_velocity(Vec2::new(3.0, 10.0));
        let before = camera.current_pose();
        for _ in 0..10 {
            camera.advance(0.0).unwrap();
        }
        assert_eq!(camera.current_pose(), before);
        assert_eq!(camera.velocity(), Vec3::new(1.0, 0.5, -2.0));
    }

    #[test]
    fn split_advance_matches_single_advance() {
        for damping in [0.0, 1.5, 6.0] {
            let mut one = ProjectionCamera::new(broadcast_pose())
                .unwrap()
                .with_damping(damping);
            one.set_velocity(Vec3::new(2.0, -1.0, 3.0));
            one.set_angular_velocity(Vec2::new(5.0, 20.0));
            let mut two = one.clone();

            one.advance(50.0).unwrap();
            two.advance(20.0).unwrap();
            two.advance(30.0).unwrap();

            let (a, b) = (one.current_pose(), two.current_pose());
            assert!(a.position.abs_diff_eq(b.position, 1e-4), "{damping}");
            assert!(a.rotation.abs_diff_eq(b.rotation, 1e-3), "{damping}");
            assert!(one.velocity().abs_diff_eq(two.velocity(), 1e-4));
        }
    }

    #[test]
    fn damping_brings_camera_to_rest() {
        let mut camera =
            ProjectionCamera::new(broadcast_pose()).unwrap().with_damping(4.0);
        camera.set_velocity(Vec3::new(0.0, 0.0, 5.0));
        for _ in 0..600 {
            camera.advance(16.0).unwrap();
        }
        assert!(!camera.is_moving());
        // Total travel of damped motion is v / k.
        let travelled = camera.position().z + 10.0;
        assert!((travelled - 5.0 / 4.0).abs() < 1e-3, "{travelled}");
    }

    #[test]
    fn pitch_is_clamped_and_yaw_wrapped() {
        let mut camera = ProjectionCamera::new(broadcast_pose()).unwrap();
        camera.set_rotation(Vec2::new(120.0, -90.0));
        assert_eq!(camera.current_pose().rotation, Vec2::new(89.0, 270.0));
    }

    #[test]
    fn look_at_aims_forward_at_target() {
        let mut camera = ProjectionCamera::new(broadcast_pose()).unwrap();
        camera.look_at(Vec3::new(5.0, 0.0, 5.0));
        let expected = (Vec3::new(5.0, 0.0, 5.0) - camera.position()).normalize();
        assert!(camera.forward().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn default_pose_looks_at_field_center() {
        let camera = ProjectionCamera::new(broadcast_pose()).unwrap();
        let clip = camera.view_projection(16.0 / 9.0)
            * Vec3::new(0.0, 0.0, 0.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 0.05, "{ndc}");
        assert!(ndc.y.abs() < 0.5, "{ndc}");
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn eye_views_straddle_mono_view() {
        let mut camera = ProjectionCamera::new(broadcast_pose())
            .unwrap()
            .with_surface(SurfaceCapabilities::STEREO);
        assert_eq!(camera.eye_view(Eye::Left), camera.view_matrix());

        camera.enable_stereo(8.0, 0.15).unwrap();
        let left = camera.uniform(Eye::Left, 1.0);
        let right = camera.uniform(Eye::Right, 1.0);
        let mid = (Vec3::from_array(left.position)
            + Vec3::from_array(right.position))
            * 0.5;
        assert!(mid.abs_diff_eq(camera.position(), 1e-5));
        let gap = Vec3::from_array(left.position)
            .distance(Vec3::from_array(right.position));
        assert!((gap - 0.15).abs() < 1e-5);
        assert_eq!(camera.eye_view(Eye::Center), camera.view_matrix());
    }
}
