//! Camera session: the composition root.
//!
//! A [`CameraSession`] owns the projection camera, the active controller
//! (and its game-state subscription) and the tracking overlay, and advances
//! them once per rendered frame in a fixed order:
//!
//! 1. camera motion integration
//! 2. controller (applies edits queued by game-state notifications)
//! 3. tracking overlay, against the current viewport
//!
//! Picking is on demand through [`CameraSession::picker`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::camera::{
    check_timestep, CameraPose, CameraUniform, Eye, ProjectionCamera,
};
use crate::controller::{
    CameraController, ControllerKind, ControllerPhase, MoveIntent,
    SharedController,
};
use crate::error::CameraError;
use crate::game::{EntityId, GameState, ListenerId};
use crate::options::Options;
use crate::picking::{ObjectPicker, SceneQuery};
use crate::tracking::{TargetTracker, TrackStatus};
use crate::viewport::{SurfaceCapabilities, Viewport};

/// What one [`CameraSession::update`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Controller phase after its advance.
    pub phase: ControllerPhase,
    /// Tracking outcome for this frame.
    pub tracking: TrackStatus,
    /// Camera pose at the end of the frame.
    pub pose: CameraPose,
}

/// Owns and sequences the camera, controller and tracking overlay.
pub struct CameraSession {
    camera: ProjectionCamera,
    controller: SharedController,
    /// Handle of the controller's game-state subscription.
    subscription: Option<ListenerId>,
    tracker: TargetTracker,
    viewport: Viewport,
    capabilities: SurfaceCapabilities,
    frames: u64,
}

impl CameraSession {
    /// Build the camera, controller and tracker from `options` and
    /// subscribe the controller to `state`.
    ///
    /// Stereo is enabled only when the surface negotiated it and the
    /// options ask for it. Invalid options fail here with
    /// [`CameraError::InvalidParameter`].
    pub fn new(
        capabilities: SurfaceCapabilities,
        viewport: Viewport,
        state: &mut GameState,
        options: &Options,
    ) -> Result<Self, CameraError> {
        options.validate()?;
        let mut camera = ProjectionCamera::new(options.camera.pose())?
            .with_surface(capabilities)
            .with_damping(options.camera.damping)
            .with_pitch_limit(options.camera.pitch_limit);
        if capabilities.stereo && options.stereo.enabled {
            camera.enable_stereo(
                options.stereo.focal_length,
                options.stereo.eye_separation,
            )?;
        }

        let stereo = camera.stereo().is_some();
        let kind = options.controller.kind;
        let controller: SharedController =
            Rc::new(RefCell::new(kind.build(options)));
        let subscription = state.add_listener(&controller);
        log::info!(
            "camera session started: {kind} controller, {}x{}, stereo {}",
            viewport.width,
            viewport.height,
            stereo
        );

        Ok(Self {
            camera,
            controller,
            subscription: Some(subscription),
            tracker: TargetTracker::new(&options.tracking),
            viewport: Viewport { stereo, ..viewport },
            capabilities,
            frames: 0,
        })
    }

    /// Advance one frame.
    ///
    /// An invalid `elapsed_ms` (negative, NaN or infinite) skips the whole
    /// frame: nothing is advanced and the session stays usable.
    pub fn update(
        &mut self,
        elapsed_ms: f64,
        state: &GameState,
    ) -> Result<FrameReport, CameraError> {
        if let Err(e) = check_timestep(elapsed_ms) {
            log::warn!("skipping frame {}: {e}", self.frames);
            return Err(e);
        }
        self.camera.advance(elapsed_ms)?;

        let phase = {
            let mut controller = self.controller.borrow_mut();
            controller.advance(elapsed_ms, &mut self.camera);
            controller.phase()
        };

        let tracking = self.tracker.advance(
            elapsed_ms,
            self.viewport,
            state,
            &mut self.camera,
        );

        self.frames += 1;
        Ok(FrameReport {
            phase,
            tracking,
            pose: self.camera.current_pose(),
        })
    }

    /// Swap the active controller. The old subscription is removed before
    /// the new one is added, so exactly one controller listens at a time.
    pub fn replace_controller(
        &mut self,
        controller: Box<dyn CameraController>,
        state: &mut GameState,
    ) {
        let previous = self.controller_kind();
        if let Some(id) = self.subscription.take() {
            let _ = state.remove_listener(id);
        }
        let next = controller.kind();
        self.controller = Rc::new(RefCell::new(controller));
        self.subscription = Some(state.add_listener(&self.controller));
        log::info!("camera controller {previous} -> {next}");
    }

    /// Select or clear the tracking target.
    pub fn set_target(&mut self, target: Option<EntityId>, state: &GameState) {
        self.tracker.set_target(target, state);
    }

    /// Window-resize notification. The stereo flag follows the camera.
    pub fn resize(&mut self, viewport: Viewport) {
        let viewport = Viewport {
            stereo: self.camera.stereo().is_some(),
            ..viewport
        };
        if viewport != self.viewport {
            log::debug!(
                "viewport resized to {}x{}",
                viewport.width,
                viewport.height
            );
        }
        self.viewport = viewport;
    }

    /// Forward held navigation input to the active controller.
    pub fn set_move_intent(&mut self, intent: MoveIntent) {
        self.controller.borrow_mut().set_move_intent(intent);
    }

    /// Turn on stereo after construction. Fails unless the surface
    /// negotiated stereo and stereo is not already on.
    pub fn enable_stereo(
        &mut self,
        focal_length: f32,
        eye_separation: f32,
    ) -> Result<(), CameraError> {
        self.camera.enable_stereo(focal_length, eye_separation)?;
        self.viewport.stereo = true;
        Ok(())
    }

    /// Picker over the current camera and viewport.
    #[must_use]
    pub fn picker<'a, S: SceneQuery + ?Sized>(
        &'a self,
        scene: &'a S,
    ) -> ObjectPicker<'a, S> {
        ObjectPicker::new(&self.camera, self.viewport, scene)
    }

    /// Renderer hand-off for one eye at the current viewport aspect.
    #[must_use]
    pub fn uniform(&self, eye: Eye) -> CameraUniform {
        self.camera.uniform(eye, self.viewport.aspect())
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &ProjectionCamera {
        &self.camera
    }

    /// Mutable camera, for direct pose edits.
    pub fn camera_mut(&mut self) -> &mut ProjectionCamera {
        &mut self.camera
    }

    /// The tracking overlay.
    #[must_use]
    pub fn tracker(&self) -> &TargetTracker {
        &self.tracker
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Capabilities the session was created with.
    #[must_use]
    pub fn capabilities(&self) -> SurfaceCapabilities {
        self.capabilities
    }

    /// Kind of the active controller.
    #[must_use]
    pub fn controller_kind(&self) -> ControllerKind {
        self.controller.borrow().kind()
    }

    /// Phase of the active controller.
    #[must_use]
    pub fn controller_phase(&self) -> ControllerPhase {
        self.controller.borrow().phase()
    }

    /// Handle of the controller's game-state subscription.
    #[must_use]
    pub fn subscription(&self) -> Option<ListenerId> {
        self.subscription
    }

    /// Frames advanced so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Unsubscribe from `state` and drop the session.
    pub fn shutdown(mut self, state: &mut GameState) {
        if let Some(id) = self.subscription.take() {
            let _ = state.remove_listener(id);
        }
        log::info!("camera session stopped after {} frames", self.frames);
    }
}

impl std::fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraSession")
            .field("camera", &self.camera)
            .field("controller", &self.controller_kind())
            .field("subscription", &self.subscription)
            .field("tracker", &self.tracker)
            .field("viewport", &self.viewport)
            .field("frames", &self.frames)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::game::{FieldDimensions, PlayMode, Team};

    fn session(
        capabilities: SurfaceCapabilities,
        state: &mut GameState,
    ) -> CameraSession {
        CameraSession::new(
            capabilities,
            Viewport::default(),
            state,
            &Options::default(),
        )
        .unwrap()
    }

    #[test]
    fn construction_uses_configured_pose() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let session = session(SurfaceCapabilities::MONO, &mut state);
        let pose = session.camera().current_pose();
        assert_eq!(pose.position, Vec3::new(0.0, 7.0, -10.0));
        assert_eq!(pose.rotation, Vec2::new(-40.0, 180.0));
        assert!(session.camera().stereo().is_none());
        assert_eq!(state.listener_count(), 1);
        assert_eq!(session.controller_kind(), ControllerKind::Vantage);
    }

    #[test]
    fn stereo_surface_enables_stereo() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let mut session = session(SurfaceCapabilities::STEREO, &mut state);
        let stereo = session.camera().stereo().unwrap();
        assert_eq!(stereo.focal_length, 8.0);
        assert_eq!(stereo.eye_separation, 0.15);
        assert!(session.viewport().stereo);
        assert!(matches!(
            session.enable_stereo(8.0, 0.15),
            Err(CameraError::StereoAlreadyEnabled)
        ));
    }

    #[test]
    fn invalid_options_fail_construction() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let mut options = Options::default();
        options.camera.znear = 300.0;
        assert!(matches!(
            CameraSession::new(
                SurfaceCapabilities::MONO,
                Viewport::default(),
                &mut state,
                &options,
            ),
            Err(CameraError::InvalidParameter(_))
        ));
        assert_eq!(state.listener_count(), 0);
    }

    #[test]
    fn nan_pitch_limit_fails_construction() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let options =
            Options::from_toml("[camera]\npitch_limit = nan").unwrap();
        assert!(matches!(
            CameraSession::new(
                SurfaceCapabilities::MONO,
                Viewport::default(),
                &mut state,
                &options,
            ),
            Err(CameraError::InvalidParameter(_))
        ));
        assert_eq!(state.listener_count(), 0);
    }

    #[test]
    fn invalid_timestep_skips_whole_frame() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let mut session = session(SurfaceCapabilities::MONO, &mut state);
        session.camera_mut().set_velocity(Vec3::X);
        state.set_play_mode(PlayMode::KickOff(Team::Right));
        assert_eq!(session.controller_phase(), ControllerPhase::Reacting);

        let before = session.camera().current_pose();
        assert!(matches!(
            session.update(-5.0, &state),
            Err(CameraError::InvalidTimestep(_))
        ));
        assert_eq!(session.camera().current_pose(), before);
        assert_eq!(session.controller_phase(), ControllerPhase::Reacting);
        assert_eq!(session.frames(), 0);

        let report = session.update(16.0, &state).unwrap();
        assert_eq!(report.phase, ControllerPhase::Reacting);
        assert_eq!(session.frames(), 1);
    }

    #[test]
    fn shutdown_unsubscribes() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let session = session(SurfaceCapabilities::MONO, &mut state);
        assert!(session.subscription().is_some());
        session.shutdown(&mut state);
        assert_eq!(state.listener_count(), 0);
    }
}
