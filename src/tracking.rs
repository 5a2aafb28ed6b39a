//! Target-tracking overlay.
//!
//! Once a target entity is selected, [`TargetTracker::advance`] glides the
//! camera toward a framing point behind and above the target and keeps it
//! aimed there. The follow is exponential in elapsed time
//! (`alpha = 1 - e^(-smoothing * t)`), so the result depends on how much
//! time passed rather than how many frames were drawn.

use glam::{Vec2, Vec3};

use crate::camera::ProjectionCamera;
use crate::game::{EntityId, GameState};
use crate::options::TrackingOptions;
use crate::viewport::Viewport;

/// Outcome of one tracking step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackStatus {
    /// No target, or nothing to draw into. The camera was not touched.
    #[default]
    Inactive,
    /// Moving toward the framing point.
    Tracking {
        /// Remaining distance to the framing point after this step.
        distance: f32,
    },
    /// At the framing point; the camera is left where it is.
    Settled,
    /// The target entity no longer resolves. The selection is kept in case
    /// the entity comes back.
    TargetLost,
}

/// Smoothly follows a selected entity.
#[derive(Debug, Clone)]
pub struct TargetTracker {
    target: Option<EntityId>,
    /// Game-state generation the target was last validated against.
    generation: u64,
    smoothing: f32,
    framing_radius: f32,
    elevation: f32,
    settle_tolerance: f32,
    lost: bool,
    status: TrackStatus,
}

/// Horizontal bearing used when the eye is directly above the target.
const FALLBACK_BEARING: Vec2 = Vec2::new(0.0, -1.0);

impl TargetTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new(options: &TrackingOptions) -> Self {
        Self {
            target: None,
            generation: 0,
            smoothing: options.smoothing.max(0.0),
            framing_radius: options.framing_radius.max(0.0),
            elevation: options.elevation.clamp(0.0, 89.0),
            settle_tolerance: options.settle_tolerance.max(0.0),
            lost: false,
            status: TrackStatus::Inactive,
        }
    }

    /// Select an entity to follow, or `None` to stop tracking.
    pub fn set_target(&mut self, target: Option<EntityId>, state: &GameState) {
        match target {
            Some(id) => log::debug!("tracking {id}"),
            None if self.target.is_some() => log::debug!("tracking cleared"),
            None => {}
        }
        self.target = target;
        self.generation = state.generation();
        self.lost = false;
        self.status = TrackStatus::Inactive;
    }

    /// Currently selected entity.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Status returned by the last [`TargetTracker::advance`].
    #[must_use]
    pub fn status(&self) -> TrackStatus {
        self.status
    }

    /// Eye-to-target distance at which a sphere of the framing radius
    /// fills the narrower of the two fields of view.
    #[must_use]
    pub fn framing_distance(&self, fov_degrees: f32, aspect: f32) -> f32 {
        let vertical = fov_degrees.to_radians();
        let horizontal = 2.0 * ((vertical * 0.5).tan() * aspect).atan();
        let narrowest = vertical.min(horizontal);
        self.framing_radius / (narrowest * 0.5).tan()
    }

    /// Framing point for a target at `target` seen from `eye`: at
    /// `distance`, along the eye's current horizontal bearing, raised by
    /// the configured elevation.
    #[must_use]
    pub fn desired_eye(&self, target: Vec3, eye: Vec3, distance: f32) -> Vec3 {
        let offset = eye - target;
        let bearing = Vec2::new(offset.x, offset.z)
            .try_normalize()
            .unwrap_or(FALLBACK_BEARING);
        let (sin, cos) = self.elevation.to_radians().sin_cos();
        target
            + Vec3::new(bearing.x * cos, sin, bearing.y * cos) * distance
    }

    /// Run one tracking step against the latest game state.
    pub fn advance(
        &mut self,
        elapsed_ms: f64,
        viewport: Viewport,
        state: &GameState,
        camera: &mut ProjectionCamera,
    ) -> TrackStatus {
        self.status = self.step(elapsed_ms, viewport, state, camera);
        self.status
    }

    fn step(
        &mut self,
        elapsed_ms: f64,
        viewport: Viewport,
        state: &GameState,
        camera: &mut ProjectionCamera,
    ) -> TrackStatus {
        let Some(id) = self.target else {
            return TrackStatus::Inactive;
        };

        if state.generation() != self.generation {
            self.generation = state.generation();
            if state.entity(id).is_none() {
                log::info!("tracked entity {id} did not survive reset");
                self.target = None;
                self.lost = false;
                return TrackStatus::Inactive;
            }
        }

        if viewport.is_empty() {
            return TrackStatus::Inactive;
        }

        let Some(target) = state.entity_position(id) else {
            if !self.lost {
                log::warn!("tracked entity {id} no longer exists");
                self.lost = true;
            }
            return TrackStatus::TargetLost;
        };
        if self.lost {
            log::info!("tracked entity {id} reacquired");
            self.lost = false;
        }

        let distance =
            self.framing_distance(camera.current_pose().fov, viewport.aspect());
        let desired = self.desired_eye(target, camera.position(), distance);
        if camera.position().distance(desired) <= self.settle_tolerance {
            return TrackStatus::Settled;
        }

        camera.stop();
        let dt = (elapsed_ms / 1000.0) as f32;
        let alpha = 1.0 - (-self.smoothing * dt).exp();
        let eye = camera.position().lerp(desired, alpha);
        camera.set_position(eye);
        if eye.distance_squared(target) > 1e-6 {
            camera.look_at(target);
        }

        let remaining = eye.distance(desired);
        if remaining <= self.settle_tolerance {
            TrackStatus::Settled
        } else {
            TrackStatus::Tracking {
                distance: remaining,
            }
        }
    }
}

impl Default for TargetTracker {
    fn default() -> Self {
        Self::new(&TrackingOptions::default())
    }
}
