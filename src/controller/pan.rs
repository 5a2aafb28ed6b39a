use glam::Vec3;

use super::{CameraController, ControllerKind, ControllerPhase};
use crate::camera::ProjectionCamera;
use crate::error::NotificationFault;
use crate::game::GameState;

/// Orbits a center point at constant angular speed, always looking at it.
/// Each game-state change recenters the orbit on the ball.
#[derive(Debug, Clone)]
pub struct ScriptedPanController {
    center: Vec3,
    /// Orbit angle in degrees; 0 puts the eye on the -Z side of the center.
    angle: f32,
    /// Degrees per second.
    speed: f32,
    radius: f32,
    height: f32,
    pending_center: Option<Vec3>,
    phase: ControllerPhase,
}

impl ScriptedPanController {
    /// Create an orbit around the field center.
    #[must_use]
    pub fn new(speed: f32, radius: f32, height: f32) -> Self {
        Self {
            center: Vec3::ZERO,
            angle: 0.0,
            speed,
            radius: radius.max(0.0),
            height,
            pending_center: None,
            phase: ControllerPhase::Idle,
        }
    }

    /// Current orbit center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Eye position on the orbit at the current angle.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        self.center
            + Vec3::new(self.radius * sin, self.height, -self.radius * cos)
    }
}

impl CameraController for ScriptedPanController {
    fn on_game_state_changed(
        &mut self,
        state: &GameState,
    ) -> Result<(), NotificationFault> {
        let Some(ball) = state.ball() else {
            return Ok(());
        };
        let center = Vec3::new(ball.position.x, 0.0, ball.position.z);
        let queued = self.pending_center.unwrap_or(self.center);
        if center != queued {
            self.pending_center = Some(center);
            self.phase = ControllerPhase::Reacting;
        }
        Ok(())
    }

    fn advance(&mut self, elapsed_ms: f64, camera: &mut ProjectionCamera) {
        if let Some(center) = self.pending_center.take() {
            log::debug!("pan recentred on {center}");
            self.center = center;
            self.phase = ControllerPhase::Idle;
        }
        let dt = (elapsed_ms / 1000.0) as f32;
        self.angle = (self.angle + self.speed * dt).rem_euclid(360.0);
        camera.set_position(self.eye());
        camera.look_at(self.center);
    }

    fn phase(&self) -> ControllerPhase {
        self.phase
    }

    fn kind(&self) -> ControllerKind {
        ControllerKind::ScriptedPan
    }
}
