use glam::{Vec2, Vec3};

use super::{CameraController, ControllerKind, ControllerPhase};
use crate::camera::ProjectionCamera;
use crate::error::NotificationFault;
use crate::game::GameState;

/// Held navigation input, each axis in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveIntent {
    /// Along the view direction.
    pub forward: f32,
    /// Along the camera's right vector.
    pub right: f32,
    /// Along world up.
    pub up: f32,
    /// Yaw rate; positive turns left.
    pub yaw: f32,
    /// Pitch rate; positive looks up.
    pub pitch: f32,
}

impl MoveIntent {
    /// Whether no axis is engaged.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    fn clamped(self) -> Self {
        Self {
            forward: self.forward.clamp(-1.0, 1.0),
            right: self.right.clamp(-1.0, 1.0),
            up: self.up.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            pitch: self.pitch.clamp(-1.0, 1.0),
        }
    }
}

/// User-driven free flight. Ignores game-state events entirely.
///
/// While input is held the camera velocity tracks it; once released the
/// camera's damping brings it to rest.
#[derive(Debug, Clone)]
pub struct FreeNavigationController {
    intent: MoveIntent,
    /// Metres per second at full deflection.
    move_speed: f32,
    /// Degrees per second at full deflection.
    turn_speed: f32,
    was_active: bool,
}

impl FreeNavigationController {
    /// Create a controller with the given full-deflection speeds.
    #[must_use]
    pub fn new(move_speed: f32, turn_speed: f32) -> Self {
        Self {
            intent: MoveIntent::default(),
            move_speed,
            turn_speed,
            was_active: false,
        }
    }

    /// Input currently held.
    #[must_use]
    pub fn intent(&self) -> MoveIntent {
        self.intent
    }
}

impl CameraController for FreeNavigationController {
    fn on_game_state_changed(
        &mut self,
        _state: &GameState,
    ) -> Result<(), NotificationFault> {
        Ok(())
    }

    fn advance(&mut self, _elapsed_ms: f64, camera: &mut ProjectionCamera) {
        if self.intent.is_idle() {
            self.was_active = false;
            return;
        }
        if !self.was_active {
            log::debug!("free navigation engaged");
            self.was_active = true;
        }
        let intent = self.intent;
        let velocity = (camera.forward() * intent.forward
            + camera.right() * intent.right
            + Vec3::Y * intent.up)
            * self.move_speed;
        camera.set_velocity(velocity);
        camera.set_angular_velocity(
            Vec2::new(intent.pitch, intent.yaw) * self.turn_speed,
        );
    }

    fn phase(&self) -> ControllerPhase {
        ControllerPhase::Idle
    }

    fn kind(&self) -> ControllerKind {
        ControllerKind::FreeNavigation
    }

    fn set_move_intent(&mut self, intent: MoveIntent) {
        self.intent = intent.clamped();
    }
}
