use glam::Vec3;

use super::{CameraController, ControllerKind, ControllerPhase};
use crate::camera::ProjectionCamera;
use crate::error::NotificationFault;
use crate::game::{FieldDimensions, GameState, PlayMode};
use crate::util::easing::Easing;

/// A camera placement: where the eye sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vantage {
    /// Eye position.
    pub position: Vec3,
    /// Point the camera aims at.
    pub focus: Vec3,
}

impl Vantage {
    /// Broadcast overview from the near touch line.
    #[must_use]
    pub fn overview(field: FieldDimensions) -> Self {
        Self {
            position: Vec3::new(
                0.0,
                field.length * 7.0 / 30.0,
                -field.width * 0.5,
            ),
            focus: Vec3::ZERO,
        }
    }

    /// Vantage for a referee decision, or `None` when the mode does not
    /// warrant a cut.
    #[must_use]
    pub fn for_play_mode(
        mode: PlayMode,
        field: FieldDimensions,
    ) -> Option<Self> {
        let half_length = field.length * 0.5;
        let half_width = field.width * 0.5;
        match mode {
            PlayMode::BeforeKickOff
            | PlayMode::KickOff(_)
            | PlayMode::Goal(_)
            | PlayMode::GameOver => Some(Self::overview(field)),
            PlayMode::GoalKick(team) => {
                let side = team.goal_side();
                Some(Self {
                    position: Vec3::new(
                        side * half_length * 1.2,
                        field.length * 0.2,
                        0.0,
                    ),
                    focus: Vec3::new(side * half_length * 0.3, 0.0, 0.0),
                })
            }
            PlayMode::CornerKick(team) => {
                let side = team.opponent().goal_side();
                Some(Self {
                    position: Vec3::new(
                        side * half_length * 1.1,
                        field.length * 0.2,
                        -half_width * 1.1,
                    ),
                    focus: Vec3::new(side * half_length * 0.8, 0.0, 0.0),
                })
            }
            PlayMode::PlayOn
            | PlayMode::KickIn(_)
            | PlayMode::FreeKick(_)
            | PlayMode::DirectFreeKick(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    from_position: Vec3,
    from_focus: Vec3,
    to: Vantage,
    elapsed_ms: f64,
}

/// Cuts (or eases) to a fixed vantage point whenever the play mode changes
/// to one that has a vantage.
#[derive(Debug, Clone)]
pub struct VantageController {
    transition_ms: f64,
    easing: Easing,
    last_mode: Option<PlayMode>,
    pending: Option<Vantage>,
    transition: Option<Transition>,
    phase: ControllerPhase,
}

impl VantageController {
    /// Create a controller. A non-positive `transition_ms` cuts instantly.
    #[must_use]
    pub fn new(transition_ms: f64, easing: Easing) -> Self {
        Self {
            transition_ms: if transition_ms.is_finite() {
                transition_ms.max(0.0)
            } else {
                0.0
            },
            easing,
            last_mode: None,
            pending: None,
            transition: None,
            phase: ControllerPhase::Idle,
        }
    }

    /// Controller that cuts without easing.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(0.0, Easing::Linear)
    }

    fn cut(camera: &mut ProjectionCamera, vantage: Vantage) {
        camera.stop();
        camera.set_position(vantage.position);
        camera.look_at(vantage.focus);
    }

    fn step_transition(
        &mut self,
        elapsed_ms: f64,
        camera: &mut ProjectionCamera,
    ) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        transition.elapsed_ms += elapsed_ms;
        let progress = (transition.elapsed_ms / self.transition_ms).min(1.0);
        let t = self.easing.evaluate(progress as f32);

        camera.set_position(
            transition.from_position.lerp(transition.to.position, t),
        );
        camera.look_at(transition.from_focus.lerp(transition.to.focus, t));

        if progress >= 1.0 {
            log::debug!("vantage transition complete");
            self.transition = None;
            self.phase = ControllerPhase::Idle;
        }
    }
}

impl Default for VantageController {
    fn default() -> Self {
        Self::new(750.0, Easing::default())
    }
}

impl CameraController for VantageController {
    fn on_game_state_changed(
        &mut self,
        state: &GameState,
    ) -> Result<(), NotificationFault> {
        let field = state.field();
        if !field.is_valid() {
            return Err(NotificationFault::new(format!(
                "field dimensions {} x {} cannot place a vantage",
                field.length, field.width
            )));
        }
        let mode = state.play_mode();
        if self.last_mode == Some(mode) {
            return Ok(());
        }
        self.last_mode = Some(mode);
        if let Some(vantage) = Vantage::for_play_mode(mode, field) {
            log::debug!("vantage queued for {mode:?}");
            self.pending = Some(vantage);
            self.phase = ControllerPhase::Reacting;
        }
        Ok(())
    }

    fn advance(&mut self, elapsed_ms: f64, camera: &mut ProjectionCamera) {
        if let Some(vantage) = self.pending.take() {
            if self.transition_ms <= 0.0 {
                Self::cut(camera, vantage);
                self.transition = None;
                self.phase = ControllerPhase::Idle;
                return;
            }
            camera.stop();
            let from_position = camera.position();
            let from_focus = from_position
                + camera.forward() * from_position.distance(vantage.focus);
            self.transition = Some(Transition {
                from_position,
                from_focus,
                to: vantage,
                elapsed_ms: 0.0,
            });
        }
        self.step_transition(elapsed_ms, camera);
    }

    fn phase(&self) -> ControllerPhase {
        self.phase
    }

    fn kind(&self) -> ControllerKind {
        ControllerKind::Vantage
    }
}
