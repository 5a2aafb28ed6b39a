//! Pluggable camera positioning strategies.
//!
//! A [`CameraController`] reacts to game-state notifications by recording a
//! pending pose edit, and applies it on the next
//! [`CameraController::advance`]. Exactly one controller is active per
//! session; the session owns it as a [`SharedController`] and subscribes
//! it to the game state.
//!
//! - [`VantageController`] - fixed vantage points by play mode (default)
//! - [`ScriptedPanController`] - continuous orbit recentred on the ball
//! - [`FreeNavigationController`] - user-driven free flight

mod free;
mod kind;
mod pan;
mod vantage;

use std::cell::RefCell;
use std::rc::Rc;

pub use free::{FreeNavigationController, MoveIntent};
pub use kind::ControllerKind;
pub use pan::ScriptedPanController;
pub use vantage::{Vantage, VantageController};

use crate::camera::ProjectionCamera;
use crate::error::NotificationFault;
use crate::game::{GameState, GameStateListener};

/// Whether a controller has an edit in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPhase {
    /// Nothing pending.
    #[default]
    Idle,
    /// A game-state change was received and its edit has not finished
    /// applying.
    Reacting,
}

/// Strategy deciding where the camera goes.
pub trait CameraController {
    /// React to a game-state change. Runs inline inside the game state's
    /// dispatch, so it only records what to do; the camera is edited in
    /// [`CameraController::advance`]. Repeated identical states must not
    /// queue duplicate edits.
    fn on_game_state_changed(
        &mut self,
        state: &GameState,
    ) -> Result<(), NotificationFault>;

    /// Apply pending edits and run continuous behavior for one frame.
    fn advance(&mut self, elapsed_ms: f64, camera: &mut ProjectionCamera);

    /// Current phase.
    fn phase(&self) -> ControllerPhase;

    /// Which registered kind this is.
    fn kind(&self) -> ControllerKind;

    /// Forward user navigation input. Controllers that are not
    /// user-driven ignore it.
    fn set_move_intent(&mut self, _intent: MoveIntent) {}

    /// Name for logging.
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

impl GameStateListener for Box<dyn CameraController> {
    fn on_game_state_changed(
        &mut self,
        state: &GameState,
    ) -> Result<(), NotificationFault> {
        (**self).on_game_state_changed(state)
    }
}

/// Shared handle to the active controller. The session holds the only
/// strong reference; the game state keeps a weak one.
pub type SharedController = Rc<RefCell<Box<dyn CameraController>>>;

/// Wrap a controller for subscription.
pub fn shared<C: CameraController + 'static>(
    controller: C,
) -> SharedController {
    let boxed: Box<dyn CameraController> = Box::new(controller);
    Rc::new(RefCell::new(boxed))
}
