//! Synchronous listener registry for game-state change notifications.
//!
//! Listeners are held weakly and addressed by the [`ListenerId`] returned
//! from registration. Owners remove their subscription explicitly; if an
//! owner is dropped without doing so, its dead entry is pruned before the
//! next dispatch and its callback never runs again.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::GameState;
use crate::error::NotificationFault;

/// Receives game-state change notifications.
pub trait GameStateListener {
    /// Called inline by the game state after each notifying mutation.
    ///
    /// Must not block. An `Err` is logged by the dispatcher and does not
    /// affect other listeners or future notifications.
    fn on_game_state_changed(
        &mut self,
        state: &GameState,
    ) -> Result<(), NotificationFault>;
}

/// Handle identifying one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

type WeakListener = Weak<RefCell<dyn GameStateListener>>;

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    entries: Vec<(ListenerId, WeakListener)>,
}

impl ListenerRegistry {
    /// Register a listener. Registering the same listener twice returns the
    /// existing handle.
    pub(crate) fn add<L: GameStateListener + 'static>(
        &mut self,
        listener: &Rc<RefCell<L>>,
    ) -> ListenerId {
        let weak = Rc::downgrade(listener);
        let weak: WeakListener = weak;
        if let Some((id, _)) =
            self.entries.iter().find(|(_, w)| Weak::ptr_eq(w, &weak))
        {
            log::debug!("{id} already registered");
            return *id;
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, weak));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Drop entries whose listener no longer exists.
    pub(crate) fn prune(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|(_, weak)| weak.strong_count() > 0);
        let pruned = before - self.entries.len();
        if pruned > 0 {
            log::debug!("pruned {pruned} dropped listener(s)");
        }
    }

    /// Number of registrations whose listener is still alive.
    pub(crate) fn live_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    pub(crate) fn dispatch(&self, state: &GameState) {
        for (id, weak) in &self.entries {
            let Some(listener) = weak.upgrade() else {
                continue;
            };
            let Ok(mut listener) = listener.try_borrow_mut() else {
                log::warn!("{id} is busy; skipping re-entrant notification");
                continue;
            };
            if let Err(fault) = listener.on_game_state_changed(state) {
                log::error!("{id} failed to handle game-state change: {fault}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::game::{FieldDimensions, PlayMode};

    struct Counter {
        seen: Rc<Cell<usize>>,
        fail: bool,
    }

    impl GameStateListener for Counter {
        fn on_game_state_changed(
            &mut self,
            _state: &GameState,
        ) -> Result<(), NotificationFault> {
            self.seen.set(self.seen.get() + 1);
            if self.fail {
                Err(NotificationFault::new("deliberate"))
            } else {
                Ok(())
            }
        }
    }

    fn counter(fail: bool) -> (Rc<RefCell<Counter>>, Rc<Cell<usize>>) {
        let seen = Rc::new(Cell::new(0));
        let listener = Rc::new(RefCell::new(Counter {
            seen: Rc::clone(&seen),
            fail,
        }));
        (listener, seen)
    }

    #[test]
    fn concrete_and_boxed_listeners_share_one_registry() {
        use crate::controller::{
            CameraController, ControllerPhase, VantageController,
        };
        use crate::game::Team;

        let mut state = GameState::new(FieldDimensions::STANDARD);
        let (listener, seen) = counter(false);
        let boxed: Box<dyn CameraController> =
            Box::new(VantageController::instant());
        let controller = Rc::new(RefCell::new(boxed));

        let first = state.add_listener(&listener);
        let second = state.add_listener(&controller);
        assert_ne!(first, second);
        assert_eq!(state.listener_count(), 2);

        state.set_play_mode(PlayMode::KickOff(Team::Left));
        assert_eq!(seen.get(), 1);
        assert_eq!(controller.borrow().phase(), ControllerPhase::Reacting);
    }

    #[test]
    fn faulty_listener_does_not_starve_others() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let (faulty, faulty_seen) = counter(true);
        let (healthy, healthy_seen) = counter(false);
        let _ = state.add_listener(&faulty);
        let _ = state.add_listener(&healthy);

        state.set_play_mode(PlayMode::PlayOn);
        state.set_play_mode(PlayMode::GameOver);

        assert_eq!(faulty_seen.get(), 2);
        assert_eq!(healthy_seen.get(), 2);
        assert_eq!(state.listener_count(), 2);
    }

    #[test]
    fn removed_listener_is_not_notified() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let (listener, seen) = counter(false);
        let id = state.add_listener(&listener);
        assert!(state.remove_listener(id));
        assert!(!state.remove_listener(id));

        state.set_play_mode(PlayMode::PlayOn);
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn duplicate_registration_reuses_handle() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let (listener, seen) = counter(false);
        let first = state.add_listener(&listener);
        let second = state.add_listener(&listener);
        assert_eq!(first, second);

        state.set_play_mode(PlayMode::PlayOn);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn dropped_listener_is_pruned() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let (listener, _) = counter(false);
        let _ = state.add_listener(&listener);
        drop(listener);

        assert_eq!(state.listener_count(), 0);
        state.set_play_mode(PlayMode::PlayOn);
        assert_eq!(state.listener_count(), 0);
    }

    #[test]
    fn busy_listener_is_skipped() {
        let mut state = GameState::new(FieldDimensions::STANDARD);
        let (listener, seen) = counter(false);
        let _ = state.add_listener(&listener);

        let guard = listener.borrow_mut();
        state.set_play_mode(PlayMode::PlayOn);
        drop(guard);
        assert_eq!(seen.get(), 0);

        state.set_play_mode(PlayMode::GameOver);
        assert_eq!(seen.get(), 1);
    }
}
