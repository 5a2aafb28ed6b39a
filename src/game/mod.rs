//! Match state observed by the viewer: referee play mode, clock, scores and
//! the positions of the ball and agents.
//!
//! The camera core only reads from [`GameState`]. Referee-level mutations
//! ([`GameState::set_play_mode`], [`GameState::set_time`],
//! [`GameState::set_score`], [`GameState::reset`]) notify registered
//! [`GameStateListener`]s synchronously, on the calling thread, before
//! returning. Entity motion is silent; per-frame readers poll positions.

mod entity;
mod listeners;
mod play_mode;

use std::cell::RefCell;
use std::rc::Rc;

pub use entity::{Entity, EntityId, EntityKind, Team};
use glam::Vec3;
pub use listeners::{GameStateListener, ListenerId};
use listeners::ListenerRegistry;
pub use play_mode::{FieldDimensions, PlayMode};
use rustc_hash::FxHashMap;

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The authoritative match state plus its listener registry.
pub struct GameState {
    field: FieldDimensions,
    play_mode: PlayMode,
    play_mode_changed: bool,
    time: f32,
    half_time: f32,
    scores: (u32, u32),
    entities: FxHashMap<EntityId, Entity>,
    next_entity_id: u32,
    /// Bumped on every [`GameState::reset`].
    generation: u64,
    listeners: ListenerRegistry,
}

impl GameState {
    /// Create an empty match on a field of the given size.
    #[must_use]
    pub fn new(field: FieldDimensions) -> Self {
        Self {
            field,
            play_mode: PlayMode::BeforeKickOff,
            play_mode_changed: false,
            time: 0.0,
            half_time: 300.0,
            scores: (0, 0),
            entities: FxHashMap::default(),
            next_entity_id: 0,
            generation: 0,
            listeners: ListenerRegistry::default(),
        }
    }

    // -- Listeners --

    /// Subscribe a listener to change notifications.
    pub fn add_listener<L: GameStateListener + 'static>(
        &mut self,
        listener: &Rc<RefCell<L>>,
    ) -> ListenerId {
        let id = self.listeners.add(listener);
        log::debug!("subscribed {id}");
        id
    }

    /// Unsubscribe a listener. Returns `false` if `id` was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id);
        if removed {
            log::debug!("unsubscribed {id}");
        }
        removed
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.live_count()
    }

    fn notify(&mut self) {
        self.listeners.prune();
        let state: &Self = self;
        state.listeners.dispatch(state);
    }

    // -- Referee state --

    /// Change the play mode and notify listeners.
    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.play_mode_changed = mode != self.play_mode;
        if self.play_mode_changed {
            log::info!("play mode {:?} -> {mode:?}", self.play_mode);
        }
        self.play_mode = mode;
        self.notify();
    }

    /// Advance the match clock (seconds) and notify listeners.
    pub fn set_time(&mut self, time: f32) {
        self.play_mode_changed = false;
        self.time = time;
        self.notify();
    }

    /// Update the scores and notify listeners.
    pub fn set_score(&mut self, left: u32, right: u32) {
        self.play_mode_changed = false;
        self.scores = (left, right);
        self.notify();
    }

    /// Clear all entities and referee state (e.g. server restart) and
    /// notify listeners. Entity references taken before the reset must be
    /// revalidated against [`GameState::generation`].
    pub fn reset(&mut self) {
        self.entities.clear();
        self.play_mode = PlayMode::BeforeKickOff;
        self.play_mode_changed = true;
        self.time = 0.0;
        self.scores = (0, 0);
        self.generation += 1;
        log::info!("game state reset (generation {})", self.generation);
        self.notify();
    }

    /// Current play mode.
    #[must_use]
    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// Whether the most recent notifying mutation changed the play mode.
    #[must_use]
    pub fn play_mode_just_changed(&self) -> bool {
        self.play_mode_changed
    }

    /// Match clock in seconds.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Length of one half in seconds.
    #[must_use]
    pub fn half_time(&self) -> f32 {
        self.half_time
    }

    /// Left and right team scores.
    #[must_use]
    pub fn scores(&self) -> (u32, u32) {
        self.scores
    }

    /// Field extents.
    #[must_use]
    pub fn field(&self) -> FieldDimensions {
        self.field
    }

    /// Reset counter; changes whenever previously issued entity ids may
    /// have become invalid.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // -- Entities --

    /// Add an entity and return its id.
    pub fn spawn(&mut self, kind: EntityKind, position: Vec3) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        let _ = self.entities.insert(id, Entity { id, kind, position });
        id
    }

    /// Insert or replace an entity under its own id, e.g. an agent that
    /// reconnects with the id it had before.
    pub fn upsert(&mut self, entity: Entity) {
        self.next_entity_id =
            self.next_entity_id.max(entity.id.0.saturating_add(1));
        let _ = self.entities.insert(entity.id, entity);
    }

    /// Move an entity. Returns `false` if it does not exist.
    pub fn move_entity(&mut self, id: EntityId, position: Vec3) -> bool {
        self.entities.get_mut(&id).is_some_and(|entity| {
            entity.position = position;
            true
        })
    }

    /// Remove an entity. Returns `false` if it did not exist.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.entities.remove(&id).is_some()
    }

    /// Look up an entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Current position of an entity, if it still exists.
    #[must_use]
    pub fn entity_position(&self, id: EntityId) -> Option<Vec3> {
        self.entities.get(&id).map(|entity| entity.position)
    }

    /// The ball, if one has been spawned.
    #[must_use]
    pub fn ball(&self) -> Option<&Entity> {
        self.entities
            .values()
            .filter(|entity| entity.kind == EntityKind::Ball)
            .min_by_key(|entity| entity.id)
    }

    /// All entities ordered by id.
    #[must_use]
    pub fn entities(&self) -> Vec<&Entity> {
        let mut entities: Vec<_> = self.entities.values().collect();
        entities.sort_by_key(|entity| entity.id);
        entities
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(FieldDimensions::STANDARD)
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("play_mode", &self.play_mode)
            .field("time", &self.time)
            .field("scores", &self.scores)
            .field("entities", &self.entities.len())
            .field("generation", &self.generation)
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_entities_are_queryable() {
        let mut state = GameState::default();
        let ball = state.spawn(EntityKind::Ball, Vec3::ZERO);
        let agent = state.spawn(
            EntityKind::Agent {
                team: Team::Left,
                number: 1,
            },
            Vec3::new(-14.0, 0.0, 0.0),
        );
        assert_ne!(ball, agent);
        assert_eq!(state.ball().map(|b| b.id), Some(ball));
        assert_eq!(
            state.entity_position(agent),
            Some(Vec3::new(-14.0, 0.0, 0.0))
        );

        assert!(state.move_entity(ball, Vec3::new(1.0, 0.0, 2.0)));
        assert_eq!(state.entity_position(ball), Some(Vec3::new(1.0, 0.0, 2.0)));
        assert!(state.despawn(agent));
        assert!(!state.move_entity(agent, Vec3::ZERO));
        assert_eq!(state.entities().len(), 1);
    }

    #[test]
    fn upsert_restores_entity_under_same_id() {
        let mut state = GameState::default();
        let ball = state.spawn(EntityKind::Ball, Vec3::ZERO);
        let entity = *state.entity(ball).unwrap();
        assert!(state.despawn(ball));
        state.upsert(Entity {
            position: Vec3::X,
            ..entity
        });
        assert_eq!(state.entity_position(ball), Some(Vec3::X));
        assert_ne!(state.spawn(EntityKind::Ball, Vec3::ZERO), ball);
    }

    #[test]
    fn upsert_at_id_ceiling_does_not_overflow() {
        let mut state = GameState::default();
        let id = EntityId(u32::MAX);
        state.upsert(Entity {
            id,
            kind: EntityKind::Ball,
            position: Vec3::ZERO,
        });
        assert_eq!(state.entity_position(id), Some(Vec3::ZERO));
        assert_eq!(state.ball().map(|b| b.id), Some(id));
    }

    #[test]
    fn play_mode_change_flag_tracks_last_mutation() {
        let mut state = GameState::default();
        state.set_play_mode(PlayMode::KickOff(Team::Left));
        assert!(state.play_mode_just_changed());
        state.set_play_mode(PlayMode::KickOff(Team::Left));
        assert!(!state.play_mode_just_changed());
        state.set_play_mode(PlayMode::PlayOn);
        state.set_time(12.5);
        assert!(!state.play_mode_just_changed());
        assert_eq!(state.time(), 12.5);
    }

    #[test]
    fn reset_invalidates_entities() {
        let mut state = GameState::default();
        let ball = state.spawn(EntityKind::Ball, Vec3::ZERO);
        state.set_score(2, 1);
        state.reset();
        assert_eq!(state.generation(), 1);
        assert!(state.entity_position(ball).is_none());
        assert_eq!(state.scores(), (0, 0));
        assert_eq!(state.play_mode(), PlayMode::BeforeKickOff);

        // Ids are never reused across resets.
        let new_ball = state.spawn(EntityKind::Ball, Vec3::ZERO);
        assert_ne!(new_ball, ball);
    }
}
