use glam::Vec3;

/// Identifier shared by game-state entities and pickable scene objects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the field a team defends at kick-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    /// Defends the goal at negative x.
    Left,
    /// Defends the goal at positive x.
    Right,
}

impl Team {
    /// The other team.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Sign of the x coordinate of the goal this team defends.
    #[must_use]
    pub fn goal_side(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// What an entity represents on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// The match ball.
    Ball,
    /// A robot player.
    Agent {
        /// Owning team.
        team: Team,
        /// Uniform number.
        number: u8,
    },
}

/// A tracked object in the game state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    /// Stable identifier.
    pub id: EntityId,
    /// Ball or agent.
    pub kind: EntityKind,
    /// World-space position (y up, field plane at y = 0).
    pub position: Vec3,
}
