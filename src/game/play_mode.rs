use super::entity::Team;

/// Referee state of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayMode {
    /// Waiting for the first kick-off.
    #[default]
    BeforeKickOff,
    /// Kick-off taken by a team.
    KickOff(Team),
    /// Regular play.
    PlayOn,
    /// Throw-in equivalent, taken by a team.
    KickIn(Team),
    /// Corner kick taken by a team.
    CornerKick(Team),
    /// Goal kick taken by a team.
    GoalKick(Team),
    /// Indirect free kick taken by a team.
    FreeKick(Team),
    /// Direct free kick taken by a team.
    DirectFreeKick(Team),
    /// A team scored.
    Goal(Team),
    /// Half or match over.
    GameOver,
}

/// Field extents in metres, centered on the origin.
///
/// Length runs along x, width along z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDimensions {
    /// Goal line to goal line.
    pub length: f32,
    /// Touch line to touch line.
    pub width: f32,
}

impl FieldDimensions {
    /// Standard 3D simulation league field.
    pub const STANDARD: Self = Self {
        length: 30.0,
        width: 20.0,
    };

    /// Whether both extents are positive and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.length.is_finite()
            && self.width.is_finite()
            && self.length > 0.0
            && self.width > 0.0
    }
}

impl Default for FieldDimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}
