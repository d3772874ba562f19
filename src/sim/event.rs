/// Events emitted during a simulation step.
/// The frame loop logs them and the HUD shows room changes.

use crate::domain::body::Facing;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Landed,
    HeadBonk,
    Climbed,
    SteppedUp,
    HitWall,
    RoomEntered { from: usize, to: usize },
    /// Tried to leave past the first or last room.
    RoomBlocked { direction: Facing },
}
