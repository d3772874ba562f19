/// Collider kinds and the tile legend.
/// Kind semantics are queried via methods so the resolver and the
/// draw step agree on what each kind does.
///
/// Legend (one character per 32 px cell):
///   ' ' = empty        '0' = wall
///   '1' = ladder       '2' = left stair (rises to the right)
///   '3' = right stair (rises to the left)

use super::body::Facing;
use super::geom::Rect;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColliderKind {
    Wall,
    Ladder,
    StairLeft,
    StairRight,
}

impl ColliderKind {
    /// Look up a legend character. `None` for anything outside the legend,
    /// including the empty cell.
    pub fn from_code(code: char) -> Option<ColliderKind> {
        match code {
            '0' => Some(ColliderKind::Wall),
            '1' => Some(ColliderKind::Ladder),
            '2' => Some(ColliderKind::StairLeft),
            '3' => Some(ColliderKind::StairRight),
            _ => None,
        }
    }

    /// Inverse of `from_code`.
    #[cfg(test)]
    pub fn code(self) -> char {
        match self {
            ColliderKind::Wall => '0',
            ColliderKind::Ladder => '1',
            ColliderKind::StairLeft => '2',
            ColliderKind::StairRight => '3',
        }
    }

    /// The side a ramp belongs to, or `None` for non-ramp kinds.
    /// A ramp is entered from its low side: moving right into a left
    /// stair, or left into a right stair.
    pub fn ramp_side(self) -> Option<Facing> {
        match self {
            ColliderKind::StairLeft => Some(Facing::Left),
            ColliderKind::StairRight => Some(Facing::Right),
            _ => None,
        }
    }
}

/// One static obstacle. Immutable after the room is built.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Collider {
    pub kind: ColliderKind,
    pub bounds: Rect,
}
