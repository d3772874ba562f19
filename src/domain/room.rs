/// The room sequence and the screen-edge transition rule.
///
/// Rooms form a line. Leaving the screen past its left edge enters the
/// previous room at the right edge; leaving past the right edge enters
/// the next room at the left edge. Either way the body is lifted by
/// `ENTRY_LIFT` pixels so a floor that sits slightly higher in the new
/// room doesn't swallow it.
///
/// There is no room before the first or after the last. Crossing those
/// edges clamps: the room stays the same, the body is pinned just
/// inside the edge it crossed, and a `BoundsError` reports the attempt.

use crate::error::{BoundsError, ConfigError};

use super::body::{Facing, KinematicBody};
use super::tilemap::TileMap;

pub const ENTRY_LIFT: i32 = 5;

/// A successful room change.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RoomChange {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Debug)]
pub struct RoomSet {
    rooms: Vec<TileMap>,
    active: usize,
}

impl RoomSet {
    /// At least one room is required.
    pub fn new(rooms: Vec<TileMap>) -> Result<Self, ConfigError> {
        if rooms.is_empty() {
            return Err(ConfigError::NoRooms);
        }
        Ok(RoomSet { rooms, active: 0 })
    }

    pub fn active(&self) -> &TileMap {
        &self.rooms[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Jump straight to a room. Out-of-range indices are rejected.
    #[cfg(test)]
    pub fn set_active(&mut self, index: usize) -> Result<(), BoundsError> {
        if index >= self.rooms.len() {
            return Err(BoundsError {
                from: self.active,
                direction: Facing::Right,
                rooms: self.rooms.len(),
            });
        }
        self.active = index;
        Ok(())
    }

    /// Apply the screen-edge rule after a body update.
    ///
    /// `Ok(None)` if still on screen, `Ok(Some(_))` after entering a neighbour,
    /// `Err(_)` when there is no neighbour that way (body already clamped).
    pub fn check_transition(
        &mut self,
        body: &mut KinematicBody,
        screen_width: i32,
    ) -> Result<Option<RoomChange>, BoundsError> {
        let from = self.active;

        if body.bounds.right() < 0 {
            if from == 0 {
                body.bounds.set_left(0);
                return Err(self.bounds_error(Facing::Left));
            }
            self.active = from - 1;
            body.bounds.set_left(screen_width);
            body.bounds.y -= ENTRY_LIFT;
            return Ok(Some(RoomChange { from, to: self.active }));
        }

        if body.bounds.left() > screen_width {
            if from + 1 >= self.rooms.len() {
                body.bounds.set_right(screen_width);
                return Err(self.bounds_error(Facing::Right));
            }
            self.active = from + 1;
            body.bounds.set_right(0);
            body.bounds.y -= ENTRY_LIFT;
            return Ok(Some(RoomChange { from, to: self.active }));
        }

        Ok(None)
    }

    fn bounds_error(&self, direction: Facing) -> BoundsError {
        BoundsError { from: self.active, direction, rooms: self.rooms.len() }
    }
}
