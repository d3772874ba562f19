/// WorldState: everything the frame loop owns between ticks.
///
/// There are no globals. The active room, the player body and the
/// physics constants all live here and are mutated only by `step`.

use crate::config::PhysicsConfig;
use crate::domain::anim::{Animator, PLAYER_FRAMES};
use crate::domain::body::KinematicBody;
use crate::domain::geom::Rect;
use crate::domain::room::RoomSet;

pub struct WorldState {
    pub rooms: RoomSet,
    pub player: KinematicBody,
    pub anim: Animator,
    /// Images in the player's walk sheet, standing pose included.
    pub player_frames: usize,

    pub physics: PhysicsConfig,
    /// Logical screen size in pixels.
    pub screen_w: i32,
    pub screen_h: i32,

    pub tick: u64,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

impl WorldState {
    pub fn new(rooms: RoomSet, player: Rect, physics: PhysicsConfig, screen_w: i32, screen_h: i32) -> Self {
        WorldState {
            rooms,
            player: KinematicBody::new(player),
            anim: Animator::new(),
            player_frames: PLAYER_FRAMES,
            physics,
            screen_w,
            screen_h,
            tick: 0,
            message: String::new(),
            message_timer: 0,
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }
}
