/// Walk-cycle frame selection for the player sprite.
///
/// Frame 0 is the standing pose; frames 1..n loop while walking.
/// The cycle advances one frame every `STEP_TICKS` ticks of held
/// horizontal input and shows only while the body is on its way down
/// or resting (not rising) with nonzero horizontal speed.

use super::body::{InputSnapshot, Velocity};

/// Number of frames in the player sheet, standing pose included.
pub const PLAYER_FRAMES: usize = 7;

const STEP_TICKS: u32 = 4;

#[derive(Clone, Debug, Default)]
pub struct Animator {
    counter: u32,
    step: u32,
    moving: bool,
}

impl Animator {
    pub fn new() -> Self {
        Animator::default()
    }

    /// Advance one tick. Call once per physics update.
    pub fn tick(&mut self, input: InputSnapshot) {
        self.counter = self.counter.wrapping_add(1);
        self.moving = input.is_moving();
        if self.moving && self.counter % STEP_TICKS == 0 {
            self.step = self.step.wrapping_add(1);
        }
    }

    /// Frame index into a sheet of `frames` images.
    pub fn frame(&self, velocity: Velocity, frames: usize) -> usize {
        if frames < 2 {
            return 0;
        }
        if self.moving && velocity.y >= 0.0 && velocity.x != 0.0 {
            1 + self.step as usize % (frames - 1)
        } else {
            0
        }
    }
}
