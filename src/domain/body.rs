/// The player's kinematic body and per-frame input.
///
/// One `update` call is one fixed 60 Hz tick. The physics constants are
/// tuned for that rate and are not scaled by elapsed time.
///
/// "Grounded" is not stored: a body is grounded exactly when its vertical
/// velocity is zero, which the resolver guarantees after a landing.

use crate::config::PhysicsConfig;

use super::collision::{self, Resolution};
use super::geom::{to_px, Rect};
use super::tile::Collider;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Facing {
    Left,
    Right,
}

/// Held logical actions for one frame. Read-only to the core.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

impl InputSnapshot {
    /// Is a horizontal movement action held?
    pub fn is_moving(&self) -> bool {
        self.move_left || self.move_right
    }
}

/// Pixels per tick. Positive y is downward.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct KinematicBody {
    pub bounds: Rect,
    pub velocity: Velocity,
    pub facing: Facing,
}

impl KinematicBody {
    pub fn new(bounds: Rect) -> Self {
        KinematicBody {
            bounds,
            velocity: Velocity::default(),
            facing: Facing::Right,
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.velocity.y == 0.0
    }

    /// Advance one tick: integrate, resolve against `colliders`, move.
    pub fn update(
        &mut self,
        input: InputSnapshot,
        colliders: &[Collider],
        physics: &PhysicsConfig,
    ) -> Resolution {
        self.integrate(input, physics);

        let res = collision::resolve(
            self.bounds,
            self.velocity.x,
            self.velocity.y,
            colliders,
            input,
            self.velocity,
        );

        self.velocity = res.velocity;
        self.bounds.translate(to_px(res.dx), to_px(res.dy));
        res
    }

    /// Jump, gravity, horizontal intent and speed clamp, in that order.
    /// Leaves the proposed displacement in `velocity`.
    pub fn integrate(&mut self, input: InputSnapshot, physics: &PhysicsConfig) {
        let v = &mut self.velocity;

        if input.jump && v.y == 0.0 {
            v.y -= physics.jump_power;
        }

        v.y += physics.gravity;
        if v.y > physics.terminal_velocity {
            v.y = physics.terminal_velocity;
        }

        if input.move_left {
            self.facing = Facing::Left;
            v.x -= physics.acceleration;
        } else if input.move_right {
            self.facing = Facing::Right;
            v.x += physics.acceleration;
        } else if v.x != 0.0 {
            // Stop dead instead of overshooting past zero.
            if v.x.abs() <= physics.friction {
                v.x = 0.0;
            } else {
                v.x -= v.x.signum() * physics.friction;
            }
        }

        if v.x.abs() > physics.max_speed {
            v.x = v.x.signum() * physics.max_speed;
        }
    }
}
