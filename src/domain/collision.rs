/// Collision resolution against static room geometry.
///
/// ## Hitboxes
///
/// Two single-axis hitboxes are built once per call from the proposed
/// displacement:
///   - horizontal = bounds shifted by `(dx, 0)`
///   - vertical   = bounds shifted by `(0, dy)`
///
/// ## Fold
///
/// Colliders are visited in room scan order until one of them stops the fold.
/// Each may overwrite the running `dx`, `dy` and velocity, so for a given
/// axis the LAST colliding tile wins. Conditions read the running values,
/// not the proposed ones.
///
/// ## Per kind
/// ┌────────────┬──────────────────────────────┬─────────────────────────────────┐
/// │ Kind       │ Test                         │ Effect                          │
/// ├────────────┼──────────────────────────────┼─────────────────────────────────┤
/// │ Wall       │ hits horizontal hitbox       │ dx = 0, vx = 0                  │
/// │ Wall       │ hits vertical, dy < 0        │ flush under wall, vy = 2, stop  │
/// │ Wall       │ hits vertical, dy > 0        │ flush on wall, vy = 0 (landed)  │
/// │ Ladder     │ hits body, jump, vy <= 0     │ dy = -8, vy = 0                 │
/// │ Stair      │ hits horizontal, low side or │ flush on stair, vy = 0, stop    │
/// │            │ also hits vertical           │                                 │
/// │ Stair      │ hits horizontal, otherwise   │ dx = 0                          │
/// └────────────┴──────────────────────────────┴─────────────────────────────────┘
///
/// "stop" ends the fold: the resolution is returned as it stands and later
/// tiles are not visited. A stair snap lifts the body, so walls tested
/// against the pre-lift horizontal hitbox would stall every step.

use super::body::{Facing, InputSnapshot, Velocity};
use super::geom::{to_px, Rect};
use super::tile::{Collider, ColliderKind};

/// Upward step granted per frame while climbing a ladder.
pub const LADDER_CLIMB_STEP: f32 = 8.0;
/// Downward velocity after hitting a ceiling.
pub const HEAD_BONK_VELOCITY: f32 = 2.0;

/// What the body touched this frame. Consumed by the event layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Contacts {
    pub wall: bool,
    pub landed: bool,
    pub bonked: bool,
    pub climbed: bool,
    pub ramp: bool,
}

/// Corrected displacement plus the velocity it implies.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Resolution {
    pub dx: f32,
    pub dy: f32,
    pub velocity: Velocity,
    pub contacts: Contacts,
}

/// Resolve a proposed displacement. Pure; never fails. Worst case the
/// body is boxed in and both components come back as zero.
pub fn resolve(
    bounds: Rect,
    dx: f32,
    dy: f32,
    colliders: &[Collider],
    input: InputSnapshot,
    velocity: Velocity,
) -> Resolution {
    let horizontal = bounds.offset(to_px(dx), 0);
    let vertical = bounds.offset(0, to_px(dy));

    let mut out = Resolution { dx, dy, velocity, contacts: Contacts::default() };

    for tile in colliders {
        let hits_horizontal = tile.bounds.collides(&horizontal);
        let hits_vertical = tile.bounds.collides(&vertical);

        match tile.kind {
            ColliderKind::Wall => {
                if hits_horizontal {
                    out.dx = 0.0;
                    out.velocity.x = 0.0;
                    out.contacts.wall = true;
                }
                if !hits_vertical {
                    continue;
                }
                if out.dy < 0.0 {
                    out.dy = (tile.bounds.bottom() - bounds.top()) as f32;
                    out.velocity.y = HEAD_BONK_VELOCITY;
                    out.contacts.bonked = true;
                    return out;
                } else if out.dy > 0.0 {
                    out.dy = (tile.bounds.top() - bounds.bottom()) as f32;
                    out.velocity.y = 0.0;
                    out.contacts.landed = true;
                }
            }

            ColliderKind::Ladder => {
                if !input.jump || out.velocity.y > 0.0 {
                    continue;
                }
                if tile.bounds.collides(&bounds) {
                    out.velocity.y = 0.0;
                    out.dy = -LADDER_CLIMB_STEP;
                    out.contacts.climbed = true;
                }
            }

            ColliderKind::StairLeft | ColliderKind::StairRight => {
                if !hits_horizontal {
                    continue;
                }
                let from_low_side = match tile.kind.ramp_side() {
                    Some(Facing::Left) => out.dx > 0.0,
                    Some(Facing::Right) => out.dx < 0.0,
                    None => false,
                };
                if from_low_side || hits_vertical {
                    out.dy = (tile.bounds.top() - bounds.bottom()) as f32;
                    out.velocity.y = 0.0;
                    out.contacts.ramp = true;
                    return out;
                } else {
                    out.dx = 0.0;
                }
            }
        }
    }

    out
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tilemap::TileMap;

    const BODY_W: i32 = 20;
    const BODY_H: i32 = 40;

    fn walls(rects: &[Rect]) -> Vec<Collider> {
        rects.iter().map(|&bounds| Collider { kind: ColliderKind::Wall, bounds }).collect()
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn jumping() -> InputSnapshot {
        InputSnapshot { jump: true, ..InputSnapshot::default() }
    }

    fn vel(x: f32, y: f32) -> Velocity {
        Velocity { x, y }
    }

    fn body_at(x: i32, y: i32) -> Rect {
        Rect::new(x, y, BODY_W, BODY_H)
    }

    // ── Walls, horizontal ──

    #[test]
    fn wall_stops_horizontal_motion_and_velocity() {
        let body = body_at(100, 100);
        let tiles = walls(&[Rect::new(124, 100, 32, 32)]);
        let r = resolve(body, 6.0, 0.0, &tiles, idle(), vel(6.0, 0.0));
        assert_eq!(r.dx, 0.0);
        assert_eq!(r.velocity.x, 0.0);
        assert!(r.contacts.wall);
    }

    #[test]
    fn wall_never_penetrated_for_any_dx() {
        let wall = Rect::new(200, 64, 32, 32);
        let tiles = walls(&[wall]);
        for start in 150..=(wall.left() - BODY_W) {
            for dx in -8..=8 {
                let body = body_at(start, 60);
                let r = resolve(body, dx as f32, 0.0, &tiles, idle(), vel(dx as f32, 0.0));
                let moved = body.offset(to_px(r.dx), 0);
                assert!(!moved.collides(&wall), "start {start} dx {dx}");
            }
        }
    }

    #[test]
    fn wall_out_of_reach_leaves_dx_alone() {
        let body = body_at(100, 100);
        let tiles = walls(&[Rect::new(140, 100, 32, 32)]);
        let r = resolve(body, 8.0, 0.0, &tiles, idle(), vel(8.0, 0.0));
        assert_eq!(r.dx, 8.0);
        assert_eq!(r.velocity.x, 8.0);
    }

    // ── Walls, vertical ──

    #[test]
    fn landing_is_flush_and_stops_fall() {
        let body = body_at(100, 50);
        // bottom = 90; floor top at 96, proposed dy overshoots by 4
        let floor = Rect::new(96, 96, 32, 32);
        let r = resolve(body, 0.0, 10.0, &walls(&[floor]), idle(), vel(0.0, 10.0));
        assert_eq!(r.dy, 6.0);
        assert_eq!(body.bottom() + to_px(r.dy), floor.top());
        assert_eq!(r.velocity.y, 0.0);
        assert!(r.contacts.landed);
    }

    #[test]
    fn head_bonk_is_flush_and_starts_fall() {
        let body = body_at(100, 70);
        // ceiling bottom = 64, proposed dy overshoots by 6
        let ceiling = Rect::new(96, 32, 32, 32);
        let r = resolve(body, 0.0, -12.0, &walls(&[ceiling]), jumping(), vel(0.0, -12.0));
        assert_eq!(body.top() + to_px(r.dy), ceiling.bottom());
        assert_eq!(r.velocity.y, HEAD_BONK_VELOCITY);
        assert!(r.contacts.bonked);
    }

    #[test]
    fn head_bonk_ends_resolution() {
        let body = body_at(100, 70);
        let ceiling = Rect::new(96, 32, 32, 32);
        // A second ceiling tile later in scan order would snap differently
        // if it were still visited.
        let lower = Rect::new(96, 40, 32, 20);
        let r = resolve(body, 0.0, -12.0, &walls(&[ceiling, lower]), idle(), vel(0.0, -12.0));
        assert_eq!(r.dy, (ceiling.bottom() - body.top()) as f32);
        assert_eq!(r.velocity.y, HEAD_BONK_VELOCITY);
    }

    #[test]
    fn stair_snap_skips_walls_later_in_scan_order() {
        let body = body_at(100, 60);
        let stair = Collider { kind: ColliderKind::StairLeft, bounds: Rect::new(118, 80, 32, 32) };
        // Overlaps the pre-lift horizontal hitbox only.
        let wall = Collider { kind: ColliderKind::Wall, bounds: Rect::new(120, 90, 32, 32) };
        let r = resolve(body, 6.0, 3.0, &[stair, wall], idle(), vel(6.0, 3.0));
        assert_eq!(r.dy, -20.0);
        assert_eq!(r.dx, 6.0);
        assert_eq!(r.velocity.x, 6.0);
        assert!(r.contacts.ramp);
        assert!(!r.contacts.wall);
    }

    #[test]
    fn diagonal_corner_entry_is_not_caught_by_single_axis_hitboxes() {
        let body = body_at(100, 100);
        let corner = Rect::new(122, 142, 32, 32);
        let r = resolve(body, 5.0, 5.0, &walls(&[corner]), idle(), vel(5.0, 5.0));
        assert_eq!((r.dx, r.dy), (5.0, 5.0));
        assert_eq!(r.contacts, Contacts::default());
        assert!(body.offset(5, 5).collides(&corner));
    }

    #[test]
    fn last_floor_in_scan_order_wins() {
        let body = body_at(100, 50);
        let high = Rect::new(96, 94, 32, 32);
        let low = Rect::new(100, 98, 32, 32);
        let r = resolve(body, 0.0, 12.0, &walls(&[high, low]), idle(), vel(0.0, 12.0));
        // running dy after `high` is 4 (> 0), so `low` still applies
        assert_eq!(r.dy, (low.top() - body.bottom()) as f32);
    }

    #[test]
    fn resting_body_stays_grounded() {
        let body = body_at(100, 56);
        let floor = Rect::new(96, 96, 32, 32);
        let r = resolve(body, 0.0, 1.5, &walls(&[floor]), idle(), vel(0.0, 1.5));
        assert_eq!(r.dy, 0.0);
        assert_eq!(r.velocity.y, 0.0);
    }

    #[test]
    fn boxed_in_body_does_not_move() {
        let body = body_at(32, 32);
        let tiles = walls(&[
            Rect::new(0, 32, 32, 64),
            Rect::new(52, 32, 32, 64),
            Rect::new(32, 0, 32, 32),
            Rect::new(32, 72, 32, 32),
        ]);
        let r = resolve(body, -3.0, 5.0, &tiles, idle(), vel(-3.0, 5.0));
        assert_eq!(r.dx, 0.0);
        assert_eq!(r.dy, 0.0);
    }

    // ── Ladders ──

    #[test]
    fn ladder_climb_overrides_dy_regardless_of_sign() {
        let ladder = Collider { kind: ColliderKind::Ladder, bounds: Rect::new(96, 96, 32, 32) };
        let body = body_at(100, 80);
        for proposed in [-21.5_f32, 0.0, 3.0] {
            let r = resolve(body, 0.0, proposed, &[ladder], jumping(), vel(0.0, 0.0));
            assert_eq!(r.dy, -LADDER_CLIMB_STEP);
            assert_eq!(r.velocity.y, 0.0);
            assert!(r.contacts.climbed);
        }
    }

    #[test]
    fn ladder_ignored_while_falling_or_without_jump() {
        let ladder = Collider { kind: ColliderKind::Ladder, bounds: Rect::new(96, 96, 32, 32) };
        let body = body_at(100, 80);
        let r = resolve(body, 0.0, 4.0, &[ladder], jumping(), vel(0.0, 4.0));
        assert_eq!(r.dy, 4.0);
        let r = resolve(body, 0.0, -4.0, &[ladder], idle(), vel(0.0, -4.0));
        assert_eq!(r.dy, -4.0);
    }

    #[test]
    fn ladder_never_blocks_horizontally() {
        let ladder = Collider { kind: ColliderKind::Ladder, bounds: Rect::new(120, 80, 32, 32) };
        let body = body_at(100, 80);
        let r = resolve(body, 8.0, 0.0, &[ladder], idle(), vel(8.0, 0.0));
        assert_eq!(r.dx, 8.0);
    }

    // ── Stairs ──

    #[test]
    fn left_stair_lifts_body_entering_from_low_side() {
        // '2' rises to the right, entered while moving right
        let map = TileMap::parse(&["     ", "     ", "  2  "]).unwrap();
        let stair = map.colliders()[0].bounds;
        let body = Rect::new(stair.left() - BODY_W, stair.bottom() - BODY_H, BODY_W, BODY_H);
        let r = resolve(body, 4.0, 1.5, map.colliders(), idle(), vel(4.0, 1.5));
        assert_eq!(r.dx, 4.0);
        assert_eq!(body.bottom() + to_px(r.dy), stair.top());
        assert_eq!(r.velocity.y, 0.0);
        assert!(r.contacts.ramp);
    }

    #[test]
    fn left_stair_blocks_from_high_side() {
        let map = TileMap::parse(&["     ", "     ", "  2  "]).unwrap();
        let stair = map.colliders()[0].bounds;
        let body = Rect::new(stair.right(), stair.bottom() - BODY_H, BODY_W, BODY_H);
        let r = resolve(body, -4.0, 0.0, map.colliders(), idle(), vel(-4.0, 0.0));
        assert_eq!(r.dx, 0.0);
        assert_eq!(r.dy, 0.0);
        assert!(!r.contacts.ramp);
    }

    #[test]
    fn right_stair_mirrors_left_stair() {
        let map = TileMap::parse(&["     ", "     ", "  3  "]).unwrap();
        let stair = map.colliders()[0].bounds;
        let from_right = Rect::new(stair.right(), stair.bottom() - BODY_H, BODY_W, BODY_H);
        let r = resolve(from_right, -4.0, 1.5, map.colliders(), idle(), vel(-4.0, 1.5));
        assert_eq!(from_right.bottom() + to_px(r.dy), stair.top());

        let from_left = Rect::new(stair.left() - BODY_W, stair.bottom() - BODY_H, BODY_W, BODY_H);
        let r = resolve(from_left, 4.0, 0.0, map.colliders(), idle(), vel(4.0, 0.0));
        assert_eq!(r.dx, 0.0);
    }

    #[test]
    fn stair_pushes_sinking_body_onto_its_top() {
        let map = TileMap::parse(&["     ", "     ", "  3  "]).unwrap();
        let stair = map.colliders()[0].bounds;
        // fell 3 px into the stair while drifting toward its high side
        let body = Rect::new(stair.left() + 4, stair.top() + 3 - BODY_H, BODY_W, BODY_H);
        let r = resolve(body, 2.0, 6.0, map.colliders(), idle(), vel(2.0, 6.0));
        assert_eq!(body.bottom() + to_px(r.dy), stair.top());
        assert_eq!(r.velocity.y, 0.0);
    }
}
