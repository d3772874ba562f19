/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Animation clock
///   2. Body update (jump → gravity → intent → clamp → resolve → move)
///   3. Contact events
///   4. Room transition (screen-edge rule)
///   5. Message timer
///
/// Input is a snapshot taken by the caller before the tick; the step
/// never polls anything itself.

use crate::domain::body::InputSnapshot;
use super::event::GameEvent;
use super::world::WorldState;

const ROOM_MESSAGE_TICKS: u32 = 90;

pub fn step(world: &mut WorldState, input: InputSnapshot) -> Vec<GameEvent> {
    let mut events = Vec::new();
    world.tick += 1;

    world.anim.tick(input);

    let was_grounded = world.player.is_grounded();
    let res = world.player.update(input, world.rooms.active().colliders(), &world.physics);

    let c = res.contacts;
    if input.jump && was_grounded && !c.climbed {
        events.push(GameEvent::Jumped);
    }
    if c.landed && !was_grounded {
        events.push(GameEvent::Landed);
    }
    if c.bonked {
        events.push(GameEvent::HeadBonk);
    }
    if c.climbed {
        events.push(GameEvent::Climbed);
    }
    if c.ramp && res.dy < 0.0 {
        events.push(GameEvent::SteppedUp);
    }
    if c.wall && input.is_moving() {
        events.push(GameEvent::HitWall);
    }

    resolve_room_transition(world, &mut events);

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 { world.message.clear(); }
    }

    events
}

fn resolve_room_transition(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    match world.rooms.check_transition(&mut world.player, world.screen_w) {
        Ok(Some(change)) => {
            log::info!("entered room {} from room {}", change.to, change.from);
            let msg = format!("Room {}/{}", change.to + 1, world.rooms.len());
            world.set_message(&msg, ROOM_MESSAGE_TICKS);
            events.push(GameEvent::RoomEntered { from: change.from, to: change.to });
        }
        Ok(None) => {}
        Err(e) => {
            log::warn!("{e}");
            events.push(GameEvent::RoomBlocked { direction: e.direction });
        }
    }
}
