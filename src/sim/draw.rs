/// Draw step: turns the world into draw commands on a `Surface`.
///
/// Paint order is background, player, room. Room tiles go on top so a
/// body sunk into a stair for a frame is hidden behind it.

use crate::domain::body::Facing;
use crate::domain::geom::Rect;
use crate::domain::tile::ColliderKind;
use super::world::WorldState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const SKY: Rgb = Rgb(100, 131, 176);
pub const WALL: Rgb = Rgb(60, 60, 60);

/// Images a surface knows how to blit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Image {
    Ladder,
    /// Rises to the right; `flipped` mirrors it to rise to the left.
    Stair { flipped: bool },
    Player { frame: usize, facing: Facing },
}

/// A 2D drawing target in screen pixels.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn blit(&mut self, image: Image, dest: Rect);
}

pub fn draw(world: &WorldState, surface: &mut dyn Surface) {
    surface.fill_rect(Rect::new(0, 0, world.screen_w, world.screen_h), SKY);

    let player = &world.player;
    let frame = world.anim.frame(player.velocity, world.player_frames);
    surface.blit(Image::Player { frame, facing: player.facing }, player.bounds);

    for tile in world.rooms.active().colliders() {
        match tile.kind {
            ColliderKind::Wall => surface.fill_rect(tile.bounds, WALL),
            ColliderKind::Ladder => surface.blit(Image::Ladder, tile.bounds),
            ColliderKind::StairLeft => surface.blit(Image::Stair { flipped: false }, tile.bounds),
            ColliderKind::StairRight => surface.blit(Image::Stair { flipped: true }, tile.bounds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::domain::room::RoomSet;
    use crate::domain::tilemap::TileMap;

    #[derive(Debug, PartialEq)]
    enum Cmd {
        Fill(Rect, Rgb),
        Blit(Image, Rect),
    }

    #[derive(Default)]
    struct Recorder(Vec<Cmd>);

    impl Surface for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Rgb) {
            self.0.push(Cmd::Fill(rect, color));
        }
        fn blit(&mut self, image: Image, dest: Rect) {
            self.0.push(Cmd::Blit(image, dest));
        }
    }

    #[test]
    fn background_then_player_then_tiles_in_scan_order() {
        let room = TileMap::parse(&["0123"]).unwrap();
        let set = RoomSet::new(vec![room]).unwrap();
        let player = Rect::new(10, 40, 20, 40);
        let world = WorldState::new(set, player, PhysicsConfig::default(), 128, 96);

        let mut rec = Recorder::default();
        draw(&world, &mut rec);

        assert_eq!(rec.0, vec![
            Cmd::Fill(Rect::new(0, 0, 128, 96), SKY),
            Cmd::Blit(Image::Player { frame: 0, facing: Facing::Right }, player),
            Cmd::Fill(Rect::new(0, 0, 32, 32), WALL),
            Cmd::Blit(Image::Ladder, Rect::new(32, 0, 32, 32)),
            Cmd::Blit(Image::Stair { flipped: false }, Rect::new(64, 0, 32, 32)),
            Cmd::Blit(Image::Stair { flipped: true }, Rect::new(96, 0, 32, 32)),
        ]);
    }
}
