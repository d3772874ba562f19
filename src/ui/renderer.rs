/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Rasterize the world's draw commands into the `front` buffer
///   2. Compare each cell with the `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// Pixel space maps onto character cells at `PX_PER_COL` × `PX_PER_ROW`
/// pixels per cell, so a 32 px tile is two columns by one row.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::body::Facing;
use crate::domain::geom::Rect;
use crate::sim::draw::{self, Image, Rgb, Surface};
use crate::sim::world::WorldState;

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit background for all cells outside the play field, so the
    /// inter-row gap matches on VTE terminals.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Differs from any real cell, so every position gets diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg }
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Cell::new(ch, fg, bg));
        }
    }

    fn fill_row(&mut self, y: usize, bg: Color) {
        for x in 0..self.width {
            self.set(x, y, Cell::new(' ', Color::White, bg));
        }
    }
}

// ── Canvas: Surface over a FrameBuffer region ──

const PX_PER_COL: i32 = 16;
const PX_PER_ROW: i32 = 32;

const LADDER_FG: Color = Color::Rgb { r: 150, g: 100, b: 50 };
const STAIR_FG: Color = Color::Rgb { r: 120, g: 120, b: 120 };
const PLAYER_FG: Color = Color::Rgb { r: 250, g: 230, b: 90 };

/// Body glyphs by animation frame; frame 0 is standing.
const WALK_GLYPHS: [char; 7] = ['█', '╱', '│', '╲', '╱', '│', '╲'];

/// Rasterizes pixel-space draw commands into cells, starting at buffer
/// row `top`. Commands are clipped to the play field.
struct Canvas<'a> {
    buf: &'a mut FrameBuffer,
    top: usize,
    cols: usize,
    rows: usize,
}

impl Canvas<'_> {
    /// Cells touched by `rect`, as (col, row) ranges in play-field space.
    fn cells(&self, rect: Rect) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        if rect.w <= 0 || rect.h <= 0 {
            return None;
        }
        let c0 = rect.left().div_euclid(PX_PER_COL).max(0);
        let c1 = ((rect.right() - 1).div_euclid(PX_PER_COL) + 1).min(self.cols as i32);
        let r0 = rect.top().div_euclid(PX_PER_ROW).max(0);
        let r1 = ((rect.bottom() - 1).div_euclid(PX_PER_ROW) + 1).min(self.rows as i32);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as usize..c1 as usize, r0 as usize..r1 as usize))
    }

    /// Glyph over whatever background the cell already has.
    fn overlay(&mut self, col: usize, row: usize, ch: char, fg: Color) {
        let y = self.top + row;
        let bg = self.buf.get(col, y).bg;
        self.buf.set(col, y, Cell::new(ch, fg, bg));
    }
}

impl Surface for Canvas<'_> {
    fn fill_rect(&mut self, rect: Rect, c: Rgb) {
        if let Some((cols, rows)) = self.cells(rect) {
            for row in rows {
                for col in cols.clone() {
                    self.buf.set(col, self.top + row, Cell::new(' ', Color::White, color(c)));
                }
            }
        }
    }

    fn blit(&mut self, image: Image, dest: Rect) {
        let Some((cols, rows)) = self.cells(dest) else { return };
        let first_row = rows.start;
        for row in rows {
            for col in cols.clone() {
                let (ch, fg) = match image {
                    Image::Ladder => ('H', LADDER_FG),
                    Image::Stair { flipped: false } => ('◢', STAIR_FG),
                    Image::Stair { flipped: true } => ('◣', STAIR_FG),
                    Image::Player { facing, .. } if row == first_row => {
                        (if facing == Facing::Left { '◀' } else { '▶' }, PLAYER_FG)
                    }
                    Image::Player { frame, .. } => {
                        (WALK_GLYPHS[frame % WALK_GLYPHS.len()], PLAYER_FG)
                    }
                };
                self.overlay(col, row, ch, fg);
            }
        }
    }
}

// ── Renderer ──

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    enhanced_keys: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            enhanced_keys: false,
        }
    }

    /// Enter raw mode and the alternate screen. Returns whether the
    /// terminal reports key releases.
    pub fn init(&mut self) -> io::Result<bool> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                self.writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced_keys = true;
        }
        log::info!("keyboard release events: {}", self.enhanced_keys);

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.back.cells.fill(Cell::INVALID);

        Ok(self.enhanced_keys)
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        if self.enhanced_keys {
            execute!(self.writer, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        self.front.clear();
        compose(&mut self.front, world);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colors; ResetColor would fall back to the
        // terminal's own default and leave line artifacts.
        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

// ── Compose: build front buffer content ──

fn compose(buf: &mut FrameBuffer, w: &WorldState) {
    let field_cols = (w.screen_w / PX_PER_COL).max(0) as usize;
    let field_rows = (w.screen_h / PX_PER_ROW).max(0) as usize;
    let cols = field_cols.min(buf.width);
    let rows = field_rows.min(buf.height.saturating_sub(MAP_ROW));

    // ── HUD row ──
    let body = &w.player;
    let hud = format!(
        " Room {}/{}  x:{:<5} y:{:<5} vx:{:>6.2} vy:{:>6.2} ",
        w.rooms.active_index() + 1, w.rooms.len(),
        body.bounds.x, body.bounds.y,
        body.velocity.x, body.velocity.y,
    );
    buf.fill_row(HUD_ROW, HUD_BG);
    buf.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);

    // ── Play field ──
    let mut canvas = Canvas { buf: &mut *buf, top: MAP_ROW, cols, rows };
    draw::draw(w, &mut canvas);

    // ── Message bar ──
    let msg_row = MAP_ROW + rows + 1;
    if msg_row < buf.height && !w.message.is_empty() {
        buf.fill_row(msg_row, MSG_BG);
        buf.put_str(0, msg_row, &format!(" {} ", w.message), Color::Black, MSG_BG);
    }

    // ── Help bar ──
    let help_row = MAP_ROW + rows + 3;
    if help_row < buf.height {
        let help = " A/D/←/→:Move  W/Space/↑:Jump  Esc/Q:Quit  │  Pad: D-pad/Stick, A/B:Jump, Select:Quit";
        buf.put_str(0, help_row, help, Color::DarkGrey, Cell::BASE_BG);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::domain::room::RoomSet;
    use crate::domain::tilemap::TileMap;
    use crate::sim::draw::{SKY, WALL};

    fn canvas_test(buf: &mut FrameBuffer, f: impl FnOnce(&mut Canvas)) {
        let (cols, rows) = (buf.width, buf.height);
        let mut canvas = Canvas { buf, top: 0, cols, rows };
        f(&mut canvas);
    }

    #[test]
    fn tile_covers_two_columns_one_row() {
        let mut buf = FrameBuffer::new(8, 4);
        canvas_test(&mut buf, |c| c.fill_rect(Rect::new(32, 32, 32, 32), WALL));
        let wall = color(WALL);
        for x in 0..8 {
            for y in 0..4 {
                let expect = (x == 2 || x == 3) && y == 1;
                assert_eq!(buf.get(x, y).bg == wall, expect, "cell ({x},{y})");
            }
        }
    }

    #[test]
    fn rects_clip_to_field() {
        let mut buf = FrameBuffer::new(4, 2);
        canvas_test(&mut buf, |c| c.fill_rect(Rect::new(-100, -100, 1000, 1000), SKY));
        assert!(buf.cells.iter().all(|cell| cell.bg == color(SKY)));

        let mut buf = FrameBuffer::new(4, 2);
        canvas_test(&mut buf, |c| c.fill_rect(Rect::new(500, 0, 32, 32), SKY));
        assert!(buf.cells.iter().all(|cell| *cell == Cell::BLANK));
    }

    #[test]
    fn blit_keeps_background() {
        let mut buf = FrameBuffer::new(4, 2);
        canvas_test(&mut buf, |c| {
            c.fill_rect(Rect::new(0, 0, 64, 64), SKY);
            c.blit(Image::Stair { flipped: true }, Rect::new(0, 32, 32, 32));
        });
        assert_eq!(buf.get(0, 1), Cell::new('◣', STAIR_FG, color(SKY)));
        assert_eq!(buf.get(1, 1).ch, '◣');
        assert_eq!(buf.get(0, 0).ch, ' ');
    }

    #[test]
    fn player_head_shows_facing() {
        let mut buf = FrameBuffer::new(4, 3);
        canvas_test(&mut buf, |c| {
            c.blit(Image::Player { frame: 0, facing: Facing::Left }, Rect::new(0, 16, 28, 48));
        });
        assert_eq!(buf.get(0, 0).ch, '◀');
        assert_eq!(buf.get(1, 0).ch, '◀');
        assert_eq!(buf.get(0, 1).ch, '█');
        assert_eq!(buf.get(2, 0), Cell::BLANK);
        assert_eq!(buf.get(0, 2), Cell::BLANK);
    }

    #[test]
    fn compose_writes_hud_and_field() {
        let room = TileMap::parse(&["0   ", "    "]).unwrap();
        let set = RoomSet::new(vec![room]).unwrap();
        let world = WorldState::new(set, Rect::new(64, 0, 28, 48), PhysicsConfig::default(), 128, 64);

        let mut buf = FrameBuffer::new(20, 8);
        compose(&mut buf, &world);

        let hud: String = (0..7).map(|x| buf.get(x, HUD_ROW).ch).collect();
        assert_eq!(hud, " Room 1");
        assert_eq!(buf.get(0, MAP_ROW).bg, color(WALL));
        assert_eq!(buf.get(2, MAP_ROW + 1).bg, color(SKY));
        assert_eq!(buf.get(4, MAP_ROW).ch, '▶');
        // beyond the 8-column field
        assert_eq!(buf.get(9, MAP_ROW), Cell::BLANK);
    }
}
