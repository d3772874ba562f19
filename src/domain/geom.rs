/// Integer pixel-space rectangles.
///
/// Origin is the top-left of the screen, y grows downward.
/// `right()` and `bottom()` are exclusive edges (`x + w`, `y + h`),
/// so two rectangles that merely share an edge do not collide.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 { self.x }
    #[inline]
    pub fn right(&self) -> i32 { self.x + self.w }
    #[inline]
    pub fn top(&self) -> i32 { self.y }
    #[inline]
    pub fn bottom(&self) -> i32 { self.y + self.h }

    pub fn set_left(&mut self, left: i32) { self.x = left; }
    pub fn set_right(&mut self, right: i32) { self.x = right - self.w; }

    /// Copy shifted by a pixel offset.
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Shift in place.
    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Strict overlap test. Empty rectangles never collide.
    #[inline]
    pub fn collides(&self, other: &Rect) -> bool {
        self.w > 0 && self.h > 0 && other.w > 0 && other.h > 0
            && self.x < other.right() && other.x < self.right()
            && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Convert a sub-pixel displacement to whole pixels. Truncates toward zero.
#[inline]
pub fn to_px(v: f32) -> i32 {
    v as i32
}
