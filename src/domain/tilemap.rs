/// Room geometry: textual rows → static colliders.
///
/// Each non-space character produces one `CELL_SIZE`-square collider at
/// `(col * CELL_SIZE, row * CELL_SIZE)`. Rows may be ragged; a short row
/// simply has no colliders past its end. Colliders are stored in row-major
/// scan order, which the resolver's fold depends on.

use crate::error::ConfigError;

use super::geom::Rect;
use super::tile::{Collider, ColliderKind};

/// Grid unit in pixels.
pub const CELL_SIZE: i32 = 32;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TileMap {
    colliders: Vec<Collider>,
    cols: usize,
    rows: usize,
}

impl TileMap {
    /// Parse a room. Fails on the first character outside the legend.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<TileMap, ConfigError> {
        let mut colliders = Vec::new();
        let mut cols = 0;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            for (x, code) in row.chars().enumerate() {
                cols = cols.max(x + 1);
                if code == ' ' {
                    continue;
                }
                let kind = ColliderKind::from_code(code)
                    .ok_or(ConfigError::UnknownCell { row: y, col: x, code })?;
                colliders.push(Collider {
                    kind,
                    bounds: cell_rect(x, y),
                });
            }
        }

        Ok(TileMap { colliders, cols, rows: rows.len() })
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Widest row, in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

#[inline]
fn cell_rect(col: usize, row: usize) -> Rect {
    Rect::new(col as i32 * CELL_SIZE, row as i32 * CELL_SIZE, CELL_SIZE, CELL_SIZE)
}
