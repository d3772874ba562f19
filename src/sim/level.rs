/// Room loader.
///
/// ## Sources (priority order):
///   1. `levels/` directory: every `*.txt` file is one room, played in
///      file-name order
///   2. Built-in embedded rooms
///
/// ## Room format (`.txt`):
///   One line per grid row, one character per 32 px cell. No header.
///
/// ## Tile legend:
///   ' ' = Empty      '0' = Wall
///   '1' = Ladder     '2' = Left stair (rises right)
///   '3' = Right stair (rises left)
///
/// A room file with a character outside the legend aborts loading;
/// nothing is silently substituted.

use std::path::{Path, PathBuf};

use crate::config::GameConfig;
use crate::domain::tilemap::TileMap;
use crate::error::ConfigError;

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Load the room sequence for this run.
pub fn load_rooms(config: &GameConfig) -> Result<Vec<TileMap>, ConfigError> {
    let dir = &config.levels_dir;
    if dir.is_dir() {
        if let Some(rooms) = load_from_directory(dir)? {
            log::info!("loaded {} rooms from {}", rooms.len(), dir.display());
            return Ok(rooms);
        }
        log::info!("{} has no room files, using built-in rooms", dir.display());
    }
    embedded_rooms()
}

/// Parse one room file's contents.
pub fn parse_room(content: &str) -> Result<TileMap, ConfigError> {
    let rows: Vec<&str> = content.lines().collect();
    TileMap::parse(&rows)
}

// ══════════════════════════════════════════════════════════════
// Directory loading (individual .txt files)
// ══════════════════════════════════════════════════════════════

/// `Ok(None)` when the directory holds no `.txt` files.
fn load_from_directory(dir: &Path) -> Result<Option<Vec<TileMap>>, ConfigError> {
    let entries = std::fs::read_dir(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().map_or(false, |e| e == "txt"))
        .collect();
    if files.is_empty() {
        return Ok(None);
    }
    files.sort();

    let mut rooms = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let room = parse_room(&content).map_err(|e| ConfigError::Level {
            file: path.clone(),
            source: Box::new(e),
        })?;
        log::debug!(
            "{}: {}x{} cells, {} colliders",
            path.display(), room.cols(), room.rows(), room.colliders().len()
        );
        rooms.push(room);
    }
    Ok(Some(rooms))
}

// ══════════════════════════════════════════════════════════════
// Embedded rooms
// ══════════════════════════════════════════════════════════════

pub fn embedded_rooms() -> Result<Vec<TileMap>, ConfigError> {
    EMBEDDED.iter().map(|rows| TileMap::parse(rows)).collect()
}

const EMBEDDED: [&[&str]; 3] = [
    &[
        "000000000000000000000000000000000000",
        "0                                  0",
        "0                0                 0",
        "0               00                 0",
        "0              0 0                 0",
        "0                0                 0",
        "0                0                 0",
        "0                0                 0",
        "0                0                 0",
        "0                0                 0",
        "0                0                 0",
        "0              00000               0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                   ",
        "0                                   ",
        "0                         2         ",
        "0                        20         ",
        "0                       200         ",
        "000000000000000000000000000000000000",
    ],
    &[
        "000000000000000000000000000000000000",
        "0                                  0",
        "0             000000               0",
        "0            0      0              0",
        "0            0      0              0",
        "0                  00              0",
        "0                 00               0",
        "0                00                0",
        "0              00                  0",
        "0             0                    0",
        "0             00000000             0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                   ",
        "0                                   ",
        "0                                   ",
        "0                               0000",
        "0                                   ",
        "                                    ",
        "                                    ",
        "            2   3                   ",
        "           20   03                  ",
        "          200   003                 ",
        "000000000000000000000000000000000000",
    ],
    &[
        "000000000000000000000000000000000000",
        "0                                  0",
        "0            000000                0",
        "0                  0               0",
        "0                   0              0",
        "0                   0              0",
        "0                  0               0",
        "0            000000                0",
        "0                 00               0",
        "0                  00              0",
        "0                   0              0",
        "0                  00              0",
        "0            00   00               0",
        "0             00000                0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "0                                  0",
        "                          1        0",
        "                          1        0",
        "                          1        0",
        "00000000    0000000000000 1        0",
        "                          1        0",
        "                          1        0",
        "                          1        0",
        "                          1        0",
        "                          1        0",
        "                          1        0",
        "000000000000000000000000000000000000",
    ],
];
