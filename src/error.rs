/// Error taxonomy.
///
///   - `ConfigError`: bad level data or sprite metadata. Raised at load
///     time, before the frame loop starts. Never recovered silently.
///   - `BoundsError`: a room transition pointed past either end of the
///     room sequence. Reported, then clamped by the caller.
///
/// Collision resolution has no error type: it is total over its inputs.

use std::fmt;
use std::path::PathBuf;

use crate::domain::body::Facing;

#[derive(Debug)]
pub enum ConfigError {
    /// A room row contains a character outside the tile legend.
    UnknownCell { row: usize, col: usize, code: char },
    /// The room sequence is empty.
    NoRooms,
    Io { path: PathBuf, source: std::io::Error },
    SpriteMeta { path: PathBuf, source: serde_json::Error },
    /// Sprite metadata parsed but lacks a required frame.
    MissingFrame { name: String },
    /// Wraps an error raised while parsing a room file.
    Level { file: PathBuf, source: Box<ConfigError> },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownCell { row, col, code } => {
                write!(f, "unknown tile code {:?} at row {}, column {}", code, row, col)
            }
            ConfigError::NoRooms => write!(f, "no rooms to play"),
            ConfigError::Io { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            ConfigError::SpriteMeta { path, source } => {
                write!(f, "corrupt sprite metadata {}: {}", path.display(), source)
            }
            ConfigError::MissingFrame { name } => {
                write!(f, "sprite metadata has no frame named {:?}", name)
            }
            ConfigError::Level { file, source } => {
                write!(f, "{}: {}", file.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::SpriteMeta { source, .. } => Some(source),
            ConfigError::Level { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// A room transition had no room to go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsError {
    /// Index of the room the body tried to leave.
    pub from: usize,
    /// Screen edge the body crossed.
    pub direction: Facing,
    /// Number of rooms in the set.
    pub rooms: usize,
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.direction {
            Facing::Left => "left of the first",
            Facing::Right => "right of the last",
        };
        write!(
            f,
            "no room {} room (left room {} of {}); staying put",
            side, self.from, self.rooms,
        )
    }
}

impl std::error::Error for BoundsError {}
