/// Sprite sheet metadata (TexturePacker "hash" JSON).
///
/// Only the frame table is read; pixels are never decoded in the
/// terminal build. The player's hitbox comes from frame 0's size.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::domain::anim::PLAYER_FRAMES;
use crate::error::ConfigError;

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Deserialize, Debug)]
struct FrameEntry {
    frame: FrameRect,
}

#[derive(Deserialize, Debug)]
pub struct SpriteSheet {
    frames: HashMap<String, FrameEntry>,
}

impl SpriteSheet {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// `path` is only used for error reporting.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::SpriteMeta {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn frame(&self, name: &str) -> Result<FrameRect, ConfigError> {
        self.frames
            .get(name)
            .map(|e| e.frame)
            .ok_or_else(|| ConfigError::MissingFrame { name: name.to_string() })
    }

    /// The walk cycle, `player0.png` through `player6.png`.
    pub fn player_frames(&self) -> Result<Vec<FrameRect>, ConfigError> {
        (0..PLAYER_FRAMES)
            .map(|i| self.frame(&format!("player{i}.png")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_json(count: usize) -> String {
        let entries: Vec<String> = (0..count)
            .map(|i| format!(
                r#""player{i}.png": {{"frame": {{"x": {}, "y": 0, "w": 28, "h": 48}}, "rotated": false}}"#,
                i * 28
            ))
            .collect();
        format!(r#"{{"frames": {{{}}}, "meta": {{"app": "test"}}}}"#, entries.join(","))
    }

    #[test]
    fn reads_all_player_frames() {
        let sheet = SpriteSheet::from_json(&sheet_json(7), Path::new("p.json")).unwrap();
        let frames = sheet.player_frames().unwrap();
        assert_eq!(frames.len(), PLAYER_FRAMES);
        assert_eq!(frames[0], FrameRect { x: 0, y: 0, w: 28, h: 48 });
        assert_eq!(frames[6].x, 168);
    }

    #[test]
    fn missing_frame_is_named() {
        let sheet = SpriteSheet::from_json(&sheet_json(5), Path::new("p.json")).unwrap();
        match sheet.player_frames() {
            Err(ConfigError::MissingFrame { name }) => assert_eq!(name, "player5.png"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn corrupt_json_reports_path() {
        let err = SpriteSheet::from_json("{\"frames\": [", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, ConfigError::SpriteMeta { ref path, .. } if path == Path::new("bad.json")));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SpriteSheet::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
