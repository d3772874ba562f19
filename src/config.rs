/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to defaults if the file is missing or incomplete; a file
/// that fails to parse is reported and ignored.
///
/// ```toml
/// [physics]
/// gravity = 1.5
/// terminal_velocity = 40.0
/// jump_power = 23.0
/// max_speed = 8.0
/// acceleration = 1.0
/// friction = 0.7
///
/// [display]
/// width = 1152
/// height = 960
/// tick_rate_hz = 60
///
/// [player]
/// spawn_x = 128
/// spawn_y = 128
/// width = 28
/// height = 48
/// sprite_meta = "assets/player.json"   # optional
///
/// [gamepad]
/// jump = ["A", "B"]
///
/// [general]
/// levels_dir = "levels"
/// ```

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Structs ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub display: DisplayConfig,
    pub player: PlayerConfig,
    pub gamepad: GamepadConfig,
    pub levels_dir: PathBuf,
}

/// Per-tick constants. Tuned for a fixed 60 Hz step; not scaled by time.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub jump_power: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub friction: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Logical screen size in pixels. Room transitions use `width`.
    pub width: i32,
    pub height: i32,
    pub tick_rate_hz: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerConfig {
    pub spawn_x: i32,
    pub spawn_y: i32,
    /// Used when no sprite metadata is configured.
    pub width: i32,
    pub height: i32,
    pub sprite_meta: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GamepadConfig {
    pub jump: Vec<String>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let t = TomlPhysics::default();
        PhysicsConfig {
            gravity: t.gravity,
            terminal_velocity: t.terminal_velocity,
            jump_power: t.jump_power,
            max_speed: t.max_speed,
            acceleration: t.acceleration,
            friction: t.friction,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: default_width(),
            height: default_height(),
            tick_rate_hz: default_tick_rate(),
        }
    }
}

impl DisplayConfig {
    /// Milliseconds per simulation tick.
    pub fn tick_ms(&self) -> u64 {
        1000 / u64::from(self.tick_rate_hz.max(1))
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    physics: TomlPhysics,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    player: TomlPlayer,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlPhysics {
    #[serde(default = "default_gravity")]
    gravity: f32,
    #[serde(default = "default_terminal_velocity")]
    terminal_velocity: f32,
    #[serde(default = "default_jump_power")]
    jump_power: f32,
    #[serde(default = "default_max_speed")]
    max_speed: f32,
    #[serde(default = "default_acceleration")]
    acceleration: f32,
    #[serde(default = "default_friction")]
    friction: f32,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_width")]
    width: i32,
    #[serde(default = "default_height")]
    height: i32,
    #[serde(default = "default_tick_rate")]
    tick_rate_hz: u32,
}

#[derive(Deserialize, Debug)]
struct TomlPlayer {
    #[serde(default = "default_spawn")]
    spawn_x: i32,
    #[serde(default = "default_spawn")]
    spawn_y: i32,
    #[serde(default = "default_player_width")]
    width: i32,
    #[serde(default = "default_player_height")]
    height: i32,
    #[serde(default)]
    sprite_meta: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_jump_buttons")]
    jump: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_levels_dir")]
    levels_dir: String,
}

// ── Defaults ──

fn default_gravity() -> f32 { 1.5 }
fn default_terminal_velocity() -> f32 { 40.0 }
fn default_jump_power() -> f32 { 23.0 }
fn default_max_speed() -> f32 { 8.0 }
fn default_acceleration() -> f32 { 1.0 }
fn default_friction() -> f32 { 0.7 }

fn default_width() -> i32 { 1152 }   // 36 cells
fn default_height() -> i32 { 960 }   // 30 cells
fn default_tick_rate() -> u32 { 60 }

fn default_spawn() -> i32 { 128 }
fn default_player_width() -> i32 { 28 }
fn default_player_height() -> i32 { 48 }

fn default_jump_buttons() -> Vec<String> { vec!["A".into(), "B".into()] }
fn default_levels_dir() -> String { "levels".into() }

impl Default for TomlPhysics {
    fn default() -> Self {
        TomlPhysics {
            gravity: default_gravity(),
            terminal_velocity: default_terminal_velocity(),
            jump_power: default_jump_power(),
            max_speed: default_max_speed(),
            acceleration: default_acceleration(),
            friction: default_friction(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay {
            width: default_width(),
            height: default_height(),
            tick_rate_hz: default_tick_rate(),
        }
    }
}

impl Default for TomlPlayer {
    fn default() -> Self {
        TomlPlayer {
            spawn_x: default_spawn(),
            spawn_y: default_spawn(),
            width: default_player_width(),
            height: default_player_height(),
            sprite_meta: None,
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad { jump: default_jump_buttons() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { levels_dir: default_levels_dir() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        Self::from_toml(toml_cfg, &search_dirs)
    }

    /// Parse config text directly. Relative paths resolve against CWD.
    #[cfg(test)]
    pub(crate) fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(Self::from_toml(toml_cfg, &[]))
    }

    fn from_toml(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let levels_dir = resolve_path(&toml_cfg.general.levels_dir, search_dirs, |p| p.is_dir());
        let sprite_meta = toml_cfg.player.sprite_meta
            .as_deref()
            .map(|s| resolve_path(s, search_dirs, |p| p.is_file()));

        GameConfig {
            physics: PhysicsConfig {
                gravity: toml_cfg.physics.gravity,
                terminal_velocity: toml_cfg.physics.terminal_velocity,
                jump_power: toml_cfg.physics.jump_power,
                max_speed: toml_cfg.physics.max_speed,
                acceleration: toml_cfg.physics.acceleration,
                friction: toml_cfg.physics.friction,
            },
            display: DisplayConfig {
                width: toml_cfg.display.width,
                height: toml_cfg.display.height,
                tick_rate_hz: toml_cfg.display.tick_rate_hz,
            },
            player: PlayerConfig {
                spawn_x: toml_cfg.player.spawn_x,
                spawn_y: toml_cfg.player.spawn_y,
                width: toml_cfg.player.width,
                height: toml_cfg.player.height,
                sprite_meta,
            },
            gamepad: GamepadConfig {
                jump: toml_cfg.gamepad.jump,
            },
            levels_dir,
        }
    }
}

/// Absolute paths are kept; relative ones are looked up in each search
/// dir and fall back to CWD-relative when nothing matches.
fn resolve_path(raw: &str, search_dirs: &[PathBuf], exists: impl Fn(&PathBuf) -> bool) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return path;
    }
    search_dirs.iter()
        .map(|d| d.join(raw))
        .find(|p| exists(p))
        .unwrap_or(path)
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so data next to the real binary is found.
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                Ok(cfg) => {
                    log::info!("loaded {}", path.display());
                    return cfg;
                }
                Err(e) => {
                    log::warn!("{} parse error, using default settings: {e}", path.display());
                    return TomlConfig::default();
                }
            },
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
            }
        }
    }
    log::debug!("no config.toml found, using default settings");
    TomlConfig::default()
}
