/// Entry point and game loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use config::GameConfig;
use domain::geom::Rect;
use domain::room::RoomSet;
use error::ConfigError;
use sim::event::GameEvent;
use sim::level::load_rooms;
use sim::step;
use sim::world::WorldState;
use ui::gamepad::{self, GamepadState};
use ui::input::KeyboardState;
use ui::renderer::Renderer;
use ui::sprites::SpriteSheet;

const FRAME_SLEEP: Duration = Duration::from_millis(5);
const LOG_FILE: &str = "roomhop.log";

fn main() {
    init_logging();
    let config = GameConfig::load();
    let result = run(&config);
    if let Err(e) = &result {
        log::error!("{e}");
        eprintln!("roomhop: {e}");
    }
    std::process::exit(exit_code(&result));
}

/// 0 only for a clean quit; any startup, terminal or loop failure is 1.
fn exit_code<T, E>(result: &Result<T, E>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Build the world, then own the terminal until the player quits.
/// Configuration errors surface before the terminal is touched.
fn run(config: &GameConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut world = build_world(config)?;

    let mut renderer = Renderer::new();
    let enhanced = match renderer.init() {
        Ok(enhanced) => enhanced,
        Err(e) => {
            // Raw mode may already be on.
            let _ = renderer.cleanup();
            return Err(format!("terminal init failed: {e}").into());
        }
    };

    let result = game_loop(&mut world, &mut renderer, config, enhanced);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    log::info!("quit after {} ticks", world.tick);
    result
}

/// The terminal is owned by the renderer, so log lines go to a file.
/// Filter with `RUST_LOG`; defaults to `info`.
fn init_logging() {
    let file = match std::fs::File::create(LOG_FILE) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("could not open {LOG_FILE}, logging disabled: {e}");
            return;
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn build_world(config: &GameConfig) -> Result<WorldState, ConfigError> {
    let rooms = RoomSet::new(load_rooms(config)?)?;

    let p = &config.player;
    let (mut width, mut height) = (p.width, p.height);
    let mut frames = domain::anim::PLAYER_FRAMES;
    if let Some(path) = &p.sprite_meta {
        let sheet = SpriteSheet::load(path)?;
        let cycle = sheet.player_frames()?;
        width = cycle[0].w;
        height = cycle[0].h;
        frames = cycle.len();
        log::info!("player sprite {}x{} from {}", width, height, path.display());
    }

    let d = &config.display;
    let mut world = WorldState::new(
        rooms,
        Rect::new(p.spawn_x, p.spawn_y, width, height),
        config.physics.clone(),
        d.width,
        d.height,
    );
    world.player_frames = frames;
    log::info!("{} rooms, screen {}x{} at {} Hz", world.rooms.len(), d.width, d.height, d.tick_rate_hz);
    Ok(world)
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    config: &GameConfig,
    enhanced_keys: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = KeyboardState::new(enhanced_keys);
    let mut gp = GamepadState::new(&config.gamepad);
    if gp.connected {
        log::info!("gamepad detected");
    }
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.display.tick_ms());

    loop {
        kb.drain_events();
        gp.update();

        if kb.quit_requested() || gp.quit_requested() {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            let input = gamepad::merge(kb.snapshot(), gp.snapshot());
            let events = step::step(world, input);
            log_events(&events);
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::RoomEntered { .. } | GameEvent::RoomBlocked { .. } => {}
            other => log::debug!("{other:?}"),
        }
    }
}
