/// Gamepad input tracker using gilrs.
///
/// Mapping:
///   D-pad / Left Stick X  →  Move left / right
///   `[gamepad] jump`      →  Jump (default A, B)
///   Select                →  Quit
///
/// Without the `gamepad` feature the tracker exists but never reports
/// anything.

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::body::InputSnapshot;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Face and shoulder buttons that can be bound to jump.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    L2,
    R2,
    Start,
    Select,
}

const BTN_COUNT: usize = 10;

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "L2" | "LT" | "LEFTTRIGGER2"  => Some(Btn::L2),
            "R2" | "RT" | "RIGHTTRIGGER2" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East  => Some(Btn::B),
            Button::West  => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger   => Some(Btn::L1),
            Button::RightTrigger  => Some(Btn::R1),
            Button::LeftTrigger2  => Some(Btn::L2),
            Button::RightTrigger2 => Some(Btn::R2),
            Button::Start  => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Parse configured jump button names. Unknown names are skipped with a
/// warning; an empty result keeps the defaults.
fn parse_jump_buttons(names: &[String]) -> Vec<Btn> {
    let parsed: Vec<Btn> = names
        .iter()
        .filter_map(|s| {
            let btn = Btn::from_name(s);
            if btn.is_none() {
                log::warn!("unknown gamepad button {s:?} in [gamepad] jump");
            }
            btn
        })
        .collect();
    if parsed.is_empty() { vec![Btn::A, Btn::B] } else { parsed }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    buttons: [bool; BTN_COUNT],
    dpad_left: bool,
    dpad_right: bool,
    stick_x: f32,

    jump: Vec<Btn>,
    quit: bool,

    pub connected: bool,
}

impl GamepadState {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                log::warn!("gamepad support unavailable: {e}");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            buttons: [false; BTN_COUNT],
            dpad_left: false,
            dpad_right: false,
            stick_x: 0.0,
            jump: parse_jump_buttons(&cfg.jump),
            quit: false,
            connected,
        }
    }

    pub fn update(&mut self) {
        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.set_button(btn, true);
                }
                EventType::ButtonReleased(btn, _) => {
                    self.connected = true;
                    self.set_button(btn, false);
                }
                EventType::AxisChanged(Axis::LeftStickX, value, _) => {
                    self.connected = true;
                    self.stick_x = value;
                }
                EventType::Connected => {
                    log::info!("gamepad connected");
                    self.connected = true;
                }
                EventType::Disconnected => {
                    log::info!("gamepad disconnected");
                    self.connected = false;
                    self.release_all();
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn set_button(&mut self, gilrs_btn: Button, held: bool) {
        match gilrs_btn {
            Button::DPadLeft  => { self.dpad_left = held; return; }
            Button::DPadRight => { self.dpad_right = held; return; }
            _ => {}
        }
        if let Some(btn) = Btn::from_gilrs(gilrs_btn) {
            self.press(btn, held);
        }
    }

    fn press(&mut self, btn: Btn, held: bool) {
        self.buttons[btn as usize] = held;
        if held && btn == Btn::Select {
            self.quit = true;
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            move_left: self.dpad_left || self.stick_x < -STICK_DEADZONE,
            move_right: self.dpad_right || self.stick_x > STICK_DEADZONE,
            jump: self.jump.iter().any(|&b| self.buttons[b as usize]),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        self.buttons = [false; BTN_COUNT];
        self.dpad_left = false;
        self.dpad_right = false;
        self.stick_x = 0.0;
    }
}

/// Keyboard and gamepad are read independently and OR-ed together.
pub fn merge(a: InputSnapshot, b: InputSnapshot) -> InputSnapshot {
    InputSnapshot {
        move_left: a.move_left || b.move_left,
        move_right: a.move_right || b.move_right,
        jump: a.jump || b.jump,
    }
}
