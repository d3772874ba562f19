/// Keyboard state tracker.
///
/// Terminals report key presses, not key state. Held keys are tracked
/// by the time of their last Press/Repeat event. When the terminal
/// confirms keyboard enhancement, Release events end a hold directly;
/// otherwise a hold expires after `HOLD_TIMEOUT` without repeats.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::body::InputSnapshot;

/// Only used when the terminal doesn't report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const JUMP_KEYS: [KeyCode; 4] = [KeyCode::Up, KeyCode::Char(' '), KeyCode::Char('w'), KeyCode::Char('W')];

pub struct KeyboardState {
    last_active: HashMap<KeyCode, Instant>,
    quit: bool,
    /// True only when keyboard enhancement is confirmed.
    pub honor_release: bool,
}

impl KeyboardState {
    pub fn new(honor_release: bool) -> Self {
        KeyboardState {
            last_active: HashMap::with_capacity(16),
            quit: false,
            honor_release,
        }
    }

    /// Drain all pending terminal events. Call once per frame, before
    /// taking a snapshot.
    pub fn drain_events(&mut self) {
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                self.apply(key, Instant::now());
            }
        }
        if !self.honor_release {
            let now = Instant::now();
            self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
        }
    }

    fn apply(&mut self, key: KeyEvent, now: Instant) {
        match key.kind {
            KeyEventKind::Release if self.honor_release => {
                self.last_active.remove(&key.code);
            }
            KeyEventKind::Release => {}
            _ => {
                if is_quit(&key) {
                    self.quit = true;
                }
                self.last_active.insert(key.code, now);
            }
        }
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            move_left: self.any_held(&LEFT_KEYS),
            move_right: self.any_held(&RIGHT_KEYS),
            jump: self.any_held(&JUMP_KEYS),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn any_held(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.is_held(*c))
    }

    fn is_held(&self, code: KeyCode) -> bool {
        match self.last_active.get(&code) {
            Some(_) if self.honor_release => true,
            Some(t) => t.elapsed() < HOLD_TIMEOUT,
            None => false,
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') | KeyCode::Char('C') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
