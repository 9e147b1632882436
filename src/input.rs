use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step `(dx, dy)` for one cell of movement. `y` grows downwards.
    #[must_use]
    pub fn unit_offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Normalized input signal consumed by menus and screens.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Input {
    None,
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
    Pause,
    Quit,
}

impl Input {
    /// Returns the movement direction carried by this input, if any.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Single-character key codes understood by [`crate::game::Game::process_key_press`].
pub mod keys {
    pub const UP: char = 'w';
    pub const DOWN: char = 's';
    pub const LEFT: char = 'a';
    pub const RIGHT: char = 'd';
    pub const PAUSE: char = 'p';
    pub const RESET: char = 'r';
    pub const QUIT: char = 'q';
}

/// Returns the legacy key code that steers the snake in `direction`.
#[must_use]
pub fn key_for_direction(direction: Direction) -> char {
    match direction {
        Direction::Up => keys::UP,
        Direction::Down => keys::DOWN,
        Direction::Left => keys::LEFT,
        Direction::Right => keys::RIGHT,
    }
}

/// Resolves legacy key codes into a steering direction and a quit request.
///
/// The last recognised direction is sticky: unrelated keys leave it untouched.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct KeyState {
    direction: Direction,
    quit_requested: bool,
}

impl Default for KeyState {
    fn default() -> Self {
        Self {
            direction: Direction::Right,
            quit_requested: false,
        }
    }
}

impl KeyState {
    /// Folds one key code into the current state.
    pub fn process_key(&mut self, key: char) {
        match key {
            keys::UP => self.direction = Direction::Up,
            keys::DOWN => self.direction = Direction::Down,
            keys::LEFT => self.direction = Direction::Left,
            keys::RIGHT => self.direction = Direction::Right,
            keys::QUIT => self.quit_requested = true,
            _ => {}
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Source of normalized input for the frame loop.
pub trait InputSource {
    /// Waits up to `timeout` for one input. Returns `Ok(None)` when nothing
    /// relevant arrived.
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>>;
}

/// Polls crossterm for key events and normalizes them into [`Input`].
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for InputHandler {
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Ok(Some(map_key_event(key)).filter(|input| *input != Input::None))
            }
            _ => Ok(None),
        }
    }
}

/// Maps one terminal key event to the normalized input set.
#[must_use]
pub fn map_key_event(key: KeyEvent) -> Input {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Input::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => Input::Up,
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => Input::Down,
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => Input::Left,
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => Input::Right,
        KeyCode::Enter | KeyCode::Char(' ') => Input::Select,
        KeyCode::Esc | KeyCode::Backspace => Input::Back,
        KeyCode::Char('p' | 'P') => Input::Pause,
        KeyCode::Char('q' | 'Q') => Input::Quit,
        _ => Input::None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{Direction, Input, KeyState, key_for_direction, keys, map_key_event};

    #[test]
    fn opposite_direction_is_an_involution() {
        for direction in Direction::ALL {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_offsets_cancel_out() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.unit_offset();
            let (ox, oy) = direction.opposite().unit_offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn key_state_tracks_last_direction_and_quit() {
        let mut state = KeyState::default();
        assert_eq!(state.direction(), Direction::Right);

        state.process_key(keys::UP);
        state.process_key('x');
        assert_eq!(state.direction(), Direction::Up);
        assert!(!state.is_quit_requested());

        state.process_key(keys::QUIT);
        assert!(state.is_quit_requested());

        state.reset();
        assert_eq!(state, KeyState::default());
    }

    #[test]
    fn direction_keys_resolve_back_to_direction() {
        for direction in Direction::ALL {
            let mut state = KeyState::default();
            state.process_key(key_for_direction(direction));
            assert_eq!(state.direction(), direction);
        }
    }

    #[test]
    fn terminal_keys_map_to_inputs() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(map_key_event(key(KeyCode::Up)), Input::Up);
        assert_eq!(map_key_event(key(KeyCode::Char('a'))), Input::Left);
        assert_eq!(map_key_event(key(KeyCode::Enter)), Input::Select);
        assert_eq!(map_key_event(key(KeyCode::Esc)), Input::Back);
        assert_eq!(map_key_event(key(KeyCode::Char('p'))), Input::Pause);
        assert_eq!(map_key_event(key(KeyCode::Char('q'))), Input::Quit);
        assert_eq!(map_key_event(key(KeyCode::Tab)), Input::None);
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Input::Quit
        );
    }

    #[test]
    fn only_arrow_inputs_carry_direction() {
        assert_eq!(Input::Left.direction(), Some(Direction::Left));
        assert_eq!(Input::Select.direction(), None);
        assert_eq!(Input::None.direction(), None);
    }
}
