//! Screen stack: the top state receives every input, update and render.
//!
//! States never touch the stack directly. They return a [`Transition`] and
//! the [`StateManager`] applies it once the call has finished, so each state
//! is entered and exited exactly once.

mod game_over;
mod gameplay;
mod main_menu;
mod settings_menu;

use std::time::Duration;

use tracing::debug;

pub use game_over::{GameOverAction, GameOverState};
pub use gameplay::GamePlayState;
pub use main_menu::{MainMenuAction, MainMenuState};
pub use settings_menu::{SettingsAction, SettingsMenuState};

use crate::error::Result;
use crate::input::Input;
use crate::renderer::Renderer;
use crate::settings::SettingsHandle;

/// Stack change requested by a state.
#[derive(Debug)]
pub enum Transition<S> {
    None,
    /// Enter `S` on top of the current state.
    Push(S),
    /// Exit and remove the requesting state.
    Pop,
    /// Exit every stacked state, then enter `S` alone.
    Change(S),
}

impl<S> Transition<S> {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// One screen on the stack.
pub trait GameState: Sized {
    fn enter(&mut self) {}

    fn exit(&mut self) {}

    fn process_input(&mut self, input: Input) -> Transition<Self>;

    fn update(&mut self, delta: Duration) -> Transition<Self>;

    fn render(&mut self, renderer: &mut dyn Renderer) -> Result<()>;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "state"
    }
}

/// Stack of states. Every operation on an empty stack is a no-op.
#[derive(Debug)]
pub struct StateManager<S = Screen> {
    stack: Vec<S>,
}

impl<S> Default for StateManager<S> {
    fn default() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<S: GameState> StateManager<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exits every stacked state top to bottom, then enters `state`.
    pub fn change_state(&mut self, state: S) {
        self.clear();
        self.push_state(state);
    }

    /// Enters `state` on top without exiting the current top.
    pub fn push_state(&mut self, mut state: S) {
        debug!(state = state.name(), depth = self.stack.len() + 1, "push state");
        state.enter();
        self.stack.push(state);
    }

    /// Exits and removes the top state, if any.
    pub fn pop_state(&mut self) {
        if let Some(mut state) = self.stack.pop() {
            debug!(state = state.name(), depth = self.stack.len(), "pop state");
            state.exit();
        }
    }

    /// Exits and removes every state, top first.
    pub fn clear(&mut self) {
        while !self.stack.is_empty() {
            self.pop_state();
        }
    }

    #[must_use]
    pub fn has_active_state(&self) -> bool {
        !self.stack.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[must_use]
    pub fn top(&self) -> Option<&S> {
        self.stack.last()
    }

    pub fn process_input(&mut self, input: Input) {
        if let Some(top) = self.stack.last_mut() {
            let transition = top.process_input(input);
            self.apply(transition);
        }
    }

    pub fn update(&mut self, delta: Duration) {
        if let Some(top) = self.stack.last_mut() {
            let transition = top.update(delta);
            self.apply(transition);
        }
    }

    pub fn render(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        match self.stack.last_mut() {
            Some(top) => top.render(renderer),
            None => Ok(()),
        }
    }

    /// Applies a transition returned by the top state.
    pub fn apply(&mut self, transition: Transition<S>) {
        match transition {
            Transition::None => {}
            Transition::Push(state) => self.push_state(state),
            Transition::Pop => self.pop_state(),
            Transition::Change(state) => self.change_state(state),
        }
    }
}

/// The closed set of screens the game shows.
#[derive(Debug)]
pub enum Screen {
    MainMenu(MainMenuState),
    GamePlay(Box<GamePlayState>),
    Settings(SettingsMenuState),
    GameOver(GameOverState),
}

impl Screen {
    #[must_use]
    pub fn main_menu(settings: SettingsHandle) -> Self {
        Self::MainMenu(MainMenuState::new(settings))
    }

    #[must_use]
    pub fn gameplay(settings: SettingsHandle) -> Self {
        Self::GamePlay(Box::new(GamePlayState::new(settings)))
    }

    #[must_use]
    pub fn settings(settings: SettingsHandle) -> Self {
        Self::Settings(SettingsMenuState::new(settings))
    }
}

impl GameState for Screen {
    fn enter(&mut self) {
        match self {
            Self::MainMenu(state) => state.enter(),
            Self::GamePlay(state) => state.enter(),
            Self::Settings(state) => state.enter(),
            Self::GameOver(state) => state.enter(),
        }
    }

    fn exit(&mut self) {
        match self {
            Self::GamePlay(state) => state.exit(),
            Self::MainMenu(_) | Self::Settings(_) | Self::GameOver(_) => {}
        }
    }

    fn process_input(&mut self, input: Input) -> Transition<Self> {
        match self {
            Self::MainMenu(state) => state.process_input(input),
            Self::GamePlay(state) => state.process_input(input),
            Self::Settings(state) => state.process_input(input),
            Self::GameOver(state) => state.process_input(input),
        }
    }

    fn update(&mut self, delta: Duration) -> Transition<Self> {
        match self {
            Self::GamePlay(state) => state.update(delta),
            Self::MainMenu(_) | Self::Settings(_) | Self::GameOver(_) => Transition::None,
        }
    }

    fn render(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        match self {
            Self::MainMenu(state) => state.render(renderer),
            Self::GamePlay(state) => state.render(renderer),
            Self::Settings(state) => state.render(renderer),
            Self::GameOver(state) => state.render(renderer),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::MainMenu(_) => "main-menu",
            Self::GamePlay(_) => "gameplay",
            Self::Settings(_) => "settings",
            Self::GameOver(_) => "game-over",
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::error::Result;
    use crate::renderer::{GameSnapshot, MenuView, Renderer};

    /// Renderer that remembers what it was asked to draw.
    #[derive(Debug, Default)]
    pub struct RecordingRenderer {
        pub menus: Vec<MenuView>,
        pub game_frames: usize,
        pub bells: usize,
    }

    impl Renderer for RecordingRenderer {
        fn initialize(&mut self) -> Result<()> {
            Ok(())
        }

        fn shutdown(&mut self) {}

        fn is_window_open(&self) -> bool {
            true
        }

        fn render(&mut self, _game: &GameSnapshot<'_>) -> Result<()> {
            self.game_frames += 1;
            Ok(())
        }

        fn render_menu(&mut self, menu: &MenuView) -> Result<()> {
            self.menus.push(menu.clone());
            Ok(())
        }

        fn bell(&mut self) {
            self.bells += 1;
        }
    }
}
