use std::time::Duration;

use tracing::{debug, info};

use crate::config::INITIAL_SNAKE_LENGTH;
use crate::error::Result;
use crate::game::{Game, GameConfig};
use crate::input::{Input, key_for_direction};
use crate::renderer::Renderer;
use crate::settings::SettingsHandle;

use super::{GameOverState, Screen, Transition};

/// Runs one game, advancing it once per `1 / speed` seconds of accumulated
/// frame time.
#[derive(Debug)]
pub struct GamePlayState {
    settings: SettingsHandle,
    game: Game,
    accumulator: Duration,
    sound_enabled: bool,
    bell_pending: bool,
}

impl GamePlayState {
    /// Sizes the game from the settings as they are right now.
    #[must_use]
    pub fn new(settings: SettingsHandle) -> Self {
        let current = settings.get();
        let game = Game::from_config(GameConfig {
            width: current.board_width(),
            height: current.board_height(),
            initial_length: INITIAL_SNAKE_LENGTH,
            walls: current.walls_enabled(),
            speed: current.game_speed(),
            seed: settings.seed(),
        });

        Self {
            settings,
            game,
            accumulator: Duration::ZERO,
            sound_enabled: current.sound_enabled(),
            bell_pending: false,
        }
    }

    pub fn enter(&mut self) {
        self.game.initialize();
        self.accumulator = Duration::ZERO;
        self.bell_pending = false;
        info!(
            width = self.game.board().width(),
            height = self.game.board().height(),
            walls = self.game.board().has_walls(),
            speed = self.game.speed(),
            "game started"
        );
    }

    pub fn exit(&mut self) {
        debug!(score = self.game.score(), "left gameplay");
    }

    pub fn process_input(&mut self, input: Input) -> Transition<Screen> {
        if let Some(direction) = input.direction() {
            return self.process_key_code(key_for_direction(direction));
        }

        match input {
            Input::Pause => {
                self.toggle_pause();
                Transition::None
            }
            Input::Back if self.game.is_paused() || self.game.is_game_over() => Transition::Pop,
            Input::Back => {
                self.game.pause();
                Transition::None
            }
            Input::Quit => Transition::Pop,
            _ => Transition::None,
        }
    }

    /// Feeds a single-character key code straight to the game.
    pub fn process_key_code(&mut self, key: char) -> Transition<Screen> {
        self.game.process_key_press(key);

        if self.game.is_quit_requested() {
            Transition::Pop
        } else {
            Transition::None
        }
    }

    pub fn update(&mut self, delta: Duration) -> Transition<Screen> {
        if self.game.is_paused() || self.game.is_game_over() {
            return Transition::None;
        }

        self.accumulator += delta;
        if self.accumulator >= self.game.tick_interval() {
            let score_before = self.game.score();
            self.game.update();
            self.accumulator = Duration::ZERO;

            if self.sound_enabled && self.game.score() > score_before {
                self.bell_pending = true;
            }
        }

        if self.game.is_game_over() {
            return Transition::Push(Screen::GameOver(GameOverState::new(
                self.settings.clone(),
                self.game.score(),
                self.game.game_over_cause(),
            )));
        }

        Transition::None
    }

    pub fn render(&mut self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.render(&self.game.snapshot())?;

        if self.bell_pending {
            self.bell_pending = false;
            renderer.bell();
        }

        Ok(())
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.game.is_paused()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game.is_game_over()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.game.score()
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    fn toggle_pause(&mut self) {
        if self.game.is_paused() {
            self.game.resume();
        } else {
            self.game.pause();
        }
    }
}
