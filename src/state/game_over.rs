use crate::error::Result;
use crate::game::GameOverCause;
use crate::input::Input;
use crate::menu::{Menu, MenuItem, MenuOutcome};
use crate::renderer::Renderer;
use crate::settings::SettingsHandle;

use super::{Screen, Transition};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverAction {
    PlayAgain,
    MainMenu,
}

/// Final score screen pushed over a finished game.
#[derive(Debug)]
pub struct GameOverState {
    settings: SettingsHandle,
    final_score: u32,
    cause: Option<GameOverCause>,
    menu: Menu<GameOverAction>,
}

impl GameOverState {
    #[must_use]
    pub fn new(settings: SettingsHandle, final_score: u32, cause: Option<GameOverCause>) -> Self {
        let mut state = Self {
            settings,
            final_score,
            cause,
            menu: Menu::new(),
        };
        state.build_menu();
        state
    }

    pub fn enter(&mut self) {
        self.build_menu();
    }

    pub fn process_input(&mut self, input: Input) -> Transition<Screen> {
        if matches!(input, Input::Back | Input::Quit) {
            return self.activate(GameOverAction::MainMenu);
        }

        match self.menu.handle_input(input) {
            MenuOutcome::Activated(action) => self.activate(action),
            _ => Transition::None,
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.render_menu(&self.menu.view(self.title()))
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Game Over! Score: {}", self.final_score)
    }

    #[must_use]
    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    #[must_use]
    pub fn cause(&self) -> Option<GameOverCause> {
        self.cause
    }

    #[must_use]
    pub fn menu(&self) -> &Menu<GameOverAction> {
        &self.menu
    }

    fn activate(&self, action: GameOverAction) -> Transition<Screen> {
        match action {
            GameOverAction::PlayAgain => {
                Transition::Change(Screen::gameplay(self.settings.clone()))
            }
            GameOverAction::MainMenu => {
                Transition::Change(Screen::main_menu(self.settings.clone()))
            }
        }
    }

    fn build_menu(&mut self) {
        self.menu.clear();
        self.menu.add_item(MenuItem::text("Play Again", GameOverAction::PlayAgain));
        self.menu.add_item(MenuItem::text("Main Menu", GameOverAction::MainMenu));
        self.menu.set_instructions(format!(
            "{} Use ↑/↓ to select options, ↵ to confirm, Esc to return to main menu",
            cause_text(self.cause)
        ));
    }
}

fn cause_text(cause: Option<GameOverCause>) -> &'static str {
    match cause {
        Some(GameOverCause::Wall) => "You hit a wall.",
        Some(GameOverCause::SelfCollision) => "You ran into yourself.",
        Some(GameOverCause::BoardFilled) => "The board is full. You win!",
        None => "",
    }
}
