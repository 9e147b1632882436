use crate::error::Result;
use crate::input::Input;
use crate::menu::{Menu, MenuItem, MenuOutcome};
use crate::renderer::Renderer;
use crate::settings::SettingsHandle;

use super::{Screen, Transition};

const TITLE: &str = "Greedy Snake";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MainMenuAction {
    StartGame,
    Settings,
    Exit,
}

/// Title screen. Leaving it empties the stack, which ends the run.
#[derive(Debug)]
pub struct MainMenuState {
    settings: SettingsHandle,
    menu: Menu<MainMenuAction>,
}

impl MainMenuState {
    #[must_use]
    pub fn new(settings: SettingsHandle) -> Self {
        let mut state = Self {
            settings,
            menu: Menu::new(),
        };
        state.build_menu();
        state
    }

    pub fn enter(&mut self) {
        self.build_menu();
    }

    pub fn process_input(&mut self, input: Input) -> Transition<Screen> {
        if input == Input::Quit {
            return Transition::Pop;
        }

        match self.menu.handle_input(input) {
            MenuOutcome::Activated(action) => self.activate(action),
            _ => Transition::None,
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.render_menu(&self.menu.view(TITLE))
    }

    #[must_use]
    pub fn menu(&self) -> &Menu<MainMenuAction> {
        &self.menu
    }

    fn activate(&self, action: MainMenuAction) -> Transition<Screen> {
        match action {
            MainMenuAction::StartGame => Transition::Push(Screen::gameplay(self.settings.clone())),
            MainMenuAction::Settings => Transition::Push(Screen::settings(self.settings.clone())),
            MainMenuAction::Exit => Transition::Pop,
        }
    }

    fn build_menu(&mut self) {
        self.menu.clear();
        self.menu.add_item(MenuItem::text("Start Game", MainMenuAction::StartGame));
        self.menu.add_item(MenuItem::text("Settings", MainMenuAction::Settings));
        self.menu.add_item(MenuItem::text("Exit", MainMenuAction::Exit));
        self.menu.set_instructions("Use ↑/↓ to select options, ↵ to confirm");
    }
}
