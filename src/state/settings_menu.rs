use tracing::info;

use crate::config::{BOARD_SIZE_RANGE, GAME_SPEED_RANGE};
use crate::error::Result;
use crate::input::Input;
use crate::menu::{Menu, MenuItem, MenuOutcome};
use crate::renderer::Renderer;
use crate::settings::{GameSettings, SettingsHandle};

use super::{Screen, Transition};

const TITLE: &str = "Settings";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SettingsAction {
    GameSpeed,
    BoardWidth,
    BoardHeight,
    Walls,
    Sound,
    Save,
    Cancel,
}

/// Edits a provisional copy of the shared settings. Only "Save" publishes it.
#[derive(Debug)]
pub struct SettingsMenuState {
    settings: SettingsHandle,
    temp_settings: GameSettings,
    menu: Menu<SettingsAction>,
}

impl SettingsMenuState {
    #[must_use]
    pub fn new(settings: SettingsHandle) -> Self {
        let temp_settings = settings.get();
        let mut state = Self {
            settings,
            temp_settings,
            menu: Menu::new(),
        };
        state.build_menu();
        state
    }

    /// Starts over from the currently committed settings.
    pub fn enter(&mut self) {
        self.temp_settings = self.settings.get();
        self.build_menu();
    }

    pub fn process_input(&mut self, input: Input) -> Transition<Screen> {
        if matches!(input, Input::Back | Input::Quit) {
            return self.cancel();
        }

        match self.menu.handle_input(input) {
            MenuOutcome::ValueChanged(action, value) => {
                self.apply_value(action, value);
                Transition::None
            }
            MenuOutcome::Toggled(action, on) => {
                self.apply_toggle(action, on);
                Transition::None
            }
            MenuOutcome::Activated(SettingsAction::Save) => self.save(),
            MenuOutcome::Activated(SettingsAction::Cancel) => self.cancel(),
            _ => Transition::None,
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) -> Result<()> {
        renderer.render_menu(&self.menu.view(TITLE))
    }

    #[must_use]
    pub fn temp_settings(&self) -> &GameSettings {
        &self.temp_settings
    }

    #[must_use]
    pub fn menu(&self) -> &Menu<SettingsAction> {
        &self.menu
    }

    fn apply_value(&mut self, action: SettingsAction, value: i32) {
        match action {
            SettingsAction::GameSpeed => self.temp_settings.set_game_speed(value),
            SettingsAction::BoardWidth => self.temp_settings.set_board_width(value),
            SettingsAction::BoardHeight => self.temp_settings.set_board_height(value),
            _ => {}
        }
    }

    fn apply_toggle(&mut self, action: SettingsAction, on: bool) {
        match action {
            SettingsAction::Walls => self.temp_settings.set_walls_enabled(on),
            SettingsAction::Sound => self.temp_settings.set_sound_enabled(on),
            _ => {}
        }
    }

    fn save(&self) -> Transition<Screen> {
        info!(settings = ?self.temp_settings, "settings saved");
        self.settings.commit(self.temp_settings);
        Transition::Pop
    }

    fn cancel(&self) -> Transition<Screen> {
        Transition::Pop
    }

    fn build_menu(&mut self) {
        let current = self.temp_settings;
        let (speed_min, speed_max) = GAME_SPEED_RANGE;
        let (size_min, size_max) = BOARD_SIZE_RANGE;

        self.menu.clear();
        self.menu.add_item(MenuItem::slider(
            "Game Speed",
            speed_min,
            speed_max,
            current.game_speed(),
            SettingsAction::GameSpeed,
        ));
        self.menu.add_item(MenuItem::slider(
            "Board Width",
            size_min,
            size_max,
            current.board_width(),
            SettingsAction::BoardWidth,
        ));
        self.menu.add_item(MenuItem::slider(
            "Board Height",
            size_min,
            size_max,
            current.board_height(),
            SettingsAction::BoardHeight,
        ));
        self.menu.add_item(MenuItem::toggle(
            "Walls Enabled",
            current.walls_enabled(),
            SettingsAction::Walls,
        ));
        self.menu.add_item(MenuItem::toggle(
            "Sound Enabled",
            current.sound_enabled(),
            SettingsAction::Sound,
        ));
        self.menu.add_item(MenuItem::text("Save Settings", SettingsAction::Save));
        self.menu.add_item(MenuItem::text("Cancel", SettingsAction::Cancel));
        self.menu.set_instructions(
            "Use ↑/↓ to select, ←/→ to adjust sliders, ↵ to toggle or confirm, Esc to cancel",
        );
    }
}
