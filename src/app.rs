use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::{FRAME_SLEEP, INPUT_POLL_TIMEOUT};
use crate::error::Result;
use crate::input::InputSource;
use crate::renderer::Renderer;
use crate::settings::SettingsHandle;
use crate::state::{Screen, StateManager};

/// Owns the renderer, the input source and the screen stack, and drives
/// them frame by frame.
pub struct App<R, I> {
    renderer: R,
    input: I,
    settings: SettingsHandle,
    manager: StateManager<Screen>,
}

impl<R: Renderer, I: InputSource> App<R, I> {
    pub fn new(renderer: R, input: I, settings: SettingsHandle) -> Self {
        Self {
            renderer,
            input,
            settings,
            manager: StateManager::new(),
        }
    }

    /// Shows the main menu and loops until the window closes or the last
    /// screen is gone. The renderer is shut down on every exit path.
    pub fn run(&mut self) -> Result<()> {
        self.renderer.initialize()?;
        self.manager.push_state(Screen::main_menu(self.settings.clone()));
        info!("app started");

        let result = self.run_loop();

        self.manager.clear();
        self.renderer.shutdown();
        info!(ok = result.is_ok(), "app stopped");
        result
    }

    /// One frame: at most one input, one update, one render.
    pub fn step(&mut self, delta: Duration) -> Result<()> {
        if let Some(input) = self.input.poll_input(INPUT_POLL_TIMEOUT)? {
            self.manager.process_input(input);
        }

        self.manager.update(delta);
        self.manager.render(&mut self.renderer)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.renderer.is_window_open() && self.manager.has_active_state()
    }

    #[must_use]
    pub fn manager(&self) -> &StateManager<Screen> {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut StateManager<Screen> {
        &mut self.manager
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsHandle {
        &self.settings
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn run_loop(&mut self) -> Result<()> {
        let mut last_frame = Instant::now();

        while self.is_running() {
            let now = Instant::now();
            let delta = now.duration_since(last_frame);
            last_frame = now;

            self.step(delta)?;
            thread::sleep(FRAME_SLEEP);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use super::App;
    use crate::error::{Error, Result};
    use crate::input::{Input, InputSource};
    use crate::renderer::{GameSnapshot, MenuView, Renderer};
    use crate::settings::SettingsHandle;
    use crate::state::{GameState, Screen};

    #[derive(Default)]
    struct Scripted(VecDeque<Input>);

    impl InputSource for Scripted {
        fn poll_input(&mut self, _timeout: Duration) -> io::Result<Option<Input>> {
            Ok(self.0.pop_front())
        }
    }

    #[derive(Default)]
    struct StubRenderer {
        open: bool,
        fail_init: bool,
        shutdowns: usize,
        titles: Vec<String>,
        game_frames: usize,
    }

    impl Renderer for StubRenderer {
        fn initialize(&mut self) -> Result<()> {
            if self.fail_init {
                return Err(Error::RendererNotInitialized);
            }
            self.open = true;
            Ok(())
        }

        fn shutdown(&mut self) {
            self.open = false;
            self.shutdowns += 1;
        }

        fn is_window_open(&self) -> bool {
            self.open
        }

        fn render(&mut self, _game: &GameSnapshot<'_>) -> Result<()> {
            self.game_frames += 1;
            Ok(())
        }

        fn render_menu(&mut self, menu: &MenuView) -> Result<()> {
            self.titles.push(menu.title.clone());
            Ok(())
        }
    }

    fn app(inputs: &[Input]) -> App<StubRenderer, Scripted> {
        App::new(
            StubRenderer::default(),
            Scripted(inputs.iter().copied().collect()),
            SettingsHandle::default().with_seed(Some(3)),
        )
    }

    #[test]
    fn run_ends_when_the_main_menu_exits() {
        let mut app = app(&[Input::Select, Input::Quit, Input::Up, Input::Select]);

        app.run().expect("scripted run succeeds");

        let renderer = app.renderer();
        assert!(!app.manager().has_active_state());
        assert_eq!(renderer.shutdowns, 1);
        assert!(renderer.game_frames >= 1);
        assert_eq!(renderer.titles.first().map(String::as_str), Some("Greedy Snake"));
    }

    #[test]
    fn failed_initialize_never_enters_the_loop() {
        let mut app = app(&[]);
        app.renderer.fail_init = true;

        assert!(matches!(app.run(), Err(Error::RendererNotInitialized)));
        assert!(!app.manager().has_active_state());
    }

    #[test]
    fn step_routes_input_to_the_top_screen() {
        let mut app = app(&[Input::Down, Input::Select]);
        let settings = app.settings().clone();
        app.manager_mut().push_state(Screen::main_menu(settings));

        app.step(Duration::ZERO).expect("step succeeds");
        app.step(Duration::ZERO).expect("step succeeds");

        assert_eq!(app.manager().len(), 2);
        assert_eq!(app.manager().top().map(GameState::name), Some("settings"));
        assert_eq!(app.renderer().titles.last().map(String::as_str), Some("Settings"));
    }
}
