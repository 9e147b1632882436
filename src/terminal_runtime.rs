use std::io::{self, Stdout};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use tracing::{debug, warn};

/// The game screen while the renderer is open. Dropping it hands the
/// terminal back in cooked mode on the main screen.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let terminal = alternate_screen()
            .and_then(|stdout| Terminal::new(CrosstermBackend::new(stdout)))
            .inspect_err(|error| {
                warn!(%error, "terminal setup failed");
                restore_terminal();
            })?;

        debug!("terminal session entered");
        Ok(Self { terminal })
    }

    /// Draws one full frame.
    pub fn draw(&mut self, paint: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(paint)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal();
        debug!("terminal session restored");
    }
}

fn alternate_screen() -> io::Result<Stdout> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    Ok(stdout)
}

/// Puts the terminal back: cooked mode, cursor shown, main screen.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    if let Err(error) = execute!(stdout, Show, LeaveAlternateScreen) {
        warn!(%error, "failed to leave alternate screen");
    }
}

/// Chains a hook in front of the current panic hook so the report lands on
/// a usable terminal.
pub fn install_panic_hook() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        previous(info);
    }));
}
