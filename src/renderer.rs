use std::io::{self, Write};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::board::{Board, CellKind};
use crate::config::{
    CELL_COLUMNS, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, GLYPH_WALL, PALETTE,
};
use crate::error::{Error, Result};
use crate::food::Food;
use crate::game::{GameOverCause, GameStatus};
use crate::snake::{Position, Snake};
use crate::terminal_runtime::TerminalSession;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_menu, render_pause_menu};

/// Read-only view of one game, handed to renderers every frame.
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot<'a> {
    pub board: &'a Board,
    pub snake: &'a Snake,
    pub food: &'a Food,
    pub score: u32,
    pub speed: i32,
    pub status: GameStatus,
    pub cause: Option<GameOverCause>,
}

/// Everything a renderer needs to draw one menu screen.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MenuView {
    pub title: String,
    pub items: Vec<String>,
    pub selected: usize,
    pub instructions: String,
}

/// Output backend driven by the screen states.
pub trait Renderer {
    /// Acquires the output surface.
    fn initialize(&mut self) -> Result<()>;

    /// Releases the output surface. Safe to call more than once.
    fn shutdown(&mut self);

    /// True while the surface is usable.
    fn is_window_open(&self) -> bool;

    fn render(&mut self, game: &GameSnapshot<'_>) -> Result<()>;

    fn render_menu(&mut self, menu: &MenuView) -> Result<()>;

    /// Audible cue for a scoring tick. Silent unless the backend can beep.
    fn bell(&mut self) {}
}

/// ratatui renderer over a crossterm terminal session.
#[derive(Default)]
pub struct TerminalRenderer {
    session: Option<TerminalSession>,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn session_mut(&mut self) -> Result<&mut TerminalSession> {
        self.session.as_mut().ok_or(Error::RendererNotInitialized)
    }
}

impl Renderer for TerminalRenderer {
    fn initialize(&mut self) -> Result<()> {
        if self.session.is_none() {
            self.session = Some(TerminalSession::enter()?);
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        // Dropping the session restores the terminal.
        self.session = None;
    }

    fn is_window_open(&self) -> bool {
        self.session.is_some()
    }

    fn render(&mut self, game: &GameSnapshot<'_>) -> Result<()> {
        self.session_mut()?.draw(|frame| render_game(frame, game))?;
        Ok(())
    }

    fn render_menu(&mut self, menu: &MenuView) -> Result<()> {
        self.session_mut()?.draw(|frame| render_menu(frame, menu))?;
        Ok(())
    }

    fn bell(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07").and_then(|()| stdout.flush());
    }
}

/// Renders the full game frame from a snapshot.
pub fn render_game(frame: &mut Frame<'_>, game: &GameSnapshot<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, game);
    let board_area = centered_board_area(play_area, game.board);

    render_board(frame, board_area, game.board);
    render_food(frame, board_area, game);
    render_snake(frame, board_area, game);

    if game.status == GameStatus::Paused {
        render_pause_menu(frame, play_area);
    }
}

fn render_board(frame: &mut Frame<'_>, inner: Rect, board: &Board) {
    let style = Style::new().fg(PALETTE.wall);
    let buffer = frame.buffer_mut();

    for position in board.positions() {
        if board.cell_kind(position) != CellKind::Wall {
            continue;
        }
        if let Some((x, y)) = logical_to_terminal(inner, board, position) {
            buffer.set_string(x, y, GLYPH_WALL, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, game: &GameSnapshot<'_>) {
    let Some((x, y)) = logical_to_terminal(inner, game.board, game.food.position()) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(PALETTE.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, game: &GameSnapshot<'_>) {
    let head = game.snake.head();
    let buffer = frame.buffer_mut();

    // Tail first so the head wins when segments overlap after a collision.
    for segment in game.snake.segments().rev() {
        let Some((x, y)) = logical_to_terminal(inner, game.board, *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(PALETTE.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_BODY,
                Style::new().fg(PALETTE.snake_body),
            );
        }
    }
}

/// Centers the board inside `area`, clipping boards larger than the terminal.
fn centered_board_area(area: Rect, board: &Board) -> Rect {
    let width = u16::try_from(board.width())
        .unwrap_or(u16::MAX)
        .saturating_mul(CELL_COLUMNS)
        .min(area.width);
    let height = u16::try_from(board.height())
        .unwrap_or(u16::MAX)
        .min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn logical_to_terminal(inner: Rect, board: &Board, position: Position) -> Option<(u16, u16)> {
    if !board.is_within_bounds(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
