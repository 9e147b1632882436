use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::PALETTE;
use crate::game::GameStatus;
use crate::renderer::GameSnapshot;

const SEPARATOR: &str = " │ ";

/// Renders the two-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, game: &GameSnapshot<'_>) -> Rect {
    let [play_area, info_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(info_line(game))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        info_area,
    );

    frame.render_widget(
        Paragraph::new(Line::from(status_text(game.status)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(PALETTE.menu_footer)),
        status_area,
    );

    play_area
}

fn info_line(game: &GameSnapshot<'_>) -> Line<'static> {
    let value = Style::default().fg(PALETTE.hud);
    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(game.score.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Length: "),
        Span::styled(game.snake.len().to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Speed: "),
        Span::styled(game.speed.to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Board: "),
        Span::styled(
            format!("{}x{}", game.board.width(), game.board.height()),
            value,
        ),
    ])
}

fn status_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Paused => "[P] resume  [Esc] leave",
        GameStatus::GameOver => "",
        GameStatus::Ready | GameStatus::Running => "[Arrows/WASD] steer  [P] pause  [Esc] pause/leave",
    }
}
