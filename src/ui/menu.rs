use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::config::{GLYPH_MENU_MARKER, PALETTE};
use crate::renderer::MenuView;

/// Draws a menu screen as a centered popup: title, items, instructions.
pub fn render_menu(frame: &mut Frame<'_>, view: &MenuView) {
    let popup = centered_popup(frame.area(), 70, 70);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from(view.title.as_str()))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(PALETTE.menu_title)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let lines: Vec<Line<'_>> = view
        .items
        .iter()
        .enumerate()
        .map(|(index, label)| menu_line(label, index == view.selected))
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered()),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from(view.instructions.as_str()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(PALETTE.menu_footer)),
        footer_row,
    );
}

fn menu_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::styled(
            format!("{GLYPH_MENU_MARKER} {label}"),
            Style::default()
                .fg(PALETTE.menu_selected)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Line::from(format!("  {label}"))
    }
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 40);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[P] Resume"),
        Line::from("[Esc] Main menu"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
