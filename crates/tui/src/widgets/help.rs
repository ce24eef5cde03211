//! Help overlay widget.
//!
//! This module provides the help overlay that displays all available keybindings
//! when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 40;

/// The height of the help overlay panel.
const HELP_HEIGHT: u16 = 24;

/// Renders a centered help overlay displaying all keybindings.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use uniwork_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(HELP_WIDTH, HELP_HEIGHT, area);

    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(build_help_lines())
        .block(help_block)
        .alignment(Alignment::Left)
        .render(popup_area, buf);
}

const NAVIGATION: &[(&str, &str)] = &[
    ("←  →", "Previous / next list"),
    ("↑  ↓", "Previous / next item"),
    ("Tab", "Boards / lists"),
];

const ACTIONS: &[(&str, &str)] = &[
    ("Enter", "Open board / drop card"),
    ("Space", "Pick up / drop card"),
    ("n", "New card in list"),
    ("r", "Refresh boards"),
    ("Esc", "Cancel drag"),
    ("Shift+S", "Credentials"),
    ("Ctrl+C", "Quit"),
    ("?", "Toggle help"),
];

const MOUSE: &[(&str, &str)] = &[
    ("Click", "Open board"),
    ("Drag", "Move card to a list"),
];

/// Builds the lines of help content.
fn build_help_lines() -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::White);
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let section = |title: &'static str, bindings: &[(&'static str, &'static str)]| {
        let mut lines = vec![Line::from(Span::styled(format!("  {title}"), header_style))];
        lines.extend(bindings.iter().map(|(key, text)| {
            Line::from(vec![
                Span::styled(format!("  {key:<11}"), key_style),
                Span::styled(*text, text_style),
            ])
        }));
        lines.push(Line::from(""));
        lines
    };

    let mut lines = vec![Line::from("")];
    lines.extend(section("Navigation", NAVIGATION));
    lines.extend(section("Actions", ACTIONS));
    lines.extend(section("Mouse", MOUSE));
    lines.push(Line::from(Span::styled("  Press any key to close", hint_style)));
    lines
}
