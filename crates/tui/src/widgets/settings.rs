//! Settings panel widget.
//!
//! This module provides the settings panel overlay where the Trello API key
//! and token are entered.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::{card::truncate_string, centered_rect};
use crate::settings_state::{SettingsField, SettingsState};

/// The width of the settings panel.
const SETTINGS_WIDTH: u16 = 64;

/// The height of the settings panel.
const SETTINGS_HEIGHT: u16 = 12;

/// Width of the field label column.
const LABEL_WIDTH: usize = 10;

/// Renders the settings panel overlay.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use uniwork_config::StoredCredentials;
/// use uniwork_tui::settings_state::SettingsState;
/// use uniwork_tui::widgets::render_settings_panel;
///
/// let state = SettingsState::new(StoredCredentials::default());
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_settings_panel(&state, area, &mut buf);
/// ```
pub fn render_settings_panel(state: &SettingsState, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(SETTINGS_WIDTH, SETTINGS_HEIGHT, area);

    Clear.render(popup_area, buf);

    let title = if state.is_dirty() {
        " Settings (unsaved) "
    } else {
        " Settings "
    };
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(popup_area);
    block.render(popup_area, buf);

    let [heading, _, fields, note, _, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    Paragraph::new(Line::from(Span::styled(
        "Trello",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    )))
    .alignment(Alignment::Center)
    .render(heading, buf);

    render_fields(state, fields, buf);

    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  UNIWORK_API_KEY / UNIWORK_TOKEN override these when set.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .render(note, buf);

    render_settings_help(state, help, buf);
}

fn render_fields(state: &SettingsState, area: Rect, buf: &mut Buffer) {
    let value_width = usize::from(area.width).saturating_sub(LABEL_WIDTH + 6);
    let lines: Vec<Line> = SettingsField::all()
        .iter()
        .map(|&field| {
            let selected = field == state.selected_field();
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if selected { "> " } else { "  " };

            let mut spans = vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("{:<width$}", format!("{}:", field.label()), width = LABEL_WIDTH),
                    Style::default().fg(Color::Gray),
                ),
            ];
            match state.editing().filter(|_| selected) {
                Some(input) => {
                    let value = input.value();
                    let cursor = input.cursor();
                    spans.push(Span::styled(value[..cursor].to_string(), style));
                    spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
                    spans.push(Span::styled(value[cursor..].to_string(), style));
                }
                None => {
                    let shown = truncate_string(&state.display(field), value_width);
                    spans.push(Span::styled(shown, style));
                }
            }
            Line::from(spans)
        })
        .collect();

    Paragraph::new(lines).render(area, buf);
}

/// Renders the help line at the bottom of the settings panel.
fn render_settings_help(state: &SettingsState, area: Rect, buf: &mut Buffer) {
    let help_text = if state.is_editing() {
        "Enter: confirm | Esc: cancel"
    } else {
        "↑↓: navigate | Enter: edit | s: save | Esc: close"
    };

    Paragraph::new(Line::from(Span::styled(
        help_text,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center)
    .render(area, buf);
}
