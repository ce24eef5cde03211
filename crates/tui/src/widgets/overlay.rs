//! Banner, floating drag card, and new-card prompt.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use uniwork_protocol::{Card, Pointer};

use super::card::{CardStyle, render_card, truncate_string};
use super::centered_rect;
use crate::layout::{CARD_HEIGHT, LIST_WIDTH};
use crate::state::CardPrompt;

/// Width of the new-card prompt.
const PROMPT_WIDTH: u16 = 48;

/// Height of the new-card prompt.
const PROMPT_HEIGHT: u16 = 5;

/// Renders the persistent missing-credentials banner.
pub fn render_credentials_banner(area: Rect, buf: &mut Buffer) {
    let style = Style::default().fg(Color::Black).bg(Color::Yellow);
    buf.set_style(area, style);
    Paragraph::new(Line::from(vec![
        Span::styled(" Trello API key or token missing. Press ", style),
        Span::styled("Shift+S", style.add_modifier(Modifier::BOLD)),
        Span::styled(" to enter them.", style),
    ]))
    .render(area, buf);
}

/// Returns where the floating card goes for a pointer position.
///
/// The card hangs just below and right of the pointer, pulled back inside
/// `area` when it would overflow.
#[must_use]
pub fn floating_card_area(pointer: Pointer, area: Rect) -> Rect {
    let width = LIST_WIDTH.saturating_sub(2).min(area.width);
    let height = CARD_HEIGHT.min(area.height);
    let x = pointer
        .column
        .saturating_add(1)
        .min(area.right().saturating_sub(width))
        .max(area.x);
    let y = pointer
        .row
        .saturating_add(1)
        .min(area.bottom().saturating_sub(height))
        .max(area.y);
    Rect::new(x, y, width, height)
}

/// Renders the dragged card at the pointer.
pub fn render_floating_card(card: &Card, pointer: Pointer, area: Rect, buf: &mut Buffer) {
    let card_area = floating_card_area(pointer, area);
    Clear.render(card_area, buf);
    render_card(card, CardStyle::Floating, card_area, buf);
}

/// Renders the new-card name prompt centered in `area`.
pub fn render_card_prompt(prompt: &CardPrompt, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(PROMPT_WIDTH, PROMPT_HEIGHT, area);
    Clear.render(popup_area, buf);

    let title_width = usize::from(PROMPT_WIDTH.saturating_sub(14));
    let block = Block::default()
        .title(Span::styled(
            format!(" New card in {} ", truncate_string(&prompt.list_name, title_width)),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(popup_area);
    block.render(popup_area, buf);

    let value = prompt.input.value();
    let cursor = prompt.input.cursor();
    let lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Green)),
            Span::styled(&value[..cursor], Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
            Span::styled(&value[cursor..], Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: create | Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    Paragraph::new(lines).render(inner, buf);
}
