//! Boards column rendering widget.

use ratatui::{
    buffer::Buffer,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use uniwork_protocol::{Selection, Store};

use super::card::truncate_string;
use crate::layout::PanelLayout;

/// Renders the open boards, one per row.
///
/// The selected board is marked with `▸`; the keyboard cursor is shown in
/// reverse video while the column has focus.
pub fn render_boards_column(
    layout: &PanelLayout,
    store: &Store,
    selection: &Selection,
    cursor: Option<usize>,
    loading: bool,
    buf: &mut Buffer,
) {
    let focused = cursor.is_some();
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let count = store.open_boards().count();

    let block = Block::default()
        .title(Span::styled(
            format!(" Boards ({count}) "),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(layout.boards);
    block.render(layout.boards, buf);

    if layout.board_rows.is_empty() {
        let text = if loading { "Loading..." } else { "No boards" };
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .render(inner, buf);
        return;
    }

    let width = usize::from(inner.width.saturating_sub(2));
    for row in &layout.board_rows {
        let Some(board) = store.board(&row.board_id) else {
            continue;
        };
        let selected = selection.is_selected(&board.id);
        let marker = if selected { "▸ " } else { "  " };

        let mut style = if selected {
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if cursor == Some(row.index) {
            style = style.add_modifier(Modifier::REVERSED);
        }

        Paragraph::new(Line::from(vec![
            Span::styled(marker, style),
            Span::styled(truncate_string(&board.name, width), style),
        ]))
        .render(row.area, buf);
    }
}
