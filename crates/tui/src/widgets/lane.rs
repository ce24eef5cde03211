//! List column rendering widget.
//!
//! A column shows the list name and card count in its top border, the cards
//! that fit, and an "add a card" row under the last visible card. Cards
//! scrolled out of view are counted in the bottom border.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use uniwork_protocol::{List, Store};

use super::card::{CardStyle, render_card, truncate_string};
use crate::layout::ListColumn;

/// How a column relates to the focus and to a drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnState<'a> {
    /// The keyboard cursor is in this column.
    pub focused: bool,
    /// The highlighted card, when focused.
    pub card_cursor: Option<usize>,
    /// The card being dragged, if any.
    pub held_card: Option<&'a str>,
    /// A held card would land here if dropped now.
    pub drop_target: bool,
}

/// Renders one list column laid out by [`PanelLayout`](crate::layout::PanelLayout).
pub fn render_list_column(
    column: &ListColumn,
    list: &List,
    store: &Store,
    state: ColumnState<'_>,
    buf: &mut Buffer,
) {
    let border_color = if state.drop_target {
        Color::Yellow
    } else if state.focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let title_style = if state.focused || state.drop_target {
        Style::default()
            .fg(border_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let cards = store.cards(&list.id);
    let title_width = usize::from(column.area.width.saturating_sub(4));
    let title = truncate_string(&format!("{} ({})", list.name, cards.len()), title_width);

    let mut block = Block::default()
        .title(Span::styled(format!(" {title} "), title_style))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    if let Some(more) = scroll_hint(column.hidden_above, column.hidden_below) {
        block = block.title_bottom(Span::styled(more, Style::default().fg(Color::DarkGray)));
    }
    let inner = block.inner(column.area);
    block.render(column.area, buf);

    if !store.has_cards(&list.id) {
        render_placeholder("Loading...", inner, buf);
        return;
    }

    for slot in &column.cards {
        let Some(card) = cards.get(slot.index) else {
            continue;
        };
        let style = if state.held_card == Some(card.id.as_str()) {
            CardStyle::Held
        } else if state.focused && state.card_cursor == Some(slot.index) {
            CardStyle::Selected
        } else {
            CardStyle::Normal
        };
        render_card(card, style, slot.area, buf);
    }

    if let Some(add_card) = column.add_card {
        let style = if state.drop_target {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Green)
        };
        let label = if state.drop_target {
            " Drop here"
        } else {
            " + Add a card"
        };
        Paragraph::new(Line::from(Span::styled(label, style))).render(add_card, buf);
    }
}

fn scroll_hint(above: usize, below: usize) -> Option<String> {
    match (above, below) {
        (0, 0) => None,
        (above, 0) => Some(format!(" ↑{above} ")),
        (0, below) => Some(format!(" ↓{below} ")),
        (above, below) => Some(format!(" ↑{above} ↓{below} ")),
    }
}

fn render_placeholder(text: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .render(area, buf);
}
