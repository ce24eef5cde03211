//! Card rendering widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use uniwork_protocol::Card;

/// How a card is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStyle {
    /// Plain card.
    #[default]
    Normal,
    /// Under the keyboard cursor.
    Selected,
    /// Picked up; drawn dimmed in its source list.
    Held,
    /// The floating copy following the pointer.
    Floating,
}

impl CardStyle {
    const fn border_color(self) -> Color {
        match self {
            Self::Normal => Color::DarkGray,
            Self::Selected => Color::Cyan,
            Self::Held => Color::Black,
            Self::Floating => Color::Yellow,
        }
    }

    fn name_style(self) -> Style {
        match self {
            Self::Normal => Style::default().fg(Color::White),
            Self::Selected => Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            Self::Held => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            Self::Floating => Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Renders one card: a bordered box with the card name on a single line.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use uniwork_protocol::Card;
/// use uniwork_tui::widgets::{CardStyle, render_card};
///
/// let card = Card::new("c1", "l1", "Fix bug");
/// let area = Rect::new(0, 0, 20, 3);
/// let mut buf = Buffer::empty(area);
///
/// render_card(&card, CardStyle::Selected, area, &mut buf);
/// ```
pub fn render_card(card: &Card, style: CardStyle, area: Rect, buf: &mut Buffer) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let inner_width = usize::from(area.width.saturating_sub(2));
    let name = truncate_string(&card.name, inner_width);

    Paragraph::new(Line::from(Span::styled(name, style.name_style())))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(style.border_color())),
        )
        .render(area, buf);
}

/// Truncates a string to fit within a given width, adding ellipsis if needed.
pub(crate) fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
