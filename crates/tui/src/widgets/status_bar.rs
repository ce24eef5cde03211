//! Status bar rendering widget.
//!
//! One row: the current notice (or a loading indicator) on the left and
//! contextual keybinding hints on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use uniwork_session::Notice;

/// What the status bar should say.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusLine<'a> {
    /// The transient notice, if any.
    pub notice: Option<&'a Notice>,
    /// Number of unanswered remote calls.
    pub in_flight: usize,
    /// A card is being dragged.
    pub dragging: bool,
}

/// Renders the status bar.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use uniwork_tui::widgets::{StatusLine, render_status_bar};
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(StatusLine::default(), area, &mut buf);
/// ```
pub fn render_status_bar(status: StatusLine<'_>, area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);

    let hints: &[(&str, &str)] = if status.dragging {
        &[("Enter", " Drop  "), ("←→", " Target  "), ("Esc", " Cancel")]
    } else {
        &[("Ctrl+C", " Quit  "), ("?", " Help")]
    };
    let hint_width: usize = hints.iter().map(|(k, t)| k.chars().count() + t.len()).sum();
    let hint_spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, text)| {
            [
                Span::styled(*key, key_style),
                Span::styled(*text, text_style),
            ]
        })
        .collect();

    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(u16::try_from(hint_width + 1).unwrap_or(u16::MAX)),
    ])
    .areas(area);

    let message = match status.notice {
        Some(notice) if notice.is_error() => Some(Span::styled(
            notice.message().to_string(),
            Style::default().fg(Color::LightRed),
        )),
        Some(notice) => Some(Span::styled(
            notice.message().to_string(),
            Style::default().fg(Color::Cyan),
        )),
        None if status.in_flight > 0 => Some(Span::styled(
            format!("Loading ({} pending)", status.in_flight),
            Style::default().fg(Color::DarkGray),
        )),
        None => None,
    };
    if let Some(message) = message {
        Paragraph::new(Line::from(message)).render(left, buf);
    }

    Paragraph::new(Line::from(hint_spans))
        .alignment(Alignment::Right)
        .render(right, buf);
}
