//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages.

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use uniwork_protocol::Message;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message.
///
/// Returns `Some(Message)` if the event maps to an action,
/// or `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => key_to_message(*key),
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to a pointer message.
///
/// Only the left button drives the drag gesture: press, drag, release.
#[must_use]
pub fn mouse_to_message(mouse: &MouseEvent) -> Option<Message> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::PointerDown { column, row }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::PointerMove { column, row }),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::PointerUp { column, row }),
        _ => None,
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Converts a terminal key event to an application message.
///
/// Returns `Some(Message)` if the key event maps to an action,
/// or `None` if the key is not bound.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Escape (cancel drag or close overlay) |
/// | Arrows | Navigate |
/// | `Tab` | Switch between boards and lists |
/// | `Enter` | Select board / drop held card |
/// | `Space` | Grab or drop a card |
/// | `n` | New card in the focused list |
/// | `r` | Refresh |
/// | `?` | Toggle help |
/// | `Shift+S` | Open settings |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(key) {
        return Some(Message::Quit);
    }

    if key.modifiers.contains(KeyModifiers::SHIFT) && key.code == KeyCode::Char('S') {
        return Some(Message::OpenSettings);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Tab => Some(Message::ToggleFocus),

        KeyCode::Enter => Some(Message::Select),
        KeyCode::Char(' ') => Some(Message::Grab),
        KeyCode::Char('n') => Some(Message::NewCard),

        KeyCode::Char('r') => Some(Message::Refresh),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event to a text entry message.
///
/// Used while a text field (a settings value or a new card name) has
/// focus: every printable key is captured.
#[must_use]
pub fn key_to_text_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(Message::TextConfirm),
        KeyCode::Esc => Some(Message::TextCancel),
        KeyCode::Backspace => Some(Message::TextBackspace),
        KeyCode::Char(ch) => Some(Message::TextInput { ch }),
        _ => None,
    }
}

/// Converts a key event to a settings-specific message.
///
/// # Key Bindings (Settings Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | `Up` / `Down` | Select field |
/// | `Enter` | Edit field |
/// | `s` | Save and reconnect |
/// | `Esc` | Close without saving |
///
/// While a field is being edited, keys go to [`key_to_text_message`].
#[must_use]
pub fn key_to_settings_message(key: KeyEvent, is_editing: bool) -> Option<Message> {
    if is_editing {
        return key_to_text_message(key);
    }
    if is_ctrl_c(key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::CloseSettings),
        KeyCode::Up => Some(Message::SettingsNavigate { delta: -1 }),
        KeyCode::Down => Some(Message::SettingsNavigate { delta: 1 }),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::SettingsEdit),
        KeyCode::Char('s') => Some(Message::SettingsSave),
        _ => None,
    }
}
