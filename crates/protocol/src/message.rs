//! UI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the input binding and the application.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the panel.
///
/// These messages are produced by the input handler and consumed by the
/// application, which turns them into session intents.
///
/// # Examples
///
/// ```
/// use uniwork_protocol::Message;
///
/// let msg = Message::NavigateRight;
/// assert!(msg.is_navigation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move focus to the list on the left.
    NavigateLeft,
    /// Move focus to the list on the right.
    NavigateRight,
    /// Move selection up within the focused column.
    NavigateUp,
    /// Move selection down within the focused column.
    NavigateDown,
    /// Switch focus between the boards column and the lists.
    ToggleFocus,
    /// Activate the highlighted item (select a board, drop a held card).
    Select,
    /// Pick up the highlighted card, or drop the held one.
    Grab,
    /// Escape: cancel a drag or close an overlay (contextual).
    Escape,
    /// Start a new card in the focused list.
    NewCard,
    /// Quit the application.
    Quit,
    /// Refetch boards.
    Refresh,
    /// Toggle help overlay.
    ToggleHelp,

    // --- Pointer messages ---
    /// Primary button pressed at (column, row).
    PointerDown {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
    /// Pointer moved with the primary button held.
    PointerMove {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
    /// Primary button released at (column, row).
    PointerUp {
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },

    // --- Settings messages ---
    /// Open the settings panel.
    OpenSettings,
    /// Close the settings panel without saving.
    CloseSettings,
    /// Navigate between settings fields.
    SettingsNavigate {
        /// Direction to navigate (positive = down, negative = up).
        delta: i32,
    },
    /// Start editing the selected field.
    SettingsEdit,
    /// Persist the credentials and reconnect.
    SettingsSave,

    // --- Text entry (settings fields, new card name) ---
    /// Input a character while editing.
    TextInput {
        /// The character that was input.
        ch: char,
    },
    /// Delete the character before the cursor.
    TextBackspace,
    /// Confirm the current text.
    TextConfirm,
    /// Abandon the current text.
    TextCancel,
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft
                | Self::NavigateRight
                | Self::NavigateUp
                | Self::NavigateDown
                | Self::ToggleFocus
                | Self::SettingsNavigate { .. }
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message is a pointer event.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_protocol::Message;
    ///
    /// assert!(Message::PointerUp { column: 1, row: 2 }.is_pointer());
    /// assert!(!Message::Grab.is_pointer());
    /// ```
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. } | Self::PointerMove { .. } | Self::PointerUp { .. }
        )
    }

    /// Returns `true` if this message is a settings-related action.
    #[must_use]
    pub fn is_settings(&self) -> bool {
        matches!(
            self,
            Self::OpenSettings
                | Self::CloseSettings
                | Self::SettingsNavigate { .. }
                | Self::SettingsEdit
                | Self::SettingsSave
        )
    }

    /// Returns `true` if this message edits text.
    #[must_use]
    pub fn is_text_entry(&self) -> bool {
        matches!(
            self,
            Self::TextInput { .. } | Self::TextBackspace | Self::TextConfirm | Self::TextCancel
        )
    }
}
