//! Settings panel state management.
//!
//! The settings panel edits the two stored credentials. Values are only
//! persisted when the user saves; closing the panel discards edits.

use uniwork_config::StoredCredentials;

use crate::input::TextInput;

/// Editable fields in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    /// The Trello API key.
    #[default]
    ApiKey,
    /// The Trello member token.
    Token,
}

impl SettingsField {
    /// Returns all fields in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::ApiKey, Self::Token]
    }

    /// Returns the display label for this field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ApiKey => "API key",
            Self::Token => "Token",
        }
    }

    /// Returns whether the value is masked when not being edited.
    #[must_use]
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Token)
    }
}

/// State for the settings panel.
#[derive(Debug, Clone)]
pub struct SettingsState {
    credentials: StoredCredentials,
    dirty: bool,
    selected: usize,
    editing: Option<TextInput>,
}

impl SettingsState {
    /// Creates a settings state editing a copy of `credentials`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_config::StoredCredentials;
    /// use uniwork_tui::settings_state::SettingsState;
    ///
    /// let state = SettingsState::new(StoredCredentials::default());
    /// assert!(!state.is_dirty());
    /// ```
    #[must_use]
    pub fn new(credentials: StoredCredentials) -> Self {
        Self {
            credentials,
            dirty: false,
            selected: 0,
            editing: None,
        }
    }

    /// Returns the credentials as edited so far.
    #[must_use]
    pub fn credentials(&self) -> &StoredCredentials {
        &self.credentials
    }

    /// Returns whether anything was changed.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the selected field.
    #[must_use]
    pub fn selected_field(&self) -> SettingsField {
        SettingsField::all()[self.selected]
    }

    /// Returns the input being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&TextInput> {
        self.editing.as_ref()
    }

    /// Returns `true` if a field is being edited.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Moves the field selection, wrapping around.
    pub fn navigate(&mut self, delta: i32) {
        if self.is_editing() {
            return;
        }
        let count = SettingsField::all().len() as i64;
        let next = (self.selected as i64 + i64::from(delta)).rem_euclid(count);
        self.selected = usize::try_from(next).unwrap_or(0);
    }

    /// Starts editing the selected field with its current value.
    pub fn start_edit(&mut self) {
        let current = self.value(self.selected_field()).to_string();
        self.editing = Some(TextInput::with_value(current));
    }

    /// Handles character input while editing.
    pub fn input_char(&mut self, ch: char) {
        if let Some(input) = &mut self.editing {
            input.insert_char(ch);
        }
    }

    /// Handles backspace while editing.
    pub fn backspace(&mut self) {
        if let Some(input) = &mut self.editing {
            input.backspace();
        }
    }

    /// Stores the edited value (trimmed) in the selected field.
    pub fn confirm_edit(&mut self) {
        let Some(input) = self.editing.take() else {
            return;
        };
        let value = input.value().trim().to_string();
        let slot = match self.selected_field() {
            SettingsField::ApiKey => &mut self.credentials.api_key,
            SettingsField::Token => &mut self.credentials.token,
        };
        if *slot != value {
            *slot = value;
            self.dirty = true;
        }
    }

    /// Abandons the current edit.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Returns the stored value of `field`.
    #[must_use]
    pub fn value(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::ApiKey => &self.credentials.api_key,
            SettingsField::Token => &self.credentials.token,
        }
    }

    /// Returns the text to show for `field`.
    ///
    /// The field being edited shows the input; secret fields are masked
    /// otherwise; empty fields show a placeholder.
    #[must_use]
    pub fn display(&self, field: SettingsField) -> String {
        if let Some(input) = self.editing.as_ref().filter(|_| field == self.selected_field()) {
            return input.value().to_string();
        }
        let value = self.value(field);
        if value.is_empty() {
            "(not set)".to_string()
        } else if field.is_secret() {
            "•".repeat(value.chars().count().min(16))
        } else {
            value.to_string()
        }
    }

    /// Takes the credentials out of this state, consuming it.
    #[must_use]
    pub fn into_credentials(self) -> StoredCredentials {
        self.credentials
    }
}
