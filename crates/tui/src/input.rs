//! Single-line text entry.

/// A text value with a byte-offset cursor that always sits on a char
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input holding `value`, with the cursor at the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use uniwork_tui::input::TextInput;
    ///
    /// let mut input = TextInput::with_value("abc");
    /// input.backspace();
    /// assert_eq!(input.value(), "ab");
    /// ```
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// Returns the current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the cursor position in bytes.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the cursor position in characters, for rendering.
    #[must_use]
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev_boundary = self.value[..self.cursor]
            .char_indices()
            .last()
            .map_or(0, |(i, _)| i);
        self.value.remove(prev_boundary);
        self.cursor = prev_boundary;
    }

    /// Consumes the input and returns its text.
    #[must_use]
    pub fn into_value(self) -> String {
        self.value
    }
}
