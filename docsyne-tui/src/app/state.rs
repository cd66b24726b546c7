/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Filters,
    Chips,
    Results,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Filters,
            Focus::Filters => Focus::Chips,
            Focus::Chips => Focus::Results,
            Focus::Results => Focus::Search,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Search => Focus::Results,
            Focus::Filters => Focus::Search,
            Focus::Chips => Focus::Filters,
            Focus::Results => Focus::Chips,
        }
    }
}

/// Single-line editable text. `cursor` is a byte offset that always sits on
/// a char boundary of `value`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input holding `value` with the cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(width) = self.width_before_cursor() {
            self.cursor -= width;
            self.value.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(width) = self.width_before_cursor() {
            self.cursor -= width;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(width) = self.width_after_cursor() {
            self.cursor += width;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// (before, after) the cursor, for drawing the caret.
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.cursor)
    }

    /// Byte width of the char left of the cursor, `None` at the start.
    fn width_before_cursor(&self) -> Option<usize> {
        debug_assert!(self.value.is_char_boundary(self.cursor), "cursor off a char boundary");
        self.value[..self.cursor].chars().next_back().map(char::len_utf8)
    }

    /// Byte width of the char right of the cursor, `None` at the end.
    fn width_after_cursor(&self) -> Option<usize> {
        debug_assert!(self.value.is_char_boundary(self.cursor), "cursor off a char boundary");
        self.value[self.cursor..].chars().next().map(char::len_utf8)
    }
}
