//! The single logical input line with caret and history.
//!
//! The caret is a grapheme index into the value, so arrow keys and
//! Backspace never split a user-perceived character. Completion code works
//! in bytes; [`InputLine::caret_byte`] and [`InputLine::replace`] bridge the
//! two.

use unicode_segmentation::UnicodeSegmentation;

/// Position within the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryCursor {
    /// Past the newest entry (nothing recalled).
    #[default]
    AtEnd,
    /// Index of the recalled entry.
    Entry(usize),
}

/// Editable input line plus submitted-line history.
#[derive(Debug, Clone, Default)]
pub struct InputLine {
    value: String,
    /// Caret position (grapheme index).
    caret: usize,
    history: Vec<String>,
    history_cursor: HistoryCursor,
}

impl InputLine {
    /// Create an empty input line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value with the caret at the end (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.caret = self.grapheme_count();
        self
    }

    /// Current text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Caret as a grapheme index.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Caret as a byte offset into [`Self::value`].
    pub fn caret_byte(&self) -> usize {
        self.grapheme_byte_offset(self.caret)
    }

    /// Text before the caret.
    pub fn before_caret(&self) -> &str {
        &self.value[..self.caret_byte()]
    }

    /// Submitted lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Current history position.
    pub fn history_cursor(&self) -> HistoryCursor {
        self.history_cursor
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Insert a printable character at the caret. Control characters are ignored.
    pub fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let before = self.grapheme_count();
        let at = self.caret_byte();
        self.value.insert(at, c);
        // A combining mark merges into the previous grapheme.
        if self.grapheme_count() > before {
            self.caret += 1;
        }
    }

    /// Insert pasted text at the caret.
    ///
    /// Line breaks become single spaces so the input stays one logical line;
    /// other control characters are dropped.
    pub fn insert_text(&mut self, text: &str) {
        let clean = sanitize(text);
        if clean.is_empty() {
            return;
        }
        let at = self.caret_byte();
        let head = self.value[..at].graphemes(true).count();
        self.value.insert_str(at, &clean);
        let consumed = &self.value[..at + clean.len()];
        self.caret = consumed.graphemes(true).count().max(head);
    }

    /// Delete the grapheme before the caret.
    pub fn backspace(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        let start = self.grapheme_byte_offset(self.caret - 1);
        let end = self.caret_byte();
        self.value.drain(start..end);
        self.caret -= 1;
        true
    }

    /// Delete the grapheme after the caret.
    pub fn delete_forward(&mut self) -> bool {
        if self.caret >= self.grapheme_count() {
            return false;
        }
        let start = self.caret_byte();
        let end = self.grapheme_byte_offset(self.caret + 1);
        self.value.drain(start..end);
        true
    }

    /// Move the caret one grapheme left.
    pub fn move_left(&mut self) -> bool {
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        true
    }

    /// Move the caret one grapheme right.
    pub fn move_right(&mut self) -> bool {
        if self.caret >= self.grapheme_count() {
            return false;
        }
        self.caret += 1;
        true
    }

    /// Recall the previous history entry. From [`HistoryCursor::AtEnd`] this
    /// recalls the newest entry.
    pub fn history_prev(&mut self) -> bool {
        let target = match self.history_cursor {
            HistoryCursor::AtEnd if !self.history.is_empty() => self.history.len() - 1,
            HistoryCursor::Entry(i) if i > 0 => i - 1,
            _ => return false,
        };
        self.recall(target);
        true
    }

    /// Recall the next history entry. Stops at the newest entry rather than
    /// returning to an empty line; does nothing from [`HistoryCursor::AtEnd`].
    pub fn history_next(&mut self) -> bool {
        match self.history_cursor {
            HistoryCursor::Entry(i) if i + 1 < self.history.len() => {
                self.recall(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Submit the current line: record it in history (always, even if
    /// empty), clear the line, and reset the caret and history cursor.
    pub fn commit(&mut self) -> String {
        let line = std::mem::take(&mut self.value);
        self.history.push(line.clone());
        self.history_cursor = HistoryCursor::AtEnd;
        self.caret = 0;
        line
    }

    /// Replace the whole value and place the caret at a byte offset.
    ///
    /// The offset snaps back to the nearest grapheme boundary.
    pub fn replace(&mut self, value: impl Into<String>, caret_byte: usize) {
        self.value = value.into();
        let mut at = caret_byte.min(self.value.len());
        while !self.value.is_char_boundary(at) {
            at -= 1;
        }
        self.caret = self.value[..at].graphemes(true).count();
        if self.grapheme_byte_offset(self.caret) > at {
            self.caret = self.caret.saturating_sub(1);
        }
    }

    /// Clear the line without touching history.
    pub fn clear(&mut self) {
        self.value.clear();
        self.caret = 0;
    }

    fn recall(&mut self, index: usize) {
        self.history_cursor = HistoryCursor::Entry(index);
        self.value.clone_from(&self.history[index]);
        self.caret = self.grapheme_count();
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

fn sanitize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    unified
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}
