//! Per-frame rendering boundary.

use crate::scrollbar::ScrollbarGeometry;
use crate::selection::SelectionRange;

/// Everything a painter needs to draw the terminal panel for one frame.
///
/// Rows are counted from the top of the panel's text area: output rows come
/// first, then the input rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalFrame {
    /// Wrapped output lines in the window.
    pub visible_output_lines: Vec<String>,
    /// Wrapped prompt-plus-input lines.
    pub visible_input_lines: Vec<String>,
    /// Absolute index of the first visible output line.
    pub first_visible_index: usize,
    /// Row holding the caret.
    pub caret_row: usize,
    /// Caret column in graphemes within its row.
    pub caret_column: usize,
    /// Caret x position in pixels.
    pub caret_x: f32,
    /// Whether the caret is in the "on" blink phase.
    pub caret_visible: bool,
    /// Current selection in absolute output indices.
    pub selection: Option<SelectionRange>,
    /// Scrollbar, when output overflows.
    pub scrollbar: Option<ScrollbarGeometry>,
    /// Y coordinate of the first row's baseline.
    pub content_top: f32,
    /// Row height in pixels.
    pub line_height: f32,
}

impl TerminalFrame {
    /// Whether visible output row `row` is highlighted by the selection.
    #[must_use]
    pub fn is_row_selected(&self, row: usize) -> bool {
        row < self.visible_output_lines.len()
            && self
                .selection
                .is_some_and(|s| s.contains(self.first_visible_index + row))
    }

    /// Baseline y of panel row `row`.
    #[must_use]
    pub fn row_y(&self, row: usize) -> f32 {
        self.content_top + row as f32 * self.line_height
    }
}
