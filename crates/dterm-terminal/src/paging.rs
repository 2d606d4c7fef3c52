//! Paging engine: wrapped output, wrapped input, and the valid offset range.
//!
//! [`paginate`] is a pure function of the scrollback, the input line, and the
//! viewport metrics. It is recomputed on every frame and every resize and is
//! never cached, since a width change or a new record invalidates all prior
//! wrapping.
//!
//! # Invariants
//!
//! 1. `reserved_input_rows >= 1`.
//! 2. `visible_output_rows = viewport_rows.saturating_sub(reserved_input_rows)`.
//! 3. `max_start_offset = wrapped_output.len().saturating_sub(visible_output_rows)`.

use std::ops::Range;

use dterm_text::{paragraphs, wrap, wrap_paragraph};

use crate::scrollback::Scrollback;

/// Prompt shown before the input line.
pub const INPUT_PROMPT: &str = "> ";

/// Result of paginating the terminal contents for one viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Every output record's paragraphs, wrapped, in scrollback order.
    pub wrapped_output: Vec<String>,
    /// The prompt plus input line, wrapped.
    pub wrapped_input: Vec<String>,
    /// Rows held back for the input line.
    pub reserved_input_rows: usize,
    /// Rows left for output.
    pub visible_output_rows: usize,
    /// Largest valid first-visible output index.
    pub max_start_offset: usize,
}

/// Paginate the scrollback and input line for a viewport.
pub fn paginate<F>(
    scrollback: &Scrollback,
    input: &str,
    viewport_rows: usize,
    measure: F,
    max_width: f32,
) -> PageInfo
where
    F: Fn(&str) -> f32,
{
    let mut wrapped_output = Vec::new();
    for record in scrollback.iter() {
        for paragraph in paragraphs(record) {
            wrapped_output.extend(wrap_paragraph(paragraph, &measure, max_width));
        }
    }
    let wrapped_input = wrap(&prompted(input), &measure, max_width);
    let reserved_input_rows = wrapped_input.len().max(1);
    let visible_output_rows = viewport_rows.saturating_sub(reserved_input_rows);
    let max_start_offset = wrapped_output.len().saturating_sub(visible_output_rows);
    PageInfo {
        wrapped_output,
        wrapped_input,
        reserved_input_rows,
        visible_output_rows,
        max_start_offset,
    }
}

/// The input line with the prompt prepended.
pub fn prompted(input: &str) -> String {
    let mut line = String::with_capacity(INPUT_PROMPT.len() + input.len());
    line.push_str(INPUT_PROMPT);
    line.push_str(input);
    line
}

impl PageInfo {
    /// Clamp an offset into `0..=max_start_offset`.
    #[inline]
    #[must_use]
    pub fn clamp_offset(&self, offset: usize) -> usize {
        offset.min(self.max_start_offset)
    }

    /// Rows one page scroll moves.
    #[inline]
    #[must_use]
    pub fn page_rows(&self) -> usize {
        self.visible_output_rows.max(1)
    }

    /// Range of wrapped output indices visible at `offset`.
    ///
    /// Empty when the input line consumes the whole viewport.
    #[must_use]
    pub fn visible_range(&self, offset: usize) -> Range<usize> {
        if self.visible_output_rows == 0 {
            return 0..0;
        }
        let start = self.clamp_offset(offset).min(self.wrapped_output.len());
        let end = (start + self.visible_output_rows).min(self.wrapped_output.len());
        start..end
    }

    /// Wrapped output lines visible at `offset`.
    #[must_use]
    pub fn visible_output(&self, offset: usize) -> &[String] {
        &self.wrapped_output[self.visible_range(offset)]
    }

    /// Whether output overflows the visible rows (a scrollbar is needed).
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.visible_output_rows > 0 && self.wrapped_output.len() > self.visible_output_rows
    }
}
