//! Line selection over wrapped output.
//!
//! A selection is a contiguous span of absolute wrapped-output indices (not
//! window-relative). The anchor is fixed when the interaction begins; the end
//! follows the pointer and may sit before the anchor. Direction is only
//! normalized when text is extracted.

/// Anchor and current end of a selection, in wrapped-output indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// Where the interaction began.
    pub start: usize,
    /// Latest interaction position.
    pub end: usize,
}

impl SelectionRange {
    /// `(min, max)` of the two endpoints.
    #[inline]
    #[must_use]
    pub fn ordered(&self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Whether `index` lies within the selection (inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        let (lo, hi) = self.ordered();
        (lo..=hi).contains(&index)
    }
}

/// Selection tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    range: Option<SelectionRange>,
    dragging: bool,
}

impl Selection {
    /// Start a new selection anchored at `index`.
    pub fn begin(&mut self, index: usize) {
        self.range = Some(SelectionRange {
            start: index,
            end: index,
        });
        self.dragging = true;
    }

    /// Move the end of an in-progress selection.
    pub fn update(&mut self, index: usize) -> bool {
        match (&mut self.range, self.dragging) {
            (Some(range), true) => {
                range.end = index;
                true
            }
            _ => false,
        }
    }

    /// Stop tracking the pointer; the range stays for copying.
    pub fn finish(&mut self) {
        self.dragging = false;
    }

    /// Drop the selection.
    pub fn clear(&mut self) {
        self.range = None;
        self.dragging = false;
    }

    /// Current range, if any.
    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    /// Whether the pointer is still extending the selection.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Join `lines[min..=max]` with line breaks.
    ///
    /// Endpoints past the end of `lines` are clamped to the last line, which
    /// covers output that re-wrapped shorter since the selection was made.
    /// Returns `None` without a selection or without lines.
    #[must_use]
    pub fn extract(&self, lines: &[String]) -> Option<String> {
        let range = self.range?;
        let last = lines.len().checked_sub(1)?;
        let (lo, hi) = range.ordered();
        let (lo, hi) = (lo.min(last), hi.min(last));
        Some(lines[lo..=hi].join("\n"))
    }
}

/// Absolute wrapped-output index under a pointer row.
///
/// The window-relative row is clamped to the visible rows, then offset and
/// clamped to the last output line. `None` when nothing is visible.
#[must_use]
pub fn row_at(
    y: f32,
    content_top: f32,
    line_height: f32,
    visible_rows: usize,
    offset: usize,
    total_lines: usize,
) -> Option<usize> {
    if visible_rows == 0 || total_lines == 0 || line_height <= 0.0 {
        return None;
    }
    let row = ((y - content_top) / line_height).floor();
    let row = if row.is_finite() && row > 0.0 {
        (row as usize).min(visible_rows - 1)
    } else {
        0
    };
    Some((offset + row).min(total_lines - 1))
}
