//! Terminal overlay state.
//!
//! [`TerminalState`] owns the scrollback, the input line, the selection, and
//! the scroll offset, and is the only place the offset changes.
//!
//! # Invariants
//!
//! 1. `0 <= offset <= page_info().max_start_offset` after every public
//!    method returns. Every mutation that can change wrapping (new output,
//!    input edits, resize, compact mode, page size) re-clamps.
//! 2. Manual scrolling clamps but never snaps back to the bottom; only
//!    [`TerminalState::append_output`] and [`TerminalState::scroll_to_bottom`] do.

use std::sync::Arc;

use dterm_core::geometry::Surface;
use dterm_core::layout::{TEXT_INSET, TerminalMetrics};
use dterm_text::{FontScale, TextMeasurer, wrap};
use unicode_segmentation::UnicodeSegmentation;

use crate::input::InputLine;
use crate::paging::{PageInfo, paginate, prompted};
use crate::scrollback::Scrollback;
use crate::scrollbar::ScrollbarGeometry;
use crate::selection::{Selection, row_at};
use crate::view::TerminalFrame;

/// Where a pointer press landed relative to the terminal panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Above the panel, on the dashboard.
    Dashboard,
    /// Inside the panel's text area.
    Panel,
    /// On the scrollbar track or thumb.
    Scrollbar,
}

/// Scrollback, input, selection, and scroll position of the overlay.
#[derive(Debug, Clone)]
pub struct TerminalState {
    scrollback: Scrollback,
    input: InputLine,
    selection: Selection,
    /// First visible wrapped-output index.
    offset: usize,
    /// Viewport capacity in rows (`linesPerPage`).
    visible_page_rows: usize,
    open: bool,
    caret_blink_on: bool,
    /// Fractional wheel lines not yet applied.
    wheel_accumulator: f32,
    /// Pointer distance below the thumb top while dragging it.
    thumb_grab: Option<f32>,
    surface: Surface,
    metrics: TerminalMetrics,
    measurer: Arc<dyn TextMeasurer>,
}

impl TerminalState {
    /// Create a closed terminal for a surface.
    pub fn new(measurer: Arc<dyn TextMeasurer>, surface: Surface, compact: bool) -> Self {
        let metrics = TerminalMetrics::new(compact, surface.width);
        Self {
            scrollback: Scrollback::new(),
            input: InputLine::new(),
            selection: Selection::default(),
            offset: 0,
            visible_page_rows: metrics.viewport_rows(),
            open: false,
            caret_blink_on: true,
            wheel_accumulator: 0.0,
            thumb_grab: None,
            surface,
            metrics,
            measurer,
        }
    }

    /// Start open (builder).
    #[must_use]
    pub fn opened(mut self) -> Self {
        self.open = true;
        self
    }

    // --- Accessors ---

    /// Output log.
    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    /// Input line.
    pub fn input(&self) -> &InputLine {
        &self.input
    }

    /// First visible wrapped-output index.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Viewport capacity in rows.
    pub fn visible_page_rows(&self) -> usize {
        self.visible_page_rows
    }

    /// Whether the overlay is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Caret blink phase.
    pub fn caret_blink_on(&self) -> bool {
        self.caret_blink_on
    }

    /// Current selection tracker.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Surface size.
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Panel metrics.
    pub fn metrics(&self) -> &TerminalMetrics {
        &self.metrics
    }

    /// Paginate the current contents for the current viewport.
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        let font = FontScale::for_compact(self.metrics.compact);
        let measurer = &self.measurer;
        paginate(
            &self.scrollback,
            self.input.value(),
            self.visible_page_rows,
            |s| measurer.measure(s, font),
            self.metrics.max_width,
        )
    }

    // --- Visibility ---

    /// Show the overlay.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the overlay.
    pub fn close(&mut self) {
        self.open = false;
        self.thumb_grab = None;
        self.selection.finish();
    }

    /// Flip the caret blink phase.
    pub fn toggle_caret_blink(&mut self) {
        self.caret_blink_on = !self.caret_blink_on;
    }

    // --- Content ---

    /// Apply an edit to the input line.
    pub fn edit_input<R>(&mut self, edit: impl FnOnce(&mut InputLine) -> R) -> R {
        let result = edit(&mut self.input);
        self.clamp();
        result
    }

    /// Submit the input line (recorded in history) and return it.
    pub fn commit_input(&mut self) -> String {
        let line = self.input.commit();
        self.clamp();
        line
    }

    /// Append a command result and scroll to the bottom.
    ///
    /// The scroll happens even when `message` is empty.
    pub fn append_output(&mut self, message: &str) {
        self.scrollback.push_block(message);
        self.scroll_to_bottom();
    }

    // --- Scrolling ---

    /// Jump to the last page.
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.page_info().max_start_offset;
    }

    /// Jump to the first line.
    pub fn scroll_to_top(&mut self) -> bool {
        let moved = self.offset != 0;
        self.offset = 0;
        moved
    }

    /// Set the offset, clamped.
    pub fn set_offset(&mut self, offset: usize) -> bool {
        let before = self.offset;
        self.offset = self.page_info().clamp_offset(offset);
        self.offset != before
    }

    /// Scroll by whole lines (positive toward newer output).
    pub fn scroll_by(&mut self, lines: isize) -> bool {
        let target = self.offset.saturating_add_signed(lines);
        self.set_offset(target)
    }

    /// Scroll by whole pages of visible output rows.
    pub fn page(&mut self, pages: isize) -> bool {
        let rows = self.page_info().page_rows() as isize;
        self.scroll_by(rows.saturating_mul(pages))
    }

    /// Feed a wheel delta (pixels) over the panel.
    ///
    /// Deltas accumulate in fractional lines; whole lines are applied and the
    /// remainder carried. Ignored while closed or above the panel.
    pub fn wheel(&mut self, y: f32, delta_y: f32) -> bool {
        if !self.open || y < self.metrics.panel_top(self.surface.height) {
            return false;
        }
        self.wheel_accumulator += delta_y / self.metrics.line_height;
        if self.wheel_accumulator.abs() < 1.0 || !self.wheel_accumulator.is_finite() {
            if !self.wheel_accumulator.is_finite() {
                self.wheel_accumulator = 0.0;
            }
            return false;
        }
        let steps = self.wheel_accumulator.trunc();
        self.wheel_accumulator -= steps;
        self.scroll_by(steps as isize)
    }

    // --- Geometry ---

    /// React to a surface resize: new metrics and a recomputed page size.
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        self.metrics = TerminalMetrics::new(self.metrics.compact, surface.width);
        self.visible_page_rows = self.metrics.viewport_rows();
        self.clamp();
        tracing::debug!(
            target: "dterm.terminal",
            width = surface.width,
            height = surface.height,
            rows = self.visible_page_rows,
            "terminal resized"
        );
    }

    /// Switch fonts and panel height. The page size is kept until the next
    /// resize.
    pub fn set_compact(&mut self, compact: bool) {
        self.metrics = TerminalMetrics::new(compact, self.surface.width);
        self.clamp();
    }

    /// Override the page size (`linesPerPage`).
    pub fn set_visible_page_rows(&mut self, rows: usize) {
        self.visible_page_rows = rows.max(1);
        self.clamp();
    }

    // --- Pointer ---

    /// Whether the open panel covers surface row `y`.
    #[must_use]
    pub fn is_over_panel(&self, y: f32) -> bool {
        self.open && y >= self.metrics.panel_top(self.surface.height)
    }

    /// Handle a press. Presses on the panel open the overlay, start a
    /// selection over output rows, or grab the scrollbar.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> PointerTarget {
        if y < self.metrics.panel_top(self.surface.height) {
            return PointerTarget::Dashboard;
        }
        self.open = true;
        let page = self.page_info();
        let scrollbar = ScrollbarGeometry::compute(self.surface, &self.metrics, &page, self.offset);
        let in_column = scrollbar.is_some_and(|sb| sb.in_column(x));
        let content_top = self.metrics.content_top(self.surface.height);

        match row_at(
            y,
            content_top,
            self.metrics.line_height,
            page.visible_output_rows,
            self.offset,
            page.wrapped_output.len(),
        ) {
            Some(index) if !in_column && y >= content_top => self.selection.begin(index),
            _ => self.selection.clear(),
        }

        match scrollbar {
            Some(sb) if sb.in_track(x, y) => {
                if sb.in_thumb(y) {
                    self.thumb_grab = Some(y - sb.thumb_y);
                } else {
                    self.offset =
                        sb.offset_for_track_click(y, page.max_start_offset);
                }
                PointerTarget::Scrollbar
            }
            _ => PointerTarget::Panel,
        }
    }

    /// Handle pointer motion: extend a selection or drag the thumb.
    pub fn pointer_move(&mut self, _x: f32, y: f32) -> bool {
        let mut changed = false;
        if self.selection.is_dragging() {
            let page = self.page_info();
            if let Some(index) = row_at(
                y,
                self.metrics.content_top(self.surface.height),
                self.metrics.line_height,
                page.visible_output_rows,
                self.offset,
                page.wrapped_output.len(),
            ) {
                changed |= self.selection.update(index);
            }
        }
        if let Some(grab) = self.thumb_grab {
            let page = self.page_info();
            if let Some(sb) =
                ScrollbarGeometry::compute(self.surface, &self.metrics, &page, self.offset)
            {
                let before = self.offset;
                self.offset = sb.offset_for_thumb_top(y - grab, page.max_start_offset);
                changed |= before != self.offset;
            }
        }
        changed
    }

    /// Handle a release: the selection stops following the pointer.
    pub fn pointer_up(&mut self) {
        self.selection.finish();
        self.thumb_grab = None;
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Text of the selected output lines, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        self.selection.extract(&self.page_info().wrapped_output)
    }

    // --- Frame ---

    /// Project the state into a renderable frame.
    #[must_use]
    pub fn frame(&self) -> TerminalFrame {
        let page = self.page_info();
        let range = page.visible_range(self.offset);
        let first_visible_index = range.start;
        let visible_output_lines = page.wrapped_output[range].to_vec();

        let font = FontScale::for_compact(self.metrics.compact);
        let measure = |s: &str| self.measurer.measure(s, font);
        let caret_lines = wrap(&prompted(self.input.before_caret()), measure, self.metrics.max_width);
        let caret_line_index = caret_lines.len().saturating_sub(1);
        let caret_line = caret_lines.last().map(String::as_str).unwrap_or_default();

        TerminalFrame {
            caret_row: visible_output_lines.len() + caret_line_index,
            caret_column: caret_line.graphemes(true).count(),
            caret_x: TEXT_INSET + measure(caret_line),
            caret_visible: self.open && self.caret_blink_on,
            visible_output_lines,
            visible_input_lines: page.wrapped_input.clone(),
            first_visible_index,
            selection: self.selection.range(),
            scrollbar: ScrollbarGeometry::compute(self.surface, &self.metrics, &page, self.offset),
            content_top: self.metrics.content_top(self.surface.height),
            line_height: self.metrics.line_height,
        }
    }

    fn clamp(&mut self) {
        self.offset = self.page_info().clamp_offset(self.offset);
    }
}
