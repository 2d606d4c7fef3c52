//! Dashboard layout settings and the terminal metrics derived from them.
//!
//! [`LayoutState`] carries the two user-adjustable layout knobs: the snapping
//! grid size and compact mode. Compact mode shrinks the terminal panel and
//! its line height; [`TerminalMetrics`] is the pure projection of those
//! settings onto a surface width.
//!
//! # Invariants
//!
//! 1. `grid_size` is always within `GRID_SIZE_MIN..=GRID_SIZE_MAX`.
//! 2. [`TerminalMetrics::viewport_rows`] is at least 1.

use thiserror::Error;

/// Default snapping grid in pixels.
pub const GRID_SIZE_DEFAULT: u32 = 50;
/// Smallest accepted grid size.
pub const GRID_SIZE_MIN: u32 = 10;
/// Largest accepted grid size.
pub const GRID_SIZE_MAX: u32 = 500;
/// Minimum widget width after any resize.
pub const MIN_WIDGET_WIDTH: i32 = 150;
/// Minimum widget height after any resize.
pub const MIN_WIDGET_HEIGHT: i32 = 100;
/// Smallest accepted `linesPerPage`.
pub const LINES_PER_PAGE_MIN: usize = 2;
/// Largest accepted `linesPerPage`.
pub const LINES_PER_PAGE_MAX: usize = 50;
/// Horizontal inset of terminal text from the surface edge.
pub const TEXT_INSET: f32 = 10.0;

const PANEL_HEIGHT: f32 = 150.0;
const PANEL_HEIGHT_COMPACT: f32 = 100.0;
const LINE_HEIGHT: f32 = 20.0;
const LINE_HEIGHT_COMPACT: f32 = 15.0;
const PADDING_TOP: f32 = 20.0;
const HORIZONTAL_PADDING: f32 = 20.0;

/// A rejected setting value. The message names the valid range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingError {
    /// Grid size outside 10-500 or not a number.
    #[error("Invalid gridSize ({GRID_SIZE_MIN}-{GRID_SIZE_MAX})")]
    GridSize,
    /// Page size outside 2-50 or not a number.
    #[error("Invalid linesPerPage ({LINES_PER_PAGE_MIN}-{LINES_PER_PAGE_MAX})")]
    LinesPerPage,
}

/// Parse and range-check a grid size typed by the user.
pub fn parse_grid_size(raw: &str) -> Result<u32, SettingError> {
    let value: u32 = raw.trim().parse().map_err(|_| SettingError::GridSize)?;
    check_grid_size(value)
}

/// Convert a grid size read from a snapshot. Only whole numbers are accepted.
pub fn grid_size_from_number(value: f64) -> Result<u32, SettingError> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(SettingError::GridSize);
    }
    check_grid_size(value as u32)
}

/// Parse and range-check a page size typed by the user.
pub fn parse_lines_per_page(raw: &str) -> Result<usize, SettingError> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|_| SettingError::LinesPerPage)?;
    if (LINES_PER_PAGE_MIN..=LINES_PER_PAGE_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(SettingError::LinesPerPage)
    }
}

fn check_grid_size(value: u32) -> Result<u32, SettingError> {
    if (GRID_SIZE_MIN..=GRID_SIZE_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(SettingError::GridSize)
    }
}

/// Grid size and compact mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutState {
    grid_size: u32,
    compact: bool,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE_DEFAULT,
            compact: false,
        }
    }
}

impl LayoutState {
    /// Create layout settings, rejecting an out-of-range grid size.
    pub fn new(grid_size: u32, compact: bool) -> Result<Self, SettingError> {
        Ok(Self {
            grid_size: check_grid_size(grid_size)?,
            compact,
        })
    }

    /// Current grid size in pixels.
    #[inline]
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Whether compact mode is on.
    #[inline]
    pub const fn is_compact(&self) -> bool {
        self.compact
    }

    /// Set the grid size. Leaves the state untouched on error.
    pub fn set_grid_size(&mut self, size: u32) -> Result<u32, SettingError> {
        self.grid_size = check_grid_size(size)?;
        Ok(self.grid_size)
    }

    /// Set compact mode explicitly.
    pub fn set_compact(&mut self, compact: bool) {
        self.compact = compact;
    }

    /// Flip compact mode and return the new value.
    pub fn toggle_compact(&mut self) -> bool {
        self.compact = !self.compact;
        self.compact
    }

    /// Snap a coordinate to the nearest grid line (halves round up).
    #[must_use]
    pub fn snap(&self, value: i32) -> i32 {
        let g = f64::from(self.grid_size);
        let steps = (f64::from(value) / g + 0.5).floor();
        (steps * g) as i32
    }

    /// Terminal metrics for a surface of the given width.
    #[must_use]
    pub fn terminal_metrics(&self, surface_width: f32) -> TerminalMetrics {
        TerminalMetrics::new(self.compact, surface_width)
    }
}

/// Pixel metrics of the terminal panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalMetrics {
    /// Panel height.
    pub height: f32,
    /// Height of one text row.
    pub line_height: f32,
    /// Distance from the panel top to the first text baseline.
    pub padding_top: f32,
    /// Width available to wrapped text.
    pub max_width: f32,
    /// Whether the compact font applies.
    pub compact: bool,
}

impl TerminalMetrics {
    /// Metrics for the given mode and surface width.
    #[must_use]
    pub fn new(compact: bool, surface_width: f32) -> Self {
        Self {
            height: if compact { PANEL_HEIGHT_COMPACT } else { PANEL_HEIGHT },
            line_height: if compact { LINE_HEIGHT_COMPACT } else { LINE_HEIGHT },
            padding_top: PADDING_TOP,
            max_width: (surface_width - HORIZONTAL_PADDING).max(0.0),
            compact,
        }
    }

    /// Text rows the panel holds.
    #[must_use]
    pub fn viewport_rows(&self) -> usize {
        let rows = ((self.height - self.padding_top) / self.line_height).floor();
        if rows.is_finite() && rows >= 1.0 {
            rows as usize
        } else {
            1
        }
    }

    /// Y coordinate of the panel's top edge on a surface of the given height.
    #[inline]
    #[must_use]
    pub fn panel_top(&self, surface_height: f32) -> f32 {
        surface_height - self.height
    }

    /// Y coordinate of the first text row.
    #[inline]
    #[must_use]
    pub fn content_top(&self, surface_height: f32) -> f32 {
        self.panel_top(surface_height) + self.padding_top
    }
}
