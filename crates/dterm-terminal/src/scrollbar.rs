//! Scrollbar geometry for the terminal panel.
//!
//! The track runs down the right edge of the panel, inset 2px vertically.
//! Thumb height is proportional to the visible share of wrapped output with a
//! 10px floor; thumb position is proportional to `offset / max_start_offset`.

use dterm_core::geometry::Surface;
use dterm_core::layout::TerminalMetrics;

use crate::paging::PageInfo;

const TRACK_RIGHT_INSET: f32 = 8.0;
const TRACK_WIDTH: f32 = 6.0;
const TRACK_VERTICAL_INSET: f32 = 2.0;
const THUMB_MIN_HEIGHT: f32 = 10.0;

/// Track and thumb rectangles, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeometry {
    /// Track left edge.
    pub track_x: f32,
    /// Track top edge.
    pub track_y: f32,
    /// Track width.
    pub track_width: f32,
    /// Track height.
    pub track_height: f32,
    /// Thumb top edge.
    pub thumb_y: f32,
    /// Thumb height.
    pub thumb_height: f32,
}

impl ScrollbarGeometry {
    /// Geometry for the current page, or `None` when output fits.
    #[must_use]
    pub fn compute(
        surface: Surface,
        metrics: &TerminalMetrics,
        page: &PageInfo,
        offset: usize,
    ) -> Option<Self> {
        if !page.overflows() {
            return None;
        }
        let track_x = surface.width - TRACK_RIGHT_INSET;
        let track_y = metrics.panel_top(surface.height) + TRACK_VERTICAL_INSET;
        let track_height = (metrics.height - 2.0 * TRACK_VERTICAL_INSET).max(0.0);
        let visible = page.visible_output_rows as f32;
        let total = page.wrapped_output.len() as f32;
        let thumb_height = (track_height * (visible / total)).floor().max(THUMB_MIN_HEIGHT);
        let max_thumb_y = track_y + track_height - thumb_height;
        let ratio = if page.max_start_offset == 0 {
            0.0
        } else {
            page.clamp_offset(offset) as f32 / page.max_start_offset as f32
        };
        let thumb_y = (track_y + ((track_height - thumb_height) * ratio).floor()).min(max_thumb_y);
        Some(Self {
            track_x,
            track_y,
            track_width: TRACK_WIDTH,
            track_height,
            thumb_y,
            thumb_height,
        })
    }

    /// Whether `x` lies in the track's column.
    #[inline]
    #[must_use]
    pub fn in_column(&self, x: f32) -> bool {
        x >= self.track_x && x <= self.track_x + self.track_width
    }

    /// Whether the point lies on the track.
    #[inline]
    #[must_use]
    pub fn in_track(&self, x: f32, y: f32) -> bool {
        self.in_column(x) && y >= self.track_y && y <= self.track_y + self.track_height
    }

    /// Whether `y` lies on the thumb (column assumed).
    #[inline]
    #[must_use]
    pub fn in_thumb(&self, y: f32) -> bool {
        y >= self.thumb_y && y <= self.thumb_y + self.thumb_height
    }

    fn travel(&self) -> f32 {
        (self.track_height - self.thumb_height).max(1.0)
    }

    /// Offset for a thumb whose top edge is dragged to `thumb_top`.
    #[must_use]
    pub fn offset_for_thumb_top(&self, thumb_top: f32, max_start_offset: usize) -> usize {
        let top = thumb_top
            .min(self.track_y + self.track_height - self.thumb_height)
            .max(self.track_y);
        self.offset_for_ratio((top - self.track_y) / self.travel(), max_start_offset)
    }

    /// Offset for a click on the track (outside the thumb) at `y`.
    #[must_use]
    pub fn offset_for_track_click(&self, y: f32, max_start_offset: usize) -> usize {
        self.offset_for_ratio((y - self.track_y) / self.travel(), max_start_offset)
    }

    fn offset_for_ratio(&self, ratio: f32, max_start_offset: usize) -> usize {
        let raw = (ratio * max_start_offset as f32).round();
        if raw.is_finite() && raw > 0.0 {
            (raw as usize).min(max_start_offset)
        } else {
            0
        }
    }
}
