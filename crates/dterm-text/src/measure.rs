//! Text measurement.
//!
//! A [`TextMeasurer`] turns a string into a pixel width for one of the two
//! terminal fonts. Hosts with real font metrics implement it over their
//! renderer; [`CellMeasurer`] approximates a monospace font by counting
//! terminal cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Which terminal font a measurement is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontScale {
    /// Normal text size.
    #[default]
    Regular,
    /// Compact-mode text size.
    Compact,
}

impl FontScale {
    /// Font for the given compact flag.
    #[inline]
    #[must_use]
    pub const fn for_compact(compact: bool) -> Self {
        if compact { Self::Compact } else { Self::Regular }
    }
}

/// Measures rendered text width in pixels.
pub trait TextMeasurer: std::fmt::Debug + Send + Sync {
    /// Width of `text` rendered in `font`.
    fn measure(&self, text: &str, font: FontScale) -> f32;
}

/// Monospace approximation: `display_width(text) * cell_width(font)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasurer {
    regular: f32,
    compact: f32,
}

impl Default for CellMeasurer {
    fn default() -> Self {
        Self {
            regular: 8.4,
            compact: 6.0,
        }
    }
}

impl CellMeasurer {
    /// Custom cell widths in pixels.
    #[must_use]
    pub const fn new(regular: f32, compact: f32) -> Self {
        Self { regular, compact }
    }

    /// Cell width used for `font`.
    #[inline]
    #[must_use]
    pub const fn cell_width(&self, font: FontScale) -> f32 {
        match font {
            FontScale::Regular => self.regular,
            FontScale::Compact => self.compact,
        }
    }
}

impl TextMeasurer for CellMeasurer {
    fn measure(&self, text: &str, font: FontScale) -> f32 {
        display_width(text) as f32 * self.cell_width(font)
    }
}

/// Display width of text in terminal cells.
///
/// ASCII is counted byte-wise; anything else is segmented into grapheme
/// clusters so combining marks and ZWJ sequences count once.
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.bytes().filter(|b| !b.is_ascii_control()).count();
    }
    text.graphemes(true)
        .map(|g| UnicodeWidthStr::width(g).min(2))
        .sum()
}
