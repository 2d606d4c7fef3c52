#![forbid(unsafe_code)]

//! Text measurement and greedy word wrapping.
//!
//! Wrapping never measures text itself: callers pass a width function, so the
//! paging engine can drive it with a [`TextMeasurer`] and tests can use a
//! synthetic fixed-width measure.

pub mod measure;
pub mod wrap;

pub use measure::{CellMeasurer, FontScale, TextMeasurer, display_width};
pub use wrap::{paragraphs, wrap, wrap_paragraph};
