#![forbid(unsafe_code)]

//! Terminal overlay state: scrollback, the input line, paging, selection.
//!
//! # Role in dterm
//! This crate reconciles a variable-width rendering surface with a logical
//! scrollback buffer. Output records are wrapped on demand by the
//! [`paging`] engine, the scroll offset is kept within the valid range on
//! every mutation by [`TerminalState`], and [`TerminalState::frame`]
//! projects everything a renderer needs into a [`TerminalFrame`].
//!
//! Nothing here draws; nothing here knows about commands.

pub mod input;
pub mod paging;
pub mod scrollback;
pub mod scrollbar;
pub mod selection;
pub mod state;
pub mod view;

pub use input::{HistoryCursor, InputLine};
pub use paging::{INPUT_PROMPT, PageInfo, paginate};
pub use scrollback::Scrollback;
pub use scrollbar::ScrollbarGeometry;
pub use selection::{Selection, SelectionRange};
pub use state::{PointerTarget, TerminalState};
pub use view::TerminalFrame;
