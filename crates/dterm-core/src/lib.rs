#![forbid(unsafe_code)]

//! Core: input events, geometry, layout settings, and injected time.
//!
//! # Role in dterm
//! `dterm-core` is the input layer shared by every other crate. It owns the
//! normalized event types the console consumes, the pixel geometry used for
//! widget bounds and hit testing, the dashboard layout settings (grid size,
//! compact mode) with the terminal metrics derived from them, and the
//! [`time::Clock`] collaborator that replaces ambient wall-clock access.
//!
//! # How it fits in the system
//! `dterm-text` and `dterm-terminal` depend on [`layout::TerminalMetrics`] for
//! wrap widths and line heights. `dterm-runtime` routes [`event::Event`]
//! values to the terminal overlay or the focused widget.

pub mod event;
pub mod geometry;
pub mod layout;
pub mod time;

pub use event::{Event, KeyCode, KeyEvent, Modifiers, PointerEvent, PointerKind, WheelEvent};
pub use geometry::{Bounds, Surface};
pub use layout::{LayoutState, SettingError, TerminalMetrics};
pub use time::{Clock, FixedClock, SystemClock};
