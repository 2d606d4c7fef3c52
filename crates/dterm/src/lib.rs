#![forbid(unsafe_code)]

//! Dashboard terminal public facade.
//!
//! Re-exports the stable surface of the internal crates and offers a
//! catalog pre-populated with the built-in widgets, so a host only needs:
//!
//! ```
//! use dterm::prelude::*;
//!
//! let mut console = Console::builder(dterm::default_catalog()).open(true).build();
//! console.execute("list");
//! assert!(console.terminal().scrollback().iter().any(|r| r.contains("Title: Tasks")));
//! ```

use std::sync::Arc;

// --- Core re-exports -------------------------------------------------------

pub use dterm_core::event::{Event, KeyCode, KeyEvent, Modifiers, PointerEvent, PointerKind, WheelEvent};
pub use dterm_core::geometry::{Bounds, Surface};
pub use dterm_core::layout::{LayoutState, SettingError, TerminalMetrics};
pub use dterm_core::time::{Clock, FixedClock, SystemClock};

// --- Text and terminal re-exports -----------------------------------------

pub use dterm_terminal::{PageInfo, ScrollbarGeometry, SelectionRange, TerminalFrame, TerminalState};
pub use dterm_text::{CellMeasurer, FontScale, TextMeasurer, wrap};

// --- Runtime re-exports ----------------------------------------------------

pub use dterm_runtime::{
    CommandError, CommandOutcome, CommandRegistry, ConfigError, Console, ConsoleBuilder, ConsoleConfig,
    ConsoleEffect, Dashboard, DashboardSnapshot, DeferredOp, FileLoader, FileStorage, LoadError,
    MemoryLoader, MemoryStorage, PageDirection, PageMove, Persistence, RemoteLoader, StorageError,
    Widget, WidgetCatalog, WidgetError, WidgetId,
};

// --- Widgets ---------------------------------------------------------------

pub use dterm_widgets::{ClockWidget, TodoItem, TodoWidget};

/// Catalog with `todo` and `clock` registered against the host clock.
#[must_use]
pub fn default_catalog() -> WidgetCatalog {
    catalog_with_clock(Arc::new(SystemClock))
}

/// Catalog with `todo` and `clock` registered against `clock`.
#[must_use]
pub fn catalog_with_clock(clock: Arc<dyn Clock>) -> WidgetCatalog {
    let mut catalog = WidgetCatalog::new();
    dterm_widgets::register_builtin(&mut catalog, clock);
    catalog
}

pub mod prelude {
    //! Everything a host needs to drive a console.

    pub use crate::{
        Bounds, Clock, Console, ConsoleBuilder, ConsoleConfig, ConsoleEffect, Event, KeyCode, KeyEvent,
        Modifiers, Persistence, PointerEvent, PointerKind, RemoteLoader, Surface, TerminalFrame,
        Widget, WidgetCatalog,
    };
}
