#![forbid(unsafe_code)]

//! Built-in widgets for the dashboard.
//!
//! * [`TodoWidget`] (`todo`): a task list with `add-todo`, `remove-todo`,
//!   `list-todos`, and `toggle-todo`, plus pointer and keyboard editing.
//! * [`ClockWidget`] (`clock`): a 12/24-hour clock with `clock-format`.
//!
//! [`register_builtin`] adds both types to a [`WidgetCatalog`].

use std::sync::Arc;

use dterm_core::time::Clock;
use dterm_runtime::WidgetCatalog;

pub mod clock;
pub mod todo;

pub use clock::{CLOCK_HELP, ClockWidget};
pub use todo::{TODO_HELP, TodoItem, TodoWidget};

/// Register `todo` and `clock`, with their help texts.
pub fn register_builtin(catalog: &mut WidgetCatalog, clock: Arc<dyn Clock>) {
    catalog.register(todo::KIND, |id, title| {
        Box::new(TodoWidget::new(id, title.unwrap_or(todo::DEFAULT_TITLE)))
    });
    catalog.set_help(todo::KIND, TODO_HELP);
    catalog.register(clock::KIND, move |id, title| {
        Box::new(ClockWidget::new(
            id,
            title.unwrap_or(clock::DEFAULT_TITLE),
            Arc::clone(&clock),
        ))
    });
    catalog.set_help(clock::KIND, CLOCK_HELP);
}
