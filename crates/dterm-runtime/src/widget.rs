//! The widget contract.
//!
//! Widgets are stored as an ordered, homogeneous `Vec<Box<dyn Widget>>`; the
//! console never inspects concrete types. [`Widget::kind`] is a tag used in
//! user-facing messages and snapshot files only.
//!
//! A widget declares the command names it answers in [`Widget::commands`];
//! the registry turns each into a direct `name-<id>` entry and a shared
//! `name <id|title> ...` dispatcher. The console only touches widget
//! internals through these calls.

use std::fmt;

use dterm_core::event::KeyEvent;
use dterm_core::geometry::Bounds;
use dterm_core::layout::LayoutState;
use serde_json::Value;

use crate::error::WidgetError;
use crate::outcome::CommandOutcome;

/// Stable widget identifier. Reassigned only by a bulk snapshot load.
pub type WidgetId = u32;

/// A dashboard widget.
pub trait Widget: fmt::Debug + Send {
    /// Current id.
    fn id(&self) -> WidgetId;

    /// Reassign the id (bulk reload only).
    fn set_id(&mut self, id: WidgetId);

    /// Type tag, e.g. `"todo"`.
    fn kind(&self) -> &'static str;

    /// Free-text title used for fuzzy target matches.
    fn title(&self) -> &str;

    /// Position and size on the dashboard.
    fn bounds(&self) -> Bounds;

    /// Move or resize.
    fn set_bounds(&mut self, bounds: Bounds);

    /// Command names this widget answers.
    fn commands(&self) -> &'static [&'static str];

    /// Run one of [`Self::commands`].
    fn run_command(&mut self, name: &str, args: &[String]) -> Result<CommandOutcome, WidgetError>;

    /// Serializable state for snapshots.
    fn state(&self) -> Value;

    /// Restore from a saved state (best effort; unknown keys are ignored).
    fn restore(&mut self, state: &Value) -> Result<(), WidgetError>;

    /// Apply a partial state from the `update` command.
    fn update(&mut self, _payload: &Value) -> Result<(), WidgetError> {
        Err(WidgetError::UpdateUnsupported {
            kind: self.kind().to_owned(),
        })
    }

    /// Whether a point is on the widget.
    fn hit_test(&self, x: f32, y: f32) -> bool {
        self.bounds().contains(x, y)
    }

    /// Handle a press that landed on the dashboard. Return `true` if consumed.
    fn on_pointer_down(&mut self, _x: f32, _y: f32, _layout: &LayoutState) -> bool {
        false
    }

    /// Handle a key while focused. Return `true` if consumed.
    fn on_key(&mut self, _key: &KeyEvent) -> bool {
        false
    }

    /// Whether this widget answers `name`.
    fn supports(&self, name: &str) -> bool {
        self.commands().contains(&name)
    }
}
