//! The ordered widget collection.
//!
//! Order is paint order: the last widget is topmost and is tried first for
//! pointer hits. Focus is tracked by id so it survives reordering.
//!
//! # Invariants
//!
//! 1. Ids are unique among live widgets. New ids come from a counter that
//!    only grows, so an id is never reused while the counter has not been
//!    reset by [`Dashboard::apply`].
//! 2. `focused` is `None` or the id of a live widget.

use dterm_core::geometry::Bounds;
use dterm_core::layout::{LayoutState, MIN_WIDGET_HEIGHT, MIN_WIDGET_WIDTH};

use crate::catalog::WidgetCatalog;
use crate::snapshot::{DashboardSnapshot, LayoutSnapshot, WidgetSnapshot};
use crate::widget::{Widget, WidgetId};

#[derive(Debug)]
pub struct Dashboard {
    widgets: Vec<Box<dyn Widget>>,
    layout: LayoutState,
    focused: Option<WidgetId>,
    next_id: WidgetId,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(LayoutState::default())
    }
}

impl Dashboard {
    #[must_use]
    pub fn new(layout: LayoutState) -> Self {
        Self {
            widgets: Vec::new(),
            layout,
            focused: None,
            next_id: 0,
        }
    }

    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        &self.widgets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut LayoutState {
        &mut self.layout
    }

    /// Reserve the next id.
    pub fn allocate_id(&mut self) -> WidgetId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Append a widget on top. Its id must come from [`Self::allocate_id`].
    pub fn push(&mut self, widget: Box<dyn Widget>) {
        self.next_id = self.next_id.max(widget.id().saturating_add(1));
        self.widgets.push(widget);
    }

    /// Remove by id, clearing focus if it pointed there.
    pub fn remove(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.index_of(id)?;
        if self.focused == Some(id) {
            self.focused = None;
        }
        Some(self.widgets.remove(index))
    }

    #[must_use]
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.iter().find(|w| w.id() == id).map(AsRef::as_ref)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Box<dyn Widget>> {
        self.widgets.iter_mut().find(|w| w.id() == id)
    }

    /// Resolve a user-typed target.
    ///
    /// A token that parses as an integer matches by id only; anything else
    /// matches the first widget whose lower-cased title contains the
    /// lower-cased token.
    #[must_use]
    pub fn resolve_target(&self, id_or_name: &str) -> Option<WidgetId> {
        if let Ok(n) = id_or_name.parse::<i64>() {
            let id = WidgetId::try_from(n).ok()?;
            return self.get(id).map(|w| w.id());
        }
        let needle = id_or_name.to_lowercase();
        self.widgets
            .iter()
            .find(|w| w.title().to_lowercase().contains(&needle))
            .map(|w| w.id())
    }

    #[must_use]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        self.focused = id.filter(|id| self.index_of(*id).is_some());
    }

    pub fn focused_mut(&mut self) -> Option<&mut Box<dyn Widget>> {
        let id = self.focused?;
        self.get_mut(id)
    }

    /// Move a widget to the top of the paint order.
    pub fn bring_to_front(&mut self, id: WidgetId) {
        if let Some(index) = self.index_of(id) {
            let widget = self.widgets.remove(index);
            self.widgets.push(widget);
        }
    }

    /// Route a press on the dashboard. The topmost widget that consumes it or
    /// contains the point gains focus and moves to the front.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<WidgetId> {
        self.focused = None;
        for index in (0..self.widgets.len()).rev() {
            let widget = &mut self.widgets[index];
            if widget.on_pointer_down(x, y, &self.layout) || widget.hit_test(x, y) {
                let id = widget.id();
                self.focused = Some(id);
                self.bring_to_front(id);
                return Some(id);
            }
        }
        None
    }

    /// Capture the current dashboard.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            layout: LayoutSnapshot {
                grid_size: Some(self.layout.grid_size()),
                is_compact: Some(self.layout.is_compact()),
            },
            plugins: self
                .widgets
                .iter()
                .map(|w| {
                    let b = w.bounds();
                    WidgetSnapshot {
                        id: w.id(),
                        kind: w.kind().to_owned(),
                        title: Some(w.title().to_owned()),
                        x: Some(b.x),
                        y: Some(b.y),
                        width: Some(b.width),
                        height: Some(b.height),
                        state: w.state(),
                    }
                })
                .collect(),
        }
    }

    /// Replace the widget set with a snapshot. Unknown types are skipped and
    /// ids are reassigned `0..n` in document order. Returns how many widgets
    /// were created.
    pub fn apply(&mut self, snapshot: &DashboardSnapshot, catalog: &WidgetCatalog) -> usize {
        if let Some(grid) = snapshot.layout.grid_size {
            // Already range-checked when the snapshot was read.
            let _ = self.layout.set_grid_size(grid);
        }
        if let Some(compact) = snapshot.layout.is_compact {
            self.layout.set_compact(compact);
        }

        self.widgets.clear();
        self.focused = None;
        for entry in &snapshot.plugins {
            let id = self.widgets.len() as WidgetId;
            let Some(mut widget) = catalog.create(&entry.kind, id, entry.title.as_deref()) else {
                tracing::warn!(target: "dterm.persistence", kind = %entry.kind, "unknown widget type skipped");
                continue;
            };
            let d = widget.bounds();
            widget.set_bounds(
                Bounds::new(
                    entry.x.unwrap_or(d.x),
                    entry.y.unwrap_or(d.y),
                    entry.width.unwrap_or(d.width),
                    entry.height.unwrap_or(d.height),
                )
                .at_least(MIN_WIDGET_WIDTH, MIN_WIDGET_HEIGHT),
            );
            if !entry.state.is_null() {
                if let Err(err) = widget.restore(&entry.state) {
                    tracing::warn!(target: "dterm.persistence", id, error = %err, "widget state not restored");
                }
            }
            self.widgets.push(widget);
        }
        self.next_id = self.widgets.len() as WidgetId;
        self.widgets.len()
    }
}
