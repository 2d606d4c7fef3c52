//! Command registry.
//!
//! [`CommandRegistry::rebuild`] is a pure function of the core table and the
//! live widgets. The console calls it after any change to the widget set and
//! holds the result unchanged for the duration of each dispatch.
//!
//! # Routing shapes
//!
//! * `Core`: a core table entry.
//! * `Direct`: `name-<id>`, bound to one widget id. The id is looked up again
//!   at dispatch time, so the route always hits whichever widget currently
//!   carries it.
//! * `Base`: `name <id|title> ...`, shared by every widget declaring `name`.
//!   It replaces a core entry of the same name unless that entry is pinned.

use std::collections::{BTreeMap, BTreeSet};

use crate::commands::{CoreCommand, CoreTable};
use crate::widget::{Widget, WidgetId};

/// Where a command name leads.
#[derive(Debug, Clone)]
pub enum Route {
    Core(CoreCommand),
    Direct { command: String, widget: WidgetId },
    Base { command: String },
}

impl Route {
    /// Routing shape for logs.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Core(_) => "core",
            Self::Direct { .. } => "direct",
            Self::Base { .. } => "base",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    routes: BTreeMap<String, Route>,
    by_name: BTreeMap<String, BTreeSet<WidgetId>>,
}

impl CommandRegistry {
    /// Build the registry from scratch.
    #[must_use]
    pub fn rebuild(core: &CoreTable, widgets: &[Box<dyn Widget>]) -> Self {
        let mut routes: BTreeMap<String, Route> = core
            .iter()
            .map(|c| (c.name.to_owned(), Route::Core(*c)))
            .collect();
        let mut by_name: BTreeMap<String, BTreeSet<WidgetId>> = BTreeMap::new();

        for widget in widgets {
            let id = widget.id();
            for &name in widget.commands() {
                by_name.entry(name.to_owned()).or_default().insert(id);
                routes.insert(
                    format!("{name}-{id}"),
                    Route::Direct {
                        command: name.to_owned(),
                        widget: id,
                    },
                );
            }
        }

        for name in by_name.keys() {
            if core.get(name).is_some_and(|c| c.pinned) {
                continue;
            }
            routes.insert(
                name.clone(),
                Route::Base {
                    command: name.clone(),
                },
            );
        }

        tracing::debug!(
            target: "dterm.registry",
            commands = routes.len(),
            widgets = widgets.len(),
            "registry rebuilt"
        );
        Self { routes, by_name }
    }

    #[must_use]
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    /// Every registered name, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Widgets declaring `name`.
    #[must_use]
    pub fn handlers_for(&self, name: &str) -> Option<&BTreeSet<WidgetId>> {
        self.by_name.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
