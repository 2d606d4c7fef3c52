//! Widget constructors keyed by type tag.
//!
//! The catalog is how `add`, `help <type>`, and snapshot loading learn which
//! widget types exist. Types register a factory and an optional help text;
//! nothing else in the runtime names a concrete widget.

use std::collections::BTreeMap;
use std::fmt;

use crate::widget::{Widget, WidgetId};

/// Builds a widget with the given id and optional title. A `None` title
/// selects the type's default.
pub type WidgetFactory = Box<dyn Fn(WidgetId, Option<&str>) -> Box<dyn Widget> + Send + Sync>;

struct Entry {
    factory: WidgetFactory,
    help: Option<String>,
}

/// Registered widget types.
#[derive(Default)]
pub struct WidgetCatalog {
    entries: BTreeMap<String, Entry>,
}

impl fmt::Debug for WidgetCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetCatalog")
            .field("kinds", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl WidgetCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a type.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(WidgetId, Option<&str>) -> Box<dyn Widget> + Send + Sync + 'static,
    {
        let kind = kind.into();
        tracing::debug!(target: "dterm.registry", kind = %kind, "widget type registered");
        let help = self.entries.remove(&kind).and_then(|e| e.help);
        self.entries.insert(
            kind,
            Entry {
                factory: Box::new(factory),
                help,
            },
        );
    }

    /// Builder form of [`Self::register`].
    #[must_use]
    pub fn with<F>(mut self, kind: impl Into<String>, factory: F) -> Self
    where
        F: Fn(WidgetId, Option<&str>) -> Box<dyn Widget> + Send + Sync + 'static,
    {
        self.register(kind, factory);
        self
    }

    /// Attach help text to a registered type. Returns `false` if the type is
    /// unknown.
    pub fn set_help(&mut self, kind: &str, help: impl Into<String>) -> bool {
        match self.entries.get_mut(kind) {
            Some(entry) => {
                entry.help = Some(help.into());
                true
            }
            None => false,
        }
    }

    /// Construct a widget of `kind`.
    #[must_use]
    pub fn create(&self, kind: &str, id: WidgetId, title: Option<&str>) -> Option<Box<dyn Widget>> {
        self.entries.get(kind).map(|e| (e.factory)(id, title))
    }

    #[must_use]
    pub fn help(&self, kind: &str) -> Option<&str> {
        self.entries.get(kind).and_then(|e| e.help.as_deref())
    }

    /// Registered type tags, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
