//! Test widgets shared by the unit tests.

use dterm_core::event::KeyEvent;
use dterm_core::geometry::Bounds;
use serde_json::{Value, json};

use crate::catalog::WidgetCatalog;
use crate::error::WidgetError;
use crate::outcome::CommandOutcome;
use crate::widget::{Widget, WidgetId};

#[derive(Debug)]
pub(crate) struct Mock {
    id: WidgetId,
    kind: &'static str,
    title: String,
    bounds: Bounds,
    commands: &'static [&'static str],
    pub(crate) calls: u64,
    pub(crate) keys: String,
}

impl Mock {
    pub(crate) fn new(id: WidgetId, title: &str) -> Self {
        Self {
            id,
            kind: "mock",
            title: title.to_owned(),
            bounds: Bounds::new(0, 0, 200, 150),
            commands: &["boom", "echo"],
            calls: 0,
            keys: String::new(),
        }
    }

    pub(crate) fn quiet(id: WidgetId, title: &str) -> Self {
        Self {
            kind: "quiet",
            commands: &["hush"],
            ..Self::new(id, title)
        }
    }

    pub(crate) fn at(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }
}

impl Widget for Mock {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn set_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    fn kind(&self) -> &'static str {
        self.kind
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    fn commands(&self) -> &'static [&'static str] {
        self.commands
    }

    fn run_command(&mut self, name: &str, args: &[String]) -> Result<CommandOutcome, WidgetError> {
        self.calls += 1;
        match name {
            "echo" => Ok(CommandOutcome::text(format!(
                "{} {}: {}",
                self.title,
                self.id,
                args.join(" ")
            ))),
            "boom" => panic!("mock exploded"),
            "hush" => Ok(CommandOutcome::text("shh")),
            other => Err(WidgetError::UnknownCommand {
                command: other.to_owned(),
                kind: self.kind.to_owned(),
            }),
        }
    }

    fn state(&self) -> Value {
        json!({ "calls": self.calls, "keys": self.keys })
    }

    fn restore(&mut self, state: &Value) -> Result<(), WidgetError> {
        if let Some(calls) = state.get("calls").and_then(Value::as_u64) {
            self.calls = calls;
        }
        Ok(())
    }

    fn update(&mut self, payload: &Value) -> Result<(), WidgetError> {
        if self.kind == "quiet" {
            return Err(WidgetError::UpdateUnsupported {
                kind: self.kind.to_owned(),
            });
        }
        match payload.get("title").and_then(Value::as_str) {
            Some(title) => {
                self.title = title.to_owned();
                Ok(())
            }
            None => Err(WidgetError::rejected("title required")),
        }
    }

    fn on_key(&mut self, key: &KeyEvent) -> bool {
        match key.printable() {
            Some(c) => {
                self.keys.push(c);
                true
            }
            None => false,
        }
    }
}

pub(crate) fn mock_catalog() -> WidgetCatalog {
    let mut catalog = WidgetCatalog::new()
        .with("mock", |id, title| {
            Box::new(Mock::new(id, title.unwrap_or("Mock")))
        })
        .with("quiet", |id, title| {
            Box::new(Mock::quiet(id, title.unwrap_or("Quiet")))
        });
    catalog.set_help("mock", "echo <id|name> [text...]    Echo text back");
    catalog
}
