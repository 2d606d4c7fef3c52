//! Wall clock widget.
//!
//! Reads time from an injected [`Clock`]; nothing here touches the system
//! clock directly.

use std::sync::Arc;

use chrono::Timelike;
use dterm_core::geometry::Bounds;
use dterm_core::time::Clock;
use dterm_runtime::{CommandOutcome, Widget, WidgetError, WidgetId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const KIND: &str = "clock";
pub(crate) const DEFAULT_TITLE: &str = "Clock";

const COMMANDS: &[&str] = &["clock-format"];

/// Help shown by `help clock`.
pub const CLOCK_HELP: &str = "clock-format <id|name> [12|24]    Get or set time format (12|24)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClockState {
    #[serde(rename = "is24h")]
    is_24h: bool,
    timezone_offset_min: i32,
}

/// Partial state accepted by `update` and by restore.
#[derive(Debug, Default, Deserialize)]
struct ClockPatch {
    #[serde(rename = "is24h")]
    is_24h: Option<bool>,
}

#[derive(Debug)]
pub struct ClockWidget {
    id: WidgetId,
    title: String,
    bounds: Bounds,
    state: ClockState,
    clock: Arc<dyn Clock>,
}

impl ClockWidget {
    #[must_use]
    pub fn new(id: WidgetId, title: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let state = ClockState {
            is_24h: true,
            timezone_offset_min: clock.timezone_offset_minutes(),
        };
        Self {
            id,
            title: title.into(),
            bounds: Bounds::new(10, 10, 200, 100),
            state,
            clock,
        }
    }

    #[must_use]
    pub fn is_24h(&self) -> bool {
        self.state.is_24h
    }

    /// Current time as drawn on the widget: `HH:MM:SS`, or `hh:MM:SS AM|PM`.
    #[must_use]
    pub fn display_text(&self) -> String {
        let now = self.clock.now();
        let (h, m, s) = (now.hour(), now.minute(), now.second());
        if self.state.is_24h {
            format!("{h:02}:{m:02}:{s:02}")
        } else {
            let h12 = match h % 12 {
                0 => 12,
                other => other,
            };
            let suffix = if h < 12 { "AM" } else { "PM" };
            format!("{h12:02}:{m:02}:{s:02} {suffix}")
        }
    }

    fn hours(&self) -> u8 {
        if self.state.is_24h { 24 } else { 12 }
    }

    fn apply_patch(&mut self, value: &Value) -> Result<(), WidgetError> {
        let patch = ClockPatch::deserialize(value).map_err(|source| WidgetError::State {
            kind: KIND.to_owned(),
            source,
        })?;
        if let Some(is_24h) = patch.is_24h {
            self.state.is_24h = is_24h;
        }
        Ok(())
    }
}

impl Widget for ClockWidget {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn set_id(&mut self, id: WidgetId) {
        self.id = id;
    }

    fn kind(&self) -> &'static str {
        KIND
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
        COMMANDS
    }

    fn run_command(&mut self, name: &str, args: &[String]) -> Result<CommandOutcome, WidgetError> {
        if name != "clock-format" {
            return Err(WidgetError::UnknownCommand {
                command: name.to_owned(),
                kind: KIND.to_owned(),
            });
        }
        let text = match args.first().map(String::as_str) {
            None | Some("") => format!("Clock {} uses {}-hour format", self.title, self.hours()),
            Some(value) => {
                self.state.is_24h = match value {
                    "12" => false,
                    "24" => true,
                    _ => return Err(WidgetError::rejected("Invalid format. Use 12 or 24")),
                };
                format!("Clock {} set to {}-hour format", self.title, self.hours())
            }
        };
        Ok(CommandOutcome::text(text))
    }

    fn state(&self) -> Value {
        serde_json::to_value(self.state).unwrap_or(Value::Null)
    }

    /// Only the format survives a reload; the offset always comes from the
    /// current clock.
    fn restore(&mut self, state: &Value) -> Result<(), WidgetError> {
        self.apply_patch(state)
    }

    fn update(&mut self, payload: &Value) -> Result<(), WidgetError> {
        self.apply_patch(payload)
    }
}
