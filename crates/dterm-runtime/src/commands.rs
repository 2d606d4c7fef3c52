//! The fixed core command table.
//!
//! Core handlers receive a [`CommandContext`] borrowing everything a command
//! may touch. Handlers report failures as [`CommandError`] values; their
//! `Display` text is the notice the user sees.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use dterm_core::geometry::Bounds;
use dterm_core::layout::{MIN_WIDGET_HEIGHT, MIN_WIDGET_WIDTH, parse_grid_size, parse_lines_per_page};
use dterm_terminal::TerminalState;

use crate::catalog::WidgetCatalog;
use crate::dashboard::Dashboard;
use crate::error::CommandError;
use crate::outcome::{CommandOutcome, DeferredOp, PageDirection, PageMove};
use crate::widget::WidgetId;

/// Everything a command handler may read or mutate.
pub struct CommandContext<'a> {
    pub dashboard: &'a mut Dashboard,
    pub catalog: &'a WidgetCatalog,
    pub terminal: &'a mut TerminalState,
    pub core: &'a CoreTable,
    /// Set by handlers that add, remove, or restate widgets; the console
    /// rebuilds the registry afterwards.
    pub widgets_changed: bool,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        dashboard: &'a mut Dashboard,
        catalog: &'a WidgetCatalog,
        terminal: &'a mut TerminalState,
        core: &'a CoreTable,
    ) -> Self {
        Self {
            dashboard,
            catalog,
            terminal,
            core,
            widgets_changed: false,
        }
    }

    fn target(&self, args: &[String], usage: &str) -> Result<WidgetId, CommandError> {
        let raw = args.first().ok_or_else(|| CommandError::usage(usage))?;
        self.dashboard
            .resolve_target(raw)
            .ok_or_else(|| CommandError::PluginNotFound(raw.clone()))
    }
}

/// Signature of a core command.
pub type CoreHandler = fn(&mut CommandContext<'_>, &[String]) -> Result<CommandOutcome, CommandError>;

/// One core command.
#[derive(Clone, Copy)]
pub struct CoreCommand {
    pub name: &'static str,
    /// A pinned command keeps its name even when a widget contributes a
    /// command of the same name; other core names yield to the widget's
    /// shared dispatcher.
    pub pinned: bool,
    pub run: CoreHandler,
}

impl fmt::Debug for CoreCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreCommand")
            .field("name", &self.name)
            .field("pinned", &self.pinned)
            .finish_non_exhaustive()
    }
}

/// Core commands keyed by name.
#[derive(Debug, Clone, Default)]
pub struct CoreTable {
    commands: BTreeMap<&'static str, CoreCommand>,
}

impl CoreTable {
    /// The built-in table.
    #[must_use]
    pub fn standard() -> Self {
        let entries: [(&'static str, bool, CoreHandler); 14] = [
            ("help", true, help),
            ("settings", false, settings),
            ("save", false, save),
            ("load-json", false, load_json),
            ("add", false, add),
            ("list", false, list),
            ("remove", false, remove),
            ("update", false, update),
            ("compact", false, compact),
            ("exit", true, exit),
            ("resize", false, resize),
            ("move", false, move_widget),
            ("next", false, next),
            ("prev", false, prev),
        ];
        let mut table = Self::default();
        for (name, pinned, run) in entries {
            table.insert(CoreCommand { name, pinned, run });
        }
        table
    }

    pub fn insert(&mut self, command: CoreCommand) {
        self.commands.insert(command.name, command);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CoreCommand> {
        self.commands.get(name)
    }

    /// Sorted command names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoreCommand> {
        self.commands.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

const SETTINGS_USAGE: &str = "\
settings get <key>                Get a setting (gridSize, linesPerPage)
settings set <key> <value>        Set a setting
settings list                      List all settings";

fn help(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<CommandOutcome, CommandError> {
    let Some(kind) = args.first() else {
        let core: Vec<_> = ctx.core.names().collect();
        let loaded: BTreeSet<_> = ctx.dashboard.widgets().iter().map(|w| w.kind()).collect();
        let modules = if loaded.is_empty() {
            "None".to_owned()
        } else {
            loaded.into_iter().collect::<Vec<_>>().join("\n")
        };
        return Ok(CommandOutcome::text(format!(
            "Core commands:\n{}\n\nLoaded modules:\n{modules}",
            core.join(", ")
        )));
    };
    let kind = kind.to_lowercase();
    Ok(CommandOutcome::text(
        ctx.catalog
            .help(&kind)
            .map_or_else(|| format!("No module commands for type {kind}"), str::to_owned),
    ))
}

fn settings(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<CommandOutcome, CommandError> {
    let lower = |i: usize| args.get(i).map(|s| s.to_lowercase()).unwrap_or_default();
    let grid = ctx.dashboard.layout().grid_size();
    let rows = ctx.terminal.visible_page_rows();
    let text = match lower(0).as_str() {
        "" | "help" => SETTINGS_USAGE.to_owned(),
        "list" => format!("gridSize {grid}\nlinesPerPage {rows}"),
        "get" => match lower(1).as_str() {
            "gridsize" => format!("gridSize {grid}"),
            "linesperpage" => format!("linesPerPage {rows}"),
            other => return Err(CommandError::UnknownSetting(other.to_owned())),
        },
        "set" => {
            let value = args.get(2).map(String::as_str).unwrap_or_default();
            match lower(1).as_str() {
                "gridsize" => {
                    let size = ctx.dashboard.layout_mut().set_grid_size(parse_grid_size(value)?)?;
                    format!("gridSize set to {size}")
                }
                "linesperpage" => {
                    let rows = parse_lines_per_page(value)?;
                    ctx.terminal.set_visible_page_rows(rows);
                    format!("linesPerPage set to {rows}")
                }
                other => return Err(CommandError::UnknownSetting(other.to_owned())),
            }
        }
        _ => return Err(CommandError::InvalidSettingsCommand),
    };
    Ok(CommandOutcome::text(text))
}

fn save(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<CommandOutcome, CommandError> {
    ctx.dashboard
        .snapshot()
        .to_pretty_json()
        .map(CommandOutcome::Immediate)
        .map_err(CommandError::Serialize)
}

fn load_json(_ctx: &mut CommandContext<'_>, args: &[String]) -> Result<CommandOutcome, CommandError> {
    let url = args.first().ok_or_else(|| CommandError::usage("load-json <url>"))?;
    Ok(CommandOutcome::Deferred(DeferredOp::LoadDashboard { url: url.clone() }))
}

fn add(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<CommandOutcome, CommandError> {
    let kind = args.first().map_or("todo", String::as_str);
    if !ctx.catalog.contains(kind) {
        return Err(CommandError::UnknownType(kind.to_owned()));
    }
    let mut title = args.get(1..).unwrap_or_default().join(" ");
    if title.is_empty() {
        title = format!("Plugin {}", ctx.dashboard.len() + 1);
    }
    let id = ctx.dashboard.allocate_id();
    let widget = ctx
        .catalog
        .create(kind, id, Some(&title))
        .ok_or_else(|| CommandError::UnknownType(kind.to_owned()))?;
    ctx.dashboard.push(widget);
    ctx.widgets_changed = true;
    Ok(CommandOutcome::text(format!("Added {kind} plugin: {title}")))
}

fn list(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<CommandOutcome, CommandError> {
    let widgets = ctx.dashboard.widgets();
    if widgets.is_empty() {
        return Ok(CommandOutcome::text("No plugins"));
    }
    let lines: Vec<String> = widgets
        .iter()
        .map(|w| format!("ID: {}, Type: {}, Title: {}", w.id(), w.kind(), w.title()))
        .collect();
    Ok(CommandOutcome::text(lines.join("\n")))
}

fn remove(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<CommandOutcome, CommandError> {
    let id = ctx.target(args, "remove <id|name>")?;
    let widget = ctx
        .dashboard
        .remove(id)
        .ok_or_else(|| CommandError::PluginNotFound(id.to_string()))?;
    ctx.widgets_changed = true;
    Ok(CommandOutcome::text(format!(
        "Removed plugin {} (ID: {id})",
        widget.title()
    )))
}

fn update(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<CommandOutcome, CommandError> {
    let id = ctx.target(args, "update <id|name> <json>")?;
    let payload = args[1..].join(" ");
    let value: serde_json::Value =
        serde_json::from_str(&payload).map_err(CommandError::InvalidPayload)?;
    let widget = ctx
        .dashboard
        .get_mut(id)
        .ok_or_else(|| CommandError::PluginNotFound(id.to_string()))?;
    widget.update(&value)?;
    let text = format!("Updated plugin {} (ID: {id})", widget.title());
    ctx.widgets_changed = true;
    Ok(CommandOutcome::text(text))
}

fn compact(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<CommandOutcome, CommandError> {
    let on = ctx.dashboard.layout_mut().toggle_compact();
    ctx.terminal.set_compact(on);
    Ok(CommandOutcome::text(format!(
        "Compact mode: {}",
        if on { "ON" } else { "OFF" }
    )))
}

fn exit(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<CommandOutcome, CommandError> {
    ctx.terminal.close();
    Ok(CommandOutcome::empty())
}

/// Resolve `<id|name> <a> <b>` for geometry commands. Any failure after the
/// usage check maps to `invalid`.
fn geometry_args(
    ctx: &CommandContext<'_>,
    args: &[String],
    usage: &str,
    invalid: fn(String) -> CommandError,
) -> Result<(WidgetId, i32, i32), CommandError> {
    let raw = args.first().ok_or_else(|| CommandError::usage(usage))?;
    let number = |i: usize| args.get(i).and_then(|s| s.parse::<i32>().ok());
    match (ctx.dashboard.resolve_target(raw), number(1), number(2)) {
        (Some(id), Some(a), Some(b)) => Ok((id, a, b)),
        _ => Err(invalid(raw.clone())),
    }
}

fn resize(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<CommandOutcome, CommandError> {
    let (id, w, h) = geometry_args(
        ctx,
        args,
        "resize <id|name> <width> <height>",
        CommandError::InvalidDimensions,
    )?;
    let layout = *ctx.dashboard.layout();
    let width = layout.snap(w).max(MIN_WIDGET_WIDTH);
    let height = layout.snap(h).max(MIN_WIDGET_HEIGHT);
    let widget = ctx
        .dashboard
        .get_mut(id)
        .ok_or_else(|| CommandError::InvalidDimensions(id.to_string()))?;
    let b = widget.bounds();
    widget.set_bounds(Bounds::new(b.x, b.y, width, height));
    Ok(CommandOutcome::text(format!(
        "Resized plugin {} (ID: {id}) to {width}x{height}",
        widget.title()
    )))
}

fn move_widget(ctx: &mut CommandContext<'_>, args: &[String]) -> Result<CommandOutcome, CommandError> {
    let (id, x, y) = geometry_args(
        ctx,
        args,
        "move <id|name> <x> <y>",
        CommandError::InvalidCoordinates,
    )?;
    let layout = *ctx.dashboard.layout();
    let (x, y) = (layout.snap(x), layout.snap(y));
    let widget = ctx
        .dashboard
        .get_mut(id)
        .ok_or_else(|| CommandError::InvalidCoordinates(id.to_string()))?;
    let b = widget.bounds();
    widget.set_bounds(Bounds::new(x, y, b.width, b.height));
    Ok(CommandOutcome::text(format!(
        "Moved plugin {} (ID: {id}) to ({x}, {y})",
        widget.title()
    )))
}

fn next(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<CommandOutcome, CommandError> {
    let moved = ctx.terminal.page(1);
    Ok(CommandOutcome::Scrolled(PageMove::new(PageDirection::Next, moved)))
}

fn prev(ctx: &mut CommandContext<'_>, _args: &[String]) -> Result<CommandOutcome, CommandError> {
    let moved = ctx.terminal.page(-1);
    Ok(CommandOutcome::Scrolled(PageMove::new(PageDirection::Prev, moved)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Mock, mock_catalog};
    use dterm_core::geometry::Surface;
    use dterm_text::CellMeasurer;
    use std::sync::Arc;

    struct Fixture {
        dashboard: Dashboard,
        catalog: WidgetCatalog,
        terminal: TerminalState,
        core: CoreTable,
    }

    impl Fixture {
        fn new(titles: &[&str]) -> Self {
            let mut dashboard = Dashboard::default();
            for t in titles {
                let id = dashboard.allocate_id();
                dashboard.push(Box::new(Mock::new(id, t)));
            }
            Self {
                dashboard,
                catalog: mock_catalog(),
                terminal: TerminalState::new(
                    Arc::new(CellMeasurer::new(8.0, 6.0)),
                    Surface::new(800.0, 600.0),
                    false,
                )
                .opened(),
                core: CoreTable::standard(),
            }
        }

        fn run(&mut self, name: &str, args: &[&str]) -> Result<CommandOutcome, CommandError> {
            let args: Vec<String> = args.iter().map(|s| (*s).to_owned()).collect();
            let mut ctx = CommandContext::new(
                &mut self.dashboard,
                &self.catalog,
                &mut self.terminal,
                &self.core,
            );
            let command = *self.core.get(name).unwrap();
            (command.run)(&mut ctx, &args)
        }

        fn text(&mut self, name: &str, args: &[&str]) -> String {
            match self.run(name, args) {
                Ok(CommandOutcome::Immediate(text)) => text,
                Ok(other) => panic!("unexpected outcome {other:?}"),
                Err(err) => err.to_string(),
            }
        }
    }

    #[test]
    fn standard_table_is_sorted_with_pinned_help_and_exit() {
        let core = CoreTable::standard();
        assert_eq!(core.len(), 14);
        let names: Vec<_> = core.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        let pinned: Vec<_> = core.iter().filter(|c| c.pinned).map(|c| c.name).collect();
        assert_eq!(pinned, ["exit", "help"]);
    }

    #[test]
    fn help_lists_core_and_loaded_modules() {
        let mut f = Fixture::new(&[]);
        let text = f.text("help", &[]);
        assert!(text.starts_with("Core commands:\nadd, compact, exit, help, list, load-json, move,"));
        assert!(text.ends_with("\n\nLoaded modules:\nNone"));
        f.text("add", &["quiet"]);
        f.text("add", &["mock"]);
        assert!(f.text("help", &[]).ends_with("Loaded modules:\nmock\nquiet"));
    }

    #[test]
    fn help_for_type_is_case_insensitive() {
        let mut f = Fixture::new(&[]);
        assert_eq!(f.text("help", &["MOCK"]), "echo <id|name> [text...]    Echo text back");
        assert_eq!(f.text("help", &["Quiet"]), "No module commands for type quiet");
    }

    #[test]
    fn settings_round_trip() {
        let mut f = Fixture::new(&[]);
        assert_eq!(f.text("settings", &["set", "gridsize", "999"]), "Invalid gridSize (10-500)");
        assert_eq!(f.text("settings", &["set", "gridsize", "100"]), "gridSize set to 100");
        assert_eq!(f.text("settings", &["get", "gridSize"]), "gridSize 100");
        assert_eq!(f.text("settings", &["set", "linesPerPage", "1"]), "Invalid linesPerPage (2-50)");
        assert_eq!(f.text("settings", &["set", "linesperpage", "12"]), "linesPerPage set to 12");
        assert_eq!(f.text("settings", &["list"]), "gridSize 100\nlinesPerPage 12");
        assert_eq!(f.text("settings", &["get", "theme"]), "Unknown setting theme");
        assert_eq!(f.text("settings", &["reset"]), "Invalid settings command");
        assert_eq!(f.text("settings", &[]), SETTINGS_USAGE);
        assert_eq!(f.text("settings", &["HELP"]), SETTINGS_USAGE);
    }

    #[test]
    fn add_defaults_and_rejects_unknown_types() {
        let mut f = Fixture::new(&[]);
        assert_eq!(f.text("add", &["gadget"]), "Unknown module type: gadget");
        assert_eq!(f.text("add", &["mock"]), "Added mock plugin: Plugin 1");
        assert_eq!(f.text("add", &["mock", "Front", "Desk"]), "Added mock plugin: Front Desk");
        assert_eq!(
            f.text("list", &[]),
            "ID: 0, Type: mock, Title: Plugin 1\nID: 1, Type: mock, Title: Front Desk"
        );
        // With no catalog entry for the default type the add fails cleanly.
        assert_eq!(f.text("add", &[]), "Unknown module type: todo");
    }

    #[test]
    fn remove_reports_and_flags_rebuild() {
        let mut f = Fixture::new(&["Tasks", "Clock"]);
        let args = vec!["clock".to_owned()];
        let mut ctx = CommandContext::new(&mut f.dashboard, &f.catalog, &mut f.terminal, &f.core);
        let out = remove(&mut ctx, &args).unwrap();
        assert!(ctx.widgets_changed);
        assert_eq!(out, CommandOutcome::text("Removed plugin Clock (ID: 1)"));
        assert_eq!(f.text("list", &[]), "ID: 0, Type: mock, Title: Tasks");
        assert_eq!(f.text("remove", &["9"]), "Plugin 9 not found");
        assert_eq!(f.text("remove", &[]), "Usage: remove <id|name>");
        assert_eq!(f.text("list", &["x"]), "ID: 0, Type: mock, Title: Tasks");
    }

    #[test]
    fn update_fails_whole_command_on_bad_json() {
        let mut f = Fixture::new(&["Tasks"]);
        assert_eq!(f.text("update", &["0", "{\"title\":"]), "Failed to parse JSON payload");
        assert_eq!(f.dashboard.get(0).unwrap().title(), "Tasks");
        assert_eq!(
            f.text("update", &["tasks", "{\"title\":", "\"Chores\"}"]),
            "Updated plugin Chores (ID: 0)"
        );
        assert_eq!(f.text("update", &["0", "{}"]), "title required");
    }

    #[test]
    fn update_unsupported_names_the_type() {
        let mut f = Fixture::new(&[]);
        f.text("add", &["quiet", "Hush"]);
        assert_eq!(f.text("update", &["0", "{}"]), "Command update not supported for quiet");
    }

    #[test]
    fn compact_toggles_layout_and_terminal() {
        let mut f = Fixture::new(&[]);
        assert_eq!(f.text("compact", &[]), "Compact mode: ON");
        assert!(f.dashboard.layout().is_compact());
        assert!(f.terminal.metrics().compact);
        assert_eq!(f.text("compact", &[]), "Compact mode: OFF");
        assert!(!f.terminal.metrics().compact);
    }

    #[test]
    fn exit_closes_and_prints_nothing() {
        let mut f = Fixture::new(&[]);
        assert_eq!(f.text("exit", &[]), "");
        assert!(!f.terminal.is_open());
    }

    #[test]
    fn resize_snaps_and_enforces_minimums() {
        let mut f = Fixture::new(&["Tasks"]);
        assert_eq!(f.text("resize", &["0", "320", "40"]), "Resized plugin Tasks (ID: 0) to 300x100");
        assert_eq!(f.dashboard.get(0).unwrap().bounds(), Bounds::new(0, 0, 300, 100));
        assert_eq!(f.text("resize", &["0", "325", "175"]), "Resized plugin Tasks (ID: 0) to 350x200");
        assert_eq!(f.text("resize", &["0", "wide", "1"]), "Plugin 0 not found or invalid dimensions");
        assert_eq!(f.text("resize", &["nope", "1", "1"]), "Plugin nope not found or invalid dimensions");
    }

    #[test]
    fn move_snaps_to_current_grid() {
        let mut f = Fixture::new(&["Tasks"]);
        assert_eq!(f.text("move", &["tasks", "74", "76"]), "Moved plugin Tasks (ID: 0) to (50, 100)");
        f.text("settings", &["set", "gridsize", "10"]);
        assert_eq!(f.text("move", &["0", "74", "76"]), "Moved plugin Tasks (ID: 0) to (70, 80)");
        assert_eq!(f.text("move", &["0", "1"]), "Plugin 0 not found or invalid coordinates");
    }

    #[test]
    fn load_json_defers() {
        let mut f = Fixture::new(&[]);
        assert_eq!(
            f.run("load-json", &["http://h/d.json"]).unwrap(),
            CommandOutcome::Deferred(DeferredOp::LoadDashboard {
                url: "http://h/d.json".into()
            })
        );
        assert_eq!(f.text("load-json", &[]), "Usage: load-json <url>");
    }

    #[test]
    fn save_prints_pretty_snapshot() {
        let mut f = Fixture::new(&["Tasks"]);
        let text = f.text("save", &[]);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["plugins"][0]["title"], "Tasks");
        assert_eq!(value["layout"]["gridSize"], 50);
        assert!(text.contains("\n  \"plugins\": ["));
    }

    #[test]
    fn next_and_prev_report_scrolls() {
        let mut f = Fixture::new(&[]);
        for i in 0..20 {
            f.terminal.append_output(&format!("line {i}"));
        }
        f.terminal.scroll_to_top();
        let paged = |outcome| match outcome {
            CommandOutcome::Scrolled(page) => page.notice(),
            other => panic!("expected a page move, got {other:?}"),
        };
        assert_eq!(paged(f.run("next", &[]).unwrap()), "Next");
        assert_eq!(paged(f.run("prev", &[]).unwrap()), "Prev");
        assert_eq!(paged(f.run("prev", &[]).unwrap()), "Already at first page");
        f.terminal.scroll_to_bottom();
        assert_eq!(paged(f.run("next", &[]).unwrap()), "No more pages");
    }
}
