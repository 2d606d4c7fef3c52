//! The console controller.
//!
//! [`Console`] owns the dashboard, the command registry, the terminal state,
//! and the deferred task runner, and is the only writer of any of them.
//! Every input arrives through [`Console::handle_event`] or
//! [`Console::execute`]; deferred loads are folded back in on
//! [`Event::Tick`] (or by [`Console::poll_tasks`]).
//!
//! # Invariants
//!
//! 1. The registry is rebuilt whole, strictly between dispatches, whenever
//!    the widget set changes.
//! 2. Every submitted line is recorded in history and produces either an
//!    appended notice (scrolling to the bottom) or a viewport move, never
//!    both and never an error escaping the console.

use std::sync::Arc;
use std::time::Duration;

use dterm_core::event::{Event, KeyCode, KeyEvent, PointerEvent, PointerKind};
use dterm_core::geometry::{Bounds, Surface};
use dterm_terminal::{PointerTarget, TerminalFrame, TerminalState};
use dterm_text::{CellMeasurer, TextMeasurer};
use web_time::Instant;

use crate::catalog::WidgetCatalog;
use crate::commands::{CommandContext, CoreTable};
use crate::complete::{Completions, complete};
use crate::config::ConsoleConfig;
use crate::dashboard::Dashboard;
use crate::dispatch::{Invocation, dispatch};
use crate::error::StorageError;
use crate::outcome::{CommandOutcome, PageMove};
use crate::persistence::Persistence;
use crate::registry::CommandRegistry;
use crate::snapshot::DashboardSnapshot;
use crate::tasks::{RemoteLoader, Settled, TaskRunner, UnavailableLoader};

/// Widgets created when there is no saved state.
pub const DEFAULT_SEEDS: [(&str, &str, Bounds); 2] = [
    ("todo", "Tasks", Bounds::new(10, 10, 200, 150)),
    ("clock", "Clock", Bounds::new(220, 10, 200, 100)),
];

/// Work the host must do on the console's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEffect {
    /// Put this text on the clipboard.
    Copy(String),
    /// Read the clipboard and feed it back as [`Event::Paste`].
    RequestPaste,
}

/// Configures and builds a [`Console`].
#[derive(Debug)]
#[must_use]
pub struct ConsoleBuilder {
    catalog: WidgetCatalog,
    config: ConsoleConfig,
    measurer: Arc<dyn TextMeasurer>,
    loader: Arc<dyn RemoteLoader>,
    persistence: Option<Box<dyn Persistence>>,
    surface: Surface,
    open: bool,
}

impl ConsoleBuilder {
    pub fn new(catalog: WidgetCatalog) -> Self {
        Self {
            catalog,
            config: ConsoleConfig::default(),
            measurer: Arc::new(CellMeasurer::default()),
            loader: Arc::new(UnavailableLoader),
            persistence: None,
            surface: Surface::new(800.0, 600.0),
            open: false,
        }
    }

    pub fn config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn loader(mut self, loader: Arc<dyn RemoteLoader>) -> Self {
        self.loader = loader;
        self
    }

    pub fn persistence(mut self, persistence: impl Persistence + 'static) -> Self {
        self.persistence = Some(Box::new(persistence));
        self
    }

    pub fn surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    /// Start with the terminal open.
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Restore saved state (or seed the defaults) and build the registry.
    #[must_use]
    pub fn build(self) -> Console {
        let mut dashboard = Dashboard::new(self.config.layout_state());
        let restored = match self.persistence.as_deref().map(|p| p.load()) {
            Some(Ok(Some(snapshot))) => {
                let count = dashboard.apply(&snapshot, &self.catalog);
                tracing::info!(target: "dterm.persistence", widgets = count, "dashboard restored");
                true
            }
            Some(Err(err)) => {
                tracing::warn!(target: "dterm.persistence", error = %err, "saved dashboard unreadable");
                false
            }
            Some(Ok(None)) | None => false,
        };
        if !restored && self.config.widgets.seed_defaults {
            for (kind, title, bounds) in DEFAULT_SEEDS {
                if !self.catalog.contains(kind) {
                    tracing::debug!(target: "dterm.console", kind, "seed type not registered");
                    continue;
                }
                let id = dashboard.allocate_id();
                if let Some(mut widget) = self.catalog.create(kind, id, Some(title)) {
                    widget.set_bounds(bounds);
                    dashboard.push(widget);
                }
            }
        }

        let mut terminal = TerminalState::new(
            self.measurer,
            self.surface,
            dashboard.layout().is_compact(),
        );
        if self.open {
            terminal.open();
        }
        let core = CoreTable::standard();
        let registry = CommandRegistry::rebuild(&core, dashboard.widgets());
        let last_saved = if restored {
            serde_json::to_string(&dashboard.snapshot()).ok()
        } else {
            None
        };

        Console {
            dashboard,
            catalog: self.catalog,
            core,
            registry,
            terminal,
            tasks: TaskRunner::new(self.loader),
            persistence: self.persistence,
            last_saved,
            config: self.config,
            last_blink: None,
            last_autosave: None,
            last_page: None,
        }
    }
}

/// The terminal overlay and the dashboard it commands.
#[derive(Debug)]
pub struct Console {
    dashboard: Dashboard,
    catalog: WidgetCatalog,
    core: CoreTable,
    registry: CommandRegistry,
    terminal: TerminalState,
    tasks: TaskRunner,
    persistence: Option<Box<dyn Persistence>>,
    /// Compact JSON of the last snapshot written by autosave.
    last_saved: Option<String>,
    config: ConsoleConfig,
    last_blink: Option<Instant>,
    last_autosave: Option<Instant>,
    /// Set by the most recent line when it was a page command.
    last_page: Option<PageMove>,
}

impl Console {
    pub fn builder(catalog: WidgetCatalog) -> ConsoleBuilder {
        ConsoleBuilder::new(catalog)
    }

    // --- Accessors ---

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn terminal(&self) -> &TerminalState {
        &self.terminal
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &WidgetCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Loads issued but not yet folded in.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.outstanding()
    }

    /// How the most recently submitted line paged the viewport, if it was
    /// `next` or `prev`.
    #[must_use]
    pub fn last_page(&self) -> Option<PageMove> {
        self.last_page
    }

    #[must_use]
    pub fn frame(&self) -> TerminalFrame {
        self.terminal.frame()
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        self.terminal.selected_text()
    }

    // --- Commands ---

    /// Run `line` as if typed and submitted.
    pub fn execute(&mut self, line: &str) {
        self.terminal.edit_input(|input| {
            input.replace(line, line.len());
        });
        self.submit();
    }

    /// Submit the current input line.
    pub fn submit(&mut self) {
        let line = self.terminal.commit_input();
        self.last_page = None;
        let invocation = Invocation::parse(&line);
        let mut ctx = CommandContext::new(
            &mut self.dashboard,
            &self.catalog,
            &mut self.terminal,
            &self.core,
        );
        let result = dispatch(&mut ctx, &self.registry, &invocation);
        let widgets_changed = ctx.widgets_changed;
        if widgets_changed {
            self.rebuild_registry();
        }

        match result {
            Ok(CommandOutcome::Immediate(text)) => self.terminal.append_output(&text),
            Ok(CommandOutcome::Deferred(op)) => {
                self.terminal.append_output(&op.pending_notice());
                self.tasks.spawn(op);
            }
            Ok(CommandOutcome::Scrolled(page)) => {
                tracing::debug!(target: "dterm.console", notice = page.notice(), "viewport paged");
                self.last_page = Some(page);
            }
            Err(err) => self.terminal.append_output(&err.to_string()),
        }
    }

    fn rebuild_registry(&mut self) {
        self.registry = CommandRegistry::rebuild(&self.core, self.dashboard.widgets());
    }

    /// Completions for the current input and caret.
    #[must_use]
    pub fn autocomplete(&self) -> Completions {
        let input = self.terminal.input();
        complete(
            &self.registry,
            self.dashboard.widgets(),
            input.value(),
            input.caret_byte(),
        )
    }

    /// Accept the first completion. Returns `false` when there is none.
    pub fn accept_completion(&mut self) -> bool {
        let completions = self.autocomplete();
        let Some((line, caret)) = completions.apply(self.terminal.input().value(), 0) else {
            return false;
        };
        self.terminal.edit_input(|input| input.replace(line, caret));
        true
    }

    // --- Deferred work ---

    /// Fold in every load that has settled. Returns how many were handled.
    pub fn poll_tasks(&mut self) -> usize {
        let settled = self.tasks.try_drain();
        self.settle(settled)
    }

    /// Block until outstanding loads settle (or `timeout` passes), then fold
    /// them in.
    pub fn wait_for_tasks(&mut self, timeout: Duration) -> usize {
        let settled = self.tasks.wait(timeout);
        self.settle(settled)
    }

    fn settle(&mut self, settled: Vec<Settled>) -> usize {
        let count = settled.len();
        for Settled { url, result } in settled {
            let notice = match result.map(DashboardSnapshot::from_value) {
                Ok(Ok(snapshot)) => {
                    let widgets = self.dashboard.apply(&snapshot, &self.catalog);
                    self.rebuild_registry();
                    self.terminal.set_compact(self.dashboard.layout().is_compact());
                    tracing::info!(target: "dterm.console", url = %url, widgets, "dashboard loaded");
                    format!("Loaded dashboard from {url}")
                }
                Ok(Err(err)) => {
                    tracing::warn!(target: "dterm.console", url = %url, error = %err, "dashboard rejected");
                    format!("Failed to apply dashboard from {url}")
                }
                Err(err) => format!("Failed to load {url}: {err}"),
            };
            self.terminal.append_output(&notice);
        }
        count
    }

    // --- Persistence ---

    /// Save if the dashboard changed since the last save. Returns whether a
    /// write happened.
    pub fn autosave(&mut self) -> Result<bool, StorageError> {
        let Some(persistence) = self.persistence.as_mut() else {
            return Ok(false);
        };
        let snapshot = self.dashboard.snapshot();
        let current = serde_json::to_string(&snapshot)?;
        if self.last_saved.as_deref() == Some(current.as_str()) {
            return Ok(false);
        }
        persistence.save(&snapshot)?;
        self.last_saved = Some(current);
        tracing::debug!(target: "dterm.persistence", "autosaved");
        Ok(true)
    }

    // --- Events ---

    /// Route one input event.
    pub fn handle_event(&mut self, event: &Event) -> Option<ConsoleEffect> {
        match event {
            Event::Key(key) => return self.handle_key(key),
            Event::Pointer(pointer) => return self.handle_pointer(*pointer),
            Event::Wheel(wheel) => {
                self.terminal.wheel(wheel.y, wheel.delta_y);
            }
            Event::Resize { width, height } => self.terminal.resize(Surface::new(*width, *height)),
            Event::Paste(text) => {
                if self.terminal.is_open() {
                    self.terminal.edit_input(|input| input.insert_text(text));
                }
            }
            Event::Tick(now) => self.tick(*now),
        }
        None
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<ConsoleEffect> {
        if !self.terminal.is_open() {
            if key.printable() == Some('/') {
                self.terminal.open();
                self.dashboard.set_focus(None);
            } else if let Some(widget) = self.dashboard.focused_mut() {
                widget.on_key(key);
            }
            return None;
        }

        if key.command_chord() {
            if key.is_char('c') {
                return self.terminal.selected_text().map(ConsoleEffect::Copy);
            }
            if key.is_char('v') {
                return Some(ConsoleEffect::RequestPaste);
            }
            return None;
        }

        match key.code {
            KeyCode::Escape => self.terminal.close(),
            KeyCode::PageUp => {
                self.terminal.page(-1);
            }
            KeyCode::PageDown => {
                self.terminal.page(1);
            }
            KeyCode::Home => {
                self.terminal.scroll_to_top();
            }
            KeyCode::End => self.terminal.scroll_to_bottom(),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => {
                self.accept_completion();
            }
            KeyCode::Backspace => {
                self.terminal.edit_input(|i| i.backspace());
            }
            KeyCode::Delete => {
                self.terminal.edit_input(|i| i.delete_forward());
            }
            KeyCode::Left => {
                self.terminal.edit_input(|i| i.move_left());
            }
            KeyCode::Right => {
                self.terminal.edit_input(|i| i.move_right());
            }
            KeyCode::Up => {
                self.terminal.edit_input(|i| i.history_prev());
            }
            KeyCode::Down => {
                self.terminal.edit_input(|i| i.history_next());
            }
            KeyCode::Char(_) => {
                if let Some(c) = key.printable() {
                    self.terminal.edit_input(|i| i.insert_char(c));
                }
            }
        }
        None
    }

    fn handle_pointer(&mut self, pointer: PointerEvent) -> Option<ConsoleEffect> {
        match pointer.kind {
            PointerKind::Down => match self.terminal.pointer_down(pointer.x, pointer.y) {
                PointerTarget::Dashboard => {
                    self.terminal.close();
                    self.dashboard.pointer_down(pointer.x, pointer.y);
                }
                PointerTarget::Panel | PointerTarget::Scrollbar => self.dashboard.set_focus(None),
            },
            PointerKind::Move => {
                self.terminal.pointer_move(pointer.x, pointer.y);
            }
            PointerKind::Up => self.terminal.pointer_up(),
            PointerKind::Context => {
                return self
                    .terminal
                    .is_over_panel(pointer.y)
                    .then_some(ConsoleEffect::RequestPaste);
            }
        }
        None
    }

    fn tick(&mut self, now: Instant) {
        if due(&mut self.last_blink, now, self.config.caret_blink()) {
            self.terminal.toggle_caret_blink();
        }
        self.poll_tasks();
        if due(&mut self.last_autosave, now, self.config.autosave_interval()) {
            if let Err(err) = self.autosave() {
                tracing::warn!(target: "dterm.persistence", error = %err, "autosave failed");
            }
        }
    }
}

/// Whether `interval` has passed since `last`. The first call only starts
/// the clock.
fn due(last: &mut Option<Instant>, now: Instant, interval: Duration) -> bool {
    match *last {
        None => {
            *last = Some(now);
            false
        }
        Some(at) if now.saturating_duration_since(at) >= interval => {
            *last = Some(now);
            true
        }
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::tasks::MemoryLoader;
    use crate::testing::mock_catalog;
    use dterm_core::event::{Modifiers, WheelEvent};

    fn console() -> Console {
        Console::builder(mock_catalog())
            .measurer(Arc::new(CellMeasurer::new(10.0, 10.0)))
            .open(true)
            .build()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn type_text(c: &mut Console, text: &str) {
        for ch in text.chars() {
            c.handle_event(&key(KeyCode::Char(ch)));
        }
    }

    fn last_notice(c: &Console) -> String {
        let records = c.terminal().scrollback().records();
        records[records.len() - 2].clone()
    }

    #[test]
    fn typed_line_dispatches_and_scrolls() {
        let mut c = console();
        c.execute("add mock Desk");
        type_text(&mut c, "echo desk hi");
        c.handle_event(&key(KeyCode::Enter));
        assert_eq!(last_notice(&c), "Desk 0: hi");
        assert_eq!(c.terminal().offset(), c.terminal().page_info().max_start_offset);
        assert_eq!(c.terminal().input().history(), ["add mock Desk", "echo desk hi"]);
        assert!(c.terminal().input().is_empty());
    }

    #[test]
    fn unknown_and_blank_lines_still_enter_history() {
        let mut c = console();
        c.execute("nope");
        c.execute("");
        assert_eq!(c.terminal().input().history(), ["nope", ""]);
        assert_eq!(last_notice(&c), "Unknown command: ");
    }

    #[test]
    fn suffix_route_appears_after_add() {
        let mut c = console();
        assert!(c.registry().route("echo-0").is_none());
        c.execute("add mock");
        assert!(c.registry().route("echo-0").is_some());
        c.execute("remove 0");
        assert!(c.registry().route("echo-0").is_none());
    }

    #[test]
    fn paging_commands_do_not_snap_back() {
        let mut c = console();
        for i in 0..10 {
            c.execute(&format!("echo-x {i}"));
        }
        let bottom = c.terminal().offset();
        c.execute("prev");
        assert!(c.terminal().offset() < bottom);
        assert_eq!(c.terminal().input().history().last().map(String::as_str), Some("prev"));
    }

    #[test]
    fn load_json_settles_through_the_task_runner() {
        let body = r#"{"layout": {"isCompact": true}, "plugins": [{"type": "mock", "title": "Remote"}]}"#;
        let mut c = Console::builder(mock_catalog())
            .loader(Arc::new(MemoryLoader::new().with("mem://d", body).with("mem://bad", "[]")))
            .open(true)
            .build();
        c.execute("load-json mem://d");
        assert_eq!(last_notice(&c), "Loading mem://d ...");
        assert_eq!(c.pending_tasks(), 1);
        assert_eq!(c.wait_for_tasks(Duration::from_secs(5)), 1);
        assert_eq!(last_notice(&c), "Loaded dashboard from mem://d");
        assert!(c.terminal().metrics().compact);
        assert!(c.registry().route("echo-0").is_some());

        c.execute("load-json mem://bad");
        c.wait_for_tasks(Duration::from_secs(5));
        assert_eq!(last_notice(&c), "Failed to apply dashboard from mem://bad");

        c.execute("load-json mem://gone");
        c.wait_for_tasks(Duration::from_secs(5));
        assert_eq!(last_notice(&c), "Failed to load mem://gone: no resource at mem://gone");
        assert_eq!(c.dashboard().len(), 1);
    }

    #[test]
    fn slash_opens_escape_closes() {
        let mut c = Console::builder(mock_catalog()).build();
        assert!(!c.terminal().is_open());
        c.handle_event(&key(KeyCode::Char('/')));
        assert!(c.terminal().is_open());
        type_text(&mut c, "/x");
        assert_eq!(c.terminal().input().value(), "/x");
        c.handle_event(&key(KeyCode::Escape));
        assert!(!c.terminal().is_open());
    }

    #[test]
    fn keys_reach_focused_widget_while_closed() {
        let mut c = Console::builder(mock_catalog()).build();
        c.execute("add mock");
        c.execute("exit");
        // Mock sits at (0, 0, 200, 150); the panel starts at y=450.
        c.handle_event(&Event::Pointer(PointerEvent::new(PointerKind::Down, 10.0, 10.0)));
        assert_eq!(c.dashboard().focused(), Some(0));
        type_text(&mut c, "ab");
        let snapshot = c.dashboard().snapshot();
        assert_eq!(snapshot.plugins[0].state["keys"], "ab");
        assert!(c.terminal().input().is_empty());
    }

    #[test]
    fn clicking_the_panel_opens_and_unfocuses() {
        let mut c = Console::builder(mock_catalog()).build();
        c.execute("add mock");
        c.handle_event(&Event::Pointer(PointerEvent::new(PointerKind::Down, 10.0, 10.0)));
        assert_eq!(c.dashboard().focused(), Some(0));
        c.handle_event(&Event::Pointer(PointerEvent::new(PointerKind::Down, 10.0, 500.0)));
        assert!(c.terminal().is_open());
        assert_eq!(c.dashboard().focused(), None);
        c.handle_event(&Event::Pointer(PointerEvent::new(PointerKind::Down, 10.0, 10.0)));
        assert!(!c.terminal().is_open());
    }

    #[test]
    fn copy_and_paste_effects() {
        let mut c = console();
        c.execute("echo-x");
        let chord = |ch| Event::Key(KeyEvent::new(KeyCode::Char(ch)).with_modifiers(Modifiers::CTRL));
        assert_eq!(c.handle_event(&chord('c')), None);
        // Output rows start at content_top = 470; row 1 holds the notice.
        c.handle_event(&Event::Pointer(PointerEvent::new(PointerKind::Down, 50.0, 490.0)));
        c.handle_event(&Event::Pointer(PointerEvent::new(PointerKind::Up, 50.0, 490.0)));
        assert_eq!(
            c.handle_event(&chord('c')),
            Some(ConsoleEffect::Copy("Unknown command: echo-x".into()))
        );
        assert_eq!(c.handle_event(&chord('v')), Some(ConsoleEffect::RequestPaste));
        c.handle_event(&Event::Paste("list\r\nmore".into()));
        assert_eq!(c.terminal().input().value(), "list more");
    }

    #[test]
    fn right_click_on_the_open_panel_requests_paste() {
        let mut c = console();
        let context = |y| Event::Pointer(PointerEvent::new(PointerKind::Context, 50.0, y));
        assert_eq!(c.handle_event(&context(500.0)), Some(ConsoleEffect::RequestPaste));
        assert_eq!(c.handle_event(&context(100.0)), None);
        c.execute("exit");
        assert_eq!(c.handle_event(&context(500.0)), None);
    }

    #[test]
    fn tab_accepts_first_completion() {
        let mut c = console();
        type_text(&mut c, "rem");
        c.handle_event(&key(KeyCode::Tab));
        assert_eq!(c.terminal().input().value(), "remove ");
        assert_eq!(c.terminal().input().caret_byte(), 7);
    }

    #[test]
    fn history_keys_recall_lines() {
        let mut c = console();
        c.execute("list");
        c.execute("help");
        c.handle_event(&key(KeyCode::Up));
        c.handle_event(&key(KeyCode::Up));
        assert_eq!(c.terminal().input().value(), "list");
        c.handle_event(&key(KeyCode::Down));
        assert_eq!(c.terminal().input().value(), "help");
    }

    #[test]
    fn wheel_and_page_keys_scroll() {
        let mut c = console();
        for _ in 0..10 {
            c.execute("list");
        }
        let bottom = c.terminal().offset();
        c.handle_event(&key(KeyCode::Home));
        assert_eq!(c.terminal().offset(), 0);
        c.handle_event(&Event::Wheel(WheelEvent { x: 10.0, y: 500.0, delta_y: 45.0 }));
        assert_eq!(c.terminal().offset(), 2);
        c.handle_event(&key(KeyCode::PageDown));
        assert_eq!(c.terminal().offset(), 7);
        c.handle_event(&key(KeyCode::End));
        assert_eq!(c.terminal().offset(), bottom);
    }

    #[test]
    fn tick_blinks_and_autosaves_on_change() {
        let storage = MemoryStorage::new();
        let mut c = Console::builder(mock_catalog())
            .persistence(storage.clone())
            .open(true)
            .build();
        let t0 = Instant::now();
        c.handle_event(&Event::Tick(t0));
        assert!(storage.raw().is_none());
        assert!(c.frame().caret_visible);

        c.handle_event(&Event::Tick(t0 + Duration::from_millis(1000)));
        assert!(!c.frame().caret_visible);
        let first = storage.raw().unwrap();

        assert!(!c.autosave().unwrap());
        c.execute("add mock Saved");
        assert!(c.autosave().unwrap());
        assert_ne!(storage.raw().unwrap(), first);
    }

    #[test]
    fn restores_from_persistence_instead_of_seeding() {
        let storage = MemoryStorage::with_json(
            r#"{"layout": {"gridSize": 20}, "plugins": [{"type": "quiet", "title": "Kept"}]}"#,
        );
        let mut c = Console::builder(mock_catalog()).persistence(storage).build();
        assert_eq!(c.dashboard().len(), 1);
        assert_eq!(c.dashboard().layout().grid_size(), 20);
        // Nothing changed since the restore.
        assert!(!c.autosave().unwrap());
    }

    #[test]
    fn unregistered_seed_types_do_not_consume_ids() {
        let mut c = console();
        assert!(c.dashboard().is_empty());
        c.execute("add mock");
        assert_eq!(c.dashboard().widgets()[0].id(), 0);

        let catalog = mock_catalog().with("clock", |id, title| {
            Box::new(crate::testing::Mock::new(id, title.unwrap_or("Clock")))
        });
        let c = Console::builder(catalog).build();
        // The todo seed is skipped, so the clock seed takes id 0.
        assert_eq!(c.dashboard().len(), 1);
        assert_eq!(c.dashboard().widgets()[0].id(), 0);
        assert_eq!(c.dashboard().widgets()[0].title(), "Clock");
    }

    #[test]
    fn unreadable_state_falls_back_to_seeds() {
        let catalog = mock_catalog()
            .with("todo", |id, title| {
                Box::new(crate::testing::Mock::new(id, title.unwrap_or("Tasks")))
            });
        let c = Console::builder(catalog)
            .persistence(MemoryStorage::with_json("not json"))
            .build();
        // Only the todo seed has a registered type.
        assert_eq!(c.dashboard().len(), 1);
        let seeded = &c.dashboard().widgets()[0];
        assert_eq!(seeded.title(), "Tasks");
        assert_eq!(seeded.bounds(), Bounds::new(10, 10, 200, 150));
    }
}
