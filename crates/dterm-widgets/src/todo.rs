//! Task list widget.
//!
//! State is `{ todos: [{text, completed}], input, isAdding }`; only `todos`
//! matters across saves, the other two belong to the in-widget editor.
//!
//! Pointer: the `+` button in the bottom-right corner opens the editor, and
//! a press on a task row toggles it. Keys reach the widget only while it is
//! focused and the terminal is closed; the editor consumes them until Enter
//! commits a non-empty task.

use dterm_core::event::{KeyCode, KeyEvent};
use dterm_core::geometry::Bounds;
use dterm_core::layout::LayoutState;
use dterm_runtime::{CommandOutcome, Widget, WidgetError, WidgetId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const KIND: &str = "todo";
pub(crate) const DEFAULT_TITLE: &str = "Tasks";

const COMMANDS: &[&str] = &["add-todo", "list-todos", "remove-todo", "toggle-todo"];

/// Help shown by `help todo`.
pub const TODO_HELP: &str = "\
add-todo <id|name> <text...>      Add a task
remove-todo <id|name> <index>     Remove a task
list-todos <id|name>              List tasks
toggle-todo <id|name> <index>     Toggle a task";

/// First task row offset from the widget top.
const FIRST_ROW: i32 = 35;
/// Half the clickable height of a row.
const ROW_SLOP: i32 = 10;

/// One task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TodoState {
    todos: Vec<TodoItem>,
    input: String,
    is_adding: bool,
}

#[derive(Debug, Clone)]
pub struct TodoWidget {
    id: WidgetId,
    title: String,
    bounds: Bounds,
    state: TodoState,
}

impl TodoWidget {
    #[must_use]
    pub fn new(id: WidgetId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            bounds: Bounds::new(10, 10, 200, 150),
            state: TodoState::default(),
        }
    }

    pub fn todos(&self) -> &[TodoItem] {
        &self.state.todos
    }

    /// Whether the in-widget editor is open.
    #[must_use]
    pub fn is_adding(&self) -> bool {
        self.state.is_adding
    }

    /// Text typed into the editor so far.
    pub fn input(&self) -> &str {
        &self.state.input
    }

    fn task_index(&self, args: &[String]) -> Result<usize, WidgetError> {
        let raw = args.first().map(String::as_str).unwrap_or_default();
        raw.parse::<usize>()
            .ok()
            .filter(|i| *i < self.state.todos.len())
            .ok_or_else(|| WidgetError::rejected(format!("Task {raw} not found in {}", self.title)))
    }

    fn in_add_button(&self, x: f32, y: f32) -> bool {
        let b = self.bounds;
        Bounds::new(b.right() - 30, b.bottom() - 20, 20, 15).contains(x, y)
    }

    fn row_at(&self, x: f32, y: f32, layout: &LayoutState) -> Option<usize> {
        let b = self.bounds;
        if x < b.x as f32 || x > b.right() as f32 {
            return None;
        }
        let pitch = if layout.is_compact() { 15 } else { 20 };
        (0..self.state.todos.len()).find(|&i| {
            let center = b.y + FIRST_ROW + i as i32 * pitch;
            y >= (center - ROW_SLOP) as f32 && y <= (center + ROW_SLOP) as f32
        })
    }
}

impl Widget for TodoWidget {
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
        let text = match name {
            "add-todo" => {
                let task = args.join(" ");
                if task.is_empty() {
                    return Err(WidgetError::rejected("Task cannot be empty"));
                }
                let reply = format!("Added task to {}: {task}", self.title);
                self.state.todos.push(TodoItem::new(task));
                reply
            }
            "remove-todo" => {
                let index = self.task_index(args)?;
                self.state.todos.remove(index);
                format!("Removed task {index} from {}", self.title)
            }
            "list-todos" => {
                if self.state.todos.is_empty() {
                    "No tasks".to_owned()
                } else {
                    self.state
                        .todos
                        .iter()
                        .enumerate()
                        .map(|(i, t)| {
                            format!("{i}: {} {}", t.text, if t.completed { "[x]" } else { "[ ]" })
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            "toggle-todo" => {
                let index = self.task_index(args)?;
                let item = &mut self.state.todos[index];
                item.completed = !item.completed;
                format!("Toggled task {index} in {}", self.title)
            }
            other => {
                return Err(WidgetError::UnknownCommand {
                    command: other.to_owned(),
                    kind: KIND.to_owned(),
                });
            }
        };
        Ok(CommandOutcome::text(text))
    }

    fn state(&self) -> Value {
        serde_json::to_value(&self.state).unwrap_or(Value::Null)
    }

    fn restore(&mut self, state: &Value) -> Result<(), WidgetError> {
        self.state = TodoState::deserialize(state).map_err(|source| WidgetError::State {
            kind: KIND.to_owned(),
            source,
        })?;
        Ok(())
    }

    /// `{"todos": [...]}` replaces the list; other keys are ignored.
    fn update(&mut self, payload: &Value) -> Result<(), WidgetError> {
        if let Some(todos) = payload.get("todos") {
            self.state.todos =
                Vec::<TodoItem>::deserialize(todos).map_err(|source| WidgetError::State {
                    kind: KIND.to_owned(),
                    source,
                })?;
        }
        Ok(())
    }

    fn on_pointer_down(&mut self, x: f32, y: f32, layout: &LayoutState) -> bool {
        if self.in_add_button(x, y) {
            self.state.is_adding = true;
            return true;
        }
        if let Some(index) = self.row_at(x, y, layout) {
            let item = &mut self.state.todos[index];
            item.completed = !item.completed;
            tracing::trace!(target: "dterm.widgets", id = self.id, index, "task toggled by pointer");
            return true;
        }
        false
    }

    fn on_key(&mut self, key: &KeyEvent) -> bool {
        if !self.state.is_adding {
            return false;
        }
        match key.code {
            KeyCode::Enter => {
                if !self.state.input.is_empty() {
                    let text = std::mem::take(&mut self.state.input);
                    self.state.todos.push(TodoItem::new(text));
                    self.state.is_adding = false;
                }
                true
            }
            KeyCode::Backspace => {
                self.state.input.pop();
                true
            }
            _ => match key.printable() {
                Some(c) => {
                    self.state.input.push(c);
                    true
                }
                None => false,
            },
        }
    }
}
