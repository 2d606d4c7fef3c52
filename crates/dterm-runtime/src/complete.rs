//! Tab completion.
//!
//! Only the text before the caret is considered. With no argument token yet
//! the command name is completed against every registered name
//! (case-sensitive prefix). Once an argument exists, commands that take a
//! target complete their first argument from widget ids and titles
//! (case-insensitive prefix).

use std::collections::BTreeSet;
use std::ops::Range;

use crate::registry::CommandRegistry;
use crate::widget::Widget;

/// Core commands whose first argument is a widget target.
pub const TARGETED_CORE_COMMANDS: [&str; 4] = ["remove", "update", "resize", "move"];

/// Candidates plus the byte range of the token they replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions {
    /// Sorted, without duplicates.
    pub candidates: Vec<String>,
    pub replace: Range<usize>,
}

impl Completions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }

    /// Substitute candidate `index` into `input`.
    ///
    /// Returns the new line and the caret byte offset, which lands after the
    /// inserted token and one space.
    #[must_use]
    pub fn apply(&self, input: &str, index: usize) -> Option<(String, usize)> {
        let candidate = self.candidates.get(index)?;
        let head = input.get(..self.replace.start)?;
        let tail = input.get(self.replace.end..)?;
        let tail = tail.strip_prefix(' ').unwrap_or(tail);
        let mut line = String::with_capacity(input.len() + candidate.len() + 1);
        line.push_str(head);
        line.push_str(candidate);
        line.push(' ');
        let caret = line.len();
        line.push_str(tail);
        Some((line, caret))
    }
}

/// Propose completions for `input` with the caret at byte `caret`.
#[must_use]
pub fn complete(
    registry: &CommandRegistry,
    widgets: &[Box<dyn Widget>],
    input: &str,
    caret: usize,
) -> Completions {
    let caret = floor_char_boundary(input, caret);
    let prefix = &input[..caret];
    let mut tokens = prefix.split(' ');
    let command = tokens.next().unwrap_or_default();
    let Some(first_arg) = tokens.next() else {
        let candidates = registry
            .names()
            .filter(|name| name.starts_with(command))
            .map(str::to_owned)
            .collect();
        return Completions {
            candidates,
            replace: 0..command.len(),
        };
    };

    let start = command.len() + 1;
    let replace = start..start + first_arg.len();
    let handlers = registry.handlers_for(command);
    if handlers.is_none() && !TARGETED_CORE_COMMANDS.contains(&command) {
        return Completions {
            candidates: Vec::new(),
            replace,
        };
    }

    let needle = first_arg.to_lowercase();
    let candidates: BTreeSet<String> = widgets
        .iter()
        .filter(|w| handlers.is_none_or(|ids| ids.contains(&w.id())))
        .flat_map(|w| [w.id().to_string(), w.title().to_owned()])
        .filter(|s| s.to_lowercase().starts_with(&needle))
        .collect();
    Completions {
        candidates: candidates.into_iter().collect(),
        replace,
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
