//! What a command hands back to the console.

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Text appended to the scrollback (possibly empty, possibly multi-line).
    Immediate(String),
    /// Work settled later by the task runner.
    Deferred(DeferredOp),
    /// The command paged the viewport; nothing is appended and the
    /// scroll-to-bottom rule does not apply.
    Scrolled(PageMove),
}

impl CommandOutcome {
    /// Immediate text outcome.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Immediate(text.into())
    }

    /// No output.
    #[must_use]
    pub fn empty() -> Self {
        Self::Immediate(String::new())
    }
}

impl From<String> for CommandOutcome {
    fn from(text: String) -> Self {
        Self::Immediate(text)
    }
}

impl From<&str> for CommandOutcome {
    fn from(text: &str) -> Self {
        Self::Immediate(text.to_owned())
    }
}

/// Which way a page command went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Prev,
}

/// A page command's effect on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMove {
    pub direction: PageDirection,
    /// False when already at the boundary in `direction`.
    pub moved: bool,
}

impl PageMove {
    #[must_use]
    pub const fn new(direction: PageDirection, moved: bool) -> Self {
        Self { direction, moved }
    }

    /// Status text for the move: `Next`, `Prev`, or the boundary notice.
    #[must_use]
    pub fn notice(&self) -> &'static str {
        match (self.direction, self.moved) {
            (PageDirection::Next, true) => "Next",
            (PageDirection::Next, false) => "No more pages",
            (PageDirection::Prev, true) => "Prev",
            (PageDirection::Prev, false) => "Already at first page",
        }
    }
}

/// A deferred operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredOp {
    /// Fetch a dashboard snapshot and replace the widget set with it.
    LoadDashboard { url: String },
}

impl DeferredOp {
    /// Operation kind for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LoadDashboard { .. } => "load-json",
        }
    }

    /// Notice appended as soon as the operation is issued.
    #[must_use]
    pub fn pending_notice(&self) -> String {
        match self {
            Self::LoadDashboard { url } => format!("Loading {url} ..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_notice_names_the_url() {
        let op = DeferredOp::LoadDashboard {
            url: "http://x/d.json".into(),
        };
        assert_eq!(op.pending_notice(), "Loading http://x/d.json ...");
        assert_eq!(op.kind(), "load-json");
    }

    #[test]
    fn text_conversions() {
        assert_eq!(CommandOutcome::from("hi"), CommandOutcome::text("hi"));
        assert_eq!(CommandOutcome::empty(), CommandOutcome::Immediate(String::new()));
    }
}
