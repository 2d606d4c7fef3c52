//! Append-only output log.

/// Ordered output records in insertion order.
///
/// Records are immutable once appended and may contain embedded line breaks.
/// The log is never truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scrollback {
    records: Vec<String>,
}

impl Scrollback {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record.
    pub fn push(&mut self, record: impl Into<String>) {
        self.records.push(record.into());
    }

    /// Append a command result framed by blank records.
    ///
    /// Each line of `message` becomes its own record. An empty message
    /// appends nothing.
    pub fn push_block(&mut self, message: &str) {
        if message.is_empty() {
            return;
        }
        self.records.push(String::new());
        self.records.extend(message.split('\n').map(str::to_owned));
        self.records.push(String::new());
    }

    /// All records.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(String::as_str)
    }
}
