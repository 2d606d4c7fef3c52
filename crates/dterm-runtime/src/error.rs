//! Error types.
//!
//! [`CommandError`]'s `Display` text is exactly the notice appended to the
//! scrollback, so the dispatcher reports failures with `to_string()` and
//! nothing more.

use std::path::PathBuf;

use dterm_core::layout::SettingError;
use thiserror::Error;

/// A command that could not complete. Never escapes the console.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Plugin {0} not found")]
    PluginNotFound(String),

    #[error("Command {command} not supported for {kind}")]
    Unsupported { command: String, kind: String },

    #[error("Usage: {0}")]
    Usage(String),

    #[error("Failed to parse JSON payload")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("Failed to serialize dashboard")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Setting(#[from] SettingError),

    #[error("Unknown setting {0}")]
    UnknownSetting(String),

    #[error("Invalid settings command")]
    InvalidSettingsCommand,

    #[error("Unknown module type: {0}")]
    UnknownType(String),

    #[error("Plugin {0} not found or invalid dimensions")]
    InvalidDimensions(String),

    #[error("Plugin {0} not found or invalid coordinates")]
    InvalidCoordinates(String),

    #[error("Command {0} failed")]
    Panicked(String),

    #[error(transparent)]
    Widget(#[from] WidgetError),
}

impl CommandError {
    #[must_use]
    pub fn usage(text: impl Into<String>) -> Self {
        Self::Usage(text.into())
    }
}

/// A widget refused a command, an update, or a saved state.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// A user-facing rejection, reported verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("Command {command} not supported for {kind}")]
    UnknownCommand { command: String, kind: String },

    #[error("Command update not supported for {kind}")]
    UpdateUnsupported { kind: String },

    #[error("Invalid {kind} state: {source}")]
    State {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

impl WidgetError {
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// A remote or file load failed. Appended after `Failed to load <url>: `.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Http(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("no resource at {0}")]
    NotFound(String),

    #[error("loading is not available for {0}")]
    Unsupported(String),

    #[error("worker stopped before settling")]
    Disconnected,
}

/// A snapshot document that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot is not a JSON object")]
    NotAnObject,

    #[error("snapshot plugins is not a list")]
    PluginsNotAList,
}

/// Persistence read/write failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
