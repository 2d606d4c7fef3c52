//! Console configuration.
//!
//! Loaded from TOML or JSON at start-up; every section and field has a
//! default, so an empty document is a valid configuration.
//!
//! ```toml
//! [terminal]
//! caret_blink_ms = 500
//!
//! [layout]
//! grid_size = 25
//! compact = true
//!
//! [persistence]
//! path = "dashboard.json"
//! autosave_ms = 1000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use dterm_core::layout::{GRID_SIZE_DEFAULT, GRID_SIZE_MAX, GRID_SIZE_MIN, LayoutState};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub terminal: TerminalConfig,
    pub layout: LayoutConfig,
    pub persistence: PersistenceConfig,
    pub loader: LoaderConfig,
    pub widgets: WidgetsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Caret blink half-period. Default: 500.
    pub caret_blink_ms: u64,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { caret_blink_ms: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Snap grid in pixels (10-500). Default: 50.
    pub grid_size: u32,
    pub compact: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE_DEFAULT,
            compact: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    /// State file. `None` keeps state in memory only.
    pub path: Option<PathBuf>,
    /// Minimum time between autosave checks. Default: 1000.
    pub autosave_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: None,
            autosave_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Request timeout for remote loads. Default: 10.
    pub timeout_secs: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetsConfig {
    /// Seed a task list and a clock when no saved state exists.
    pub seed_defaults: bool,
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
        }
    }
}

impl ConsoleConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load by extension: `.json` is JSON, anything else TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
            let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
            Self::from_json_str(&content)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Range problems, one message each. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(GRID_SIZE_MIN..=GRID_SIZE_MAX).contains(&self.layout.grid_size) {
            errors.push(format!(
                "layout.grid_size must be in {GRID_SIZE_MIN}..={GRID_SIZE_MAX}, got {}",
                self.layout.grid_size
            ));
        }
        if self.terminal.caret_blink_ms == 0 {
            errors.push("terminal.caret_blink_ms must be > 0".into());
        }
        if self.persistence.autosave_ms == 0 {
            errors.push("persistence.autosave_ms must be > 0".into());
        }
        if self.loader.timeout_secs == 0 {
            errors.push("loader.timeout_secs must be > 0".into());
        }

        errors
    }

    /// `self` if [`Self::validate`] finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            tracing::warn!(target: "dterm.config", count = errors.len(), "config rejected");
            Err(ConfigError::Validation(errors))
        }
    }

    /// Initial layout settings. Falls back to the default grid when the
    /// configured one is out of range.
    #[must_use]
    pub fn layout_state(&self) -> LayoutState {
        LayoutState::new(self.layout.grid_size, self.layout.compact).unwrap_or_else(|_| {
            let mut layout = LayoutState::default();
            layout.set_compact(self.layout.compact);
            layout
        })
    }

    #[must_use]
    pub fn caret_blink(&self) -> Duration {
        Duration::from_millis(self.terminal.caret_blink_ms)
    }

    #[must_use]
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.persistence.autosave_ms)
    }

    #[must_use]
    pub fn loader_timeout(&self) -> Duration {
        Duration::from_secs(self.loader.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_documents_give_defaults() {
        assert_eq!(ConsoleConfig::from_toml_str("").unwrap(), ConsoleConfig::default());
        assert_eq!(ConsoleConfig::from_json_str("{}").unwrap(), ConsoleConfig::default());
        assert!(ConsoleConfig::default().validate().is_empty());
        assert!(ConsoleConfig::default().widgets.seed_defaults);
    }

    #[test]
    fn partial_override_preserves_defaults() {
        let config = ConsoleConfig::from_toml_str(
            "[layout]\ngrid_size = 25\n\n[persistence]\npath = \"state.json\"\n",
        )
        .unwrap();
        assert_eq!(config.layout.grid_size, 25);
        assert!(!config.layout.compact);
        assert_eq!(config.persistence.path, Some(PathBuf::from("state.json")));
        assert_eq!(config.persistence.autosave_ms, 1000);
        assert_eq!(config.caret_blink(), Duration::from_millis(500));
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let config = ConsoleConfig::from_json_str(
            r#"{"layout": {"grid_size": 5}, "loader": {"timeout_secs": 0}}"#,
        )
        .unwrap();
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("layout.grid_size"));
        assert!(matches!(config.clone().validated(), Err(ConfigError::Validation(e)) if e.len() == 2));
        assert_eq!(config.layout_state().grid_size(), GRID_SIZE_DEFAULT);
    }

    #[test]
    fn bad_syntax_is_reported_by_format() {
        assert!(matches!(ConsoleConfig::from_toml_str("[layout"), Err(ConfigError::Toml(_))));
        assert!(matches!(ConsoleConfig::from_json_str("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn from_file_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("c.JSON");
        std::fs::write(&json, r#"{"layout": {"compact": true}}"#).unwrap();
        assert!(ConsoleConfig::from_file(&json).unwrap().layout.compact);
        let toml = dir.path().join("c.toml");
        std::fs::write(&toml, "[widgets]\nseed_defaults = false\n").unwrap();
        assert!(!ConsoleConfig::from_file(&toml).unwrap().widgets.seed_defaults);
        assert!(matches!(
            ConsoleConfig::from_file(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
