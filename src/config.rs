//! Run configuration.
//!
//! [`SplitConfig`] is what the pipeline consumes. [`FileConfig`] is the
//! optional TOML defaults file; command-line values override it, and it
//! overrides the built-in defaults.
//!
//! ```toml
//! task_prefix = "AUTH"
//! initial_state = "in_progress"
//! tasklist = "docs/TASKLIST.md"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{IntoSplitError, Result};
use crate::task::{sanitize_prefix, TaskState, DEFAULT_PREFIX};

/// File name of the index document when no path is configured.
pub const DEFAULT_TASKLIST_NAME: &str = "TASKLIST.md";

/// Configuration for one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Directory that receives the task documents.
    pub out_dir: PathBuf,
    /// Explicit index path; defaults to `<out_dir>/TASKLIST.md`.
    pub tasklist: Option<PathBuf>,
    /// Raw task id prefix, sanitized on use.
    pub task_prefix: String,
    /// State assigned to every generated task.
    pub initial_state: TaskState,
}

impl SplitConfig {
    /// Create a configuration with default prefix, state and index path.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            tasklist: None,
            task_prefix: DEFAULT_PREFIX.to_string(),
            initial_state: TaskState::default(),
        }
    }

    /// Set an explicit index path.
    #[must_use]
    pub fn with_tasklist(mut self, tasklist: impl Into<PathBuf>) -> Self {
        self.tasklist = Some(tasklist.into());
        self
    }

    /// Set the task id prefix.
    #[must_use]
    pub fn with_task_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.task_prefix = prefix.into();
        self
    }

    /// Set the initial state of generated tasks.
    #[must_use]
    pub fn with_initial_state(mut self, state: TaskState) -> Self {
        self.initial_state = state;
        self
    }

    /// Combine command-line overrides, file defaults and built-in defaults,
    /// in that order of precedence.
    #[must_use]
    pub fn resolve(
        out_dir: impl Into<PathBuf>,
        overrides: ConfigOverrides,
        file: &FileConfig,
    ) -> Self {
        let mut config = Self::new(out_dir);
        if let Some(tasklist) = overrides.tasklist.or_else(|| file.tasklist.clone()) {
            config = config.with_tasklist(tasklist);
        }
        if let Some(prefix) = overrides
            .task_prefix
            .or_else(|| file.task_prefix.clone())
        {
            config = config.with_task_prefix(prefix);
        }
        if let Some(state) = overrides.initial_state.or(file.initial_state) {
            config = config.with_initial_state(state);
        }
        config
    }

    /// Index path, falling back to `<out_dir>/TASKLIST.md`.
    #[must_use]
    pub fn tasklist_path(&self) -> PathBuf {
        self.tasklist
            .clone()
            .unwrap_or_else(|| self.out_dir.join(DEFAULT_TASKLIST_NAME))
    }

    /// Sanitized, upper-cased prefix.
    #[must_use]
    pub fn prefix(&self) -> String {
        sanitize_prefix(&self.task_prefix)
    }
}

/// Values given explicitly on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Index path.
    pub tasklist: Option<PathBuf>,
    /// Task id prefix.
    pub task_prefix: Option<String>,
    /// Initial state.
    pub initial_state: Option<TaskState>,
}

/// Optional defaults loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default task id prefix.
    pub task_prefix: Option<String>,
    /// Default initial state.
    pub initial_state: Option<TaskState>,
    /// Default index path; relative paths resolve against the file's directory.
    pub tasklist: Option<PathBuf>,
}

impl FileConfig {
    /// Parse a config file from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Load and parse a config file.
    ///
    /// A relative `tasklist` is resolved against the file's parent directory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SplitError::Config`] when the file cannot be read,
    /// is not valid TOML, contains unknown keys or names an unknown state.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))
            .and_then(|content| Self::from_toml(&content))
            .into_split_config_at(path)?;

        if let (Some(tasklist), Some(dir)) = (config.tasklist.as_ref(), path.parent()) {
            if tasklist.is_relative() {
                config.tasklist = Some(dir.join(tasklist));
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SplitError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SplitConfig::new("/out");
        assert_eq!(config.prefix(), "TASK");
        assert_eq!(config.initial_state, TaskState::Open);
        assert_eq!(config.tasklist_path(), PathBuf::from("/out/TASKLIST.md"));
    }

    #[test]
    fn test_builder() {
        let config = SplitConfig::new("/out")
            .with_tasklist("/docs/INDEX.md")
            .with_task_prefix("auth api")
            .with_initial_state(TaskState::Done);
        assert_eq!(config.tasklist_path(), PathBuf::from("/docs/INDEX.md"));
        assert_eq!(config.prefix(), "AUTHAPI");
        assert_eq!(config.initial_state, TaskState::Done);
    }

    #[test]
    fn test_resolve_precedence() {
        let file = FileConfig {
            task_prefix: Some("file".to_string()),
            initial_state: Some(TaskState::InProgress),
            tasklist: Some(PathBuf::from("/file/INDEX.md")),
        };
        let overrides = ConfigOverrides {
            task_prefix: Some("cli".to_string()),
            ..ConfigOverrides::default()
        };
        let config = SplitConfig::resolve("/out", overrides, &file);
        assert_eq!(config.prefix(), "CLI");
        assert_eq!(config.initial_state, TaskState::InProgress);
        assert_eq!(config.tasklist_path(), PathBuf::from("/file/INDEX.md"));
    }

    #[test]
    fn test_resolve_without_file() {
        let config = SplitConfig::resolve(
            "/out",
            ConfigOverrides::default(),
            &FileConfig::default(),
        );
        assert_eq!(config, SplitConfig::new("/out"));
    }

    #[test]
    fn test_file_config_from_toml() {
        let config = FileConfig::from_toml(
            "task_prefix = \"auth\"\ninitial_state = \"ready4review\"\n",
        )
        .unwrap();
        assert_eq!(config.task_prefix.as_deref(), Some("auth"));
        assert_eq!(config.initial_state, Some(TaskState::ReadyForReview));
        assert!(config.tasklist.is_none());
    }

    #[test]
    fn test_file_config_rejects_unknown_state() {
        assert!(FileConfig::from_toml("initial_state = \"blocked\"\n").is_err());
    }

    #[test]
    fn test_file_config_rejects_unknown_keys() {
        assert!(FileConfig::from_toml("out_dir = \"x\"\n").is_err());
    }

    #[test]
    fn test_load_resolves_relative_tasklist() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prd-split.toml");
        std::fs::write(&path, "tasklist = \"docs/INDEX.md\"\n").unwrap();

        let config = FileConfig::load(&path).unwrap();
        assert_eq!(config.tasklist, Some(temp.path().join("docs/INDEX.md")));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.toml");
        let err = FileConfig::load(&path).unwrap_err();
        assert!(matches!(err, SplitError::Config { path: Some(_), .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
