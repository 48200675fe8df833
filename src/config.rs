//! Optional TOML configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};

const APP_DIR: &str = "todo-tui";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
    #[serde(default = "default_true")]
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            submit_label: default_submit_label(),
            mouse: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// One of trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file. Nothing is logged when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

fn default_title() -> String {
    "To-Do List".to_string()
}

fn default_submit_label() -> String {
    "Add".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

const fn default_true() -> bool {
    true
}

/// `~/.config/todo-tui/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load from an explicit path, which must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Load from the default location, falling back to defaults if the
    /// file does not exist.
    pub fn load_default() -> Result<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&path, &content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(AppError::ConfigRead { path, source }),
        }
    }

    fn parse(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn full_file_is_read() {
        let file = write_config(
            r#"
[ui]
title = "Chores"
submit_label = "Go"
mouse = false

[log]
level = "debug"
file = "/tmp/todo.log"
"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.ui.title, "Chores");
        assert_eq!(config.ui.submit_label, "Go");
        assert!(!config.ui.mouse);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.file, Some(PathBuf::from("/tmp/todo.log")));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let file = write_config("[ui]\nmouse = false\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.ui.title, "To-Do List");
        assert_eq!(config.ui.submit_label, "Add");
        assert!(!config.ui.mouse);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = write_config("");
        assert_eq!(Config::load(file.path()).unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let file = write_config("[ui]\ncolour = \"red\"\n[extra]\nx = 1\n");
        assert!(Config::load(file.path()).is_ok());
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let file = write_config("[ui\ntitle = ");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
        assert!(err.to_string().contains("failed to parse config"));
    }
}
