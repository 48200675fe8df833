//! File-backed tracing. The terminal belongs to the UI, so events never go
//! to stdout or stderr.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing::Level;

use crate::config::LogConfig;
use crate::error::{AppError, Result};

pub fn parse_level(level: &str) -> Result<Level> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|_| AppError::logging(format!("unknown log level {level:?}")))
}

/// Install the global subscriber. Returns `false` when no log file is
/// configured and events are discarded.
pub fn init(config: &LogConfig) -> Result<bool> {
    let level = parse_level(&config.level)?;
    let Some(path) = config.file.as_deref() else {
        return Ok(false);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::logging(format!("{}: {e}", parent.display())))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::logging(format!("{}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| AppError::logging(e.to_string()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), Level::WARN);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = parse_level("loud").unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn no_file_means_no_subscriber() {
        assert!(!init(&LogConfig::default()).unwrap());
    }

    #[test]
    fn bad_level_is_rejected_without_a_file() {
        let config = LogConfig {
            level: "loud".to_string(),
            file: None,
        };
        assert!(matches!(init(&config), Err(AppError::Logging(_))));
    }
}
