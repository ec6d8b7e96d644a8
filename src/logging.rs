//! File logging, enabled by `enable_logs`.
//!
//! Without it no subscriber is installed and every `tracing` macro is a no-op.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::fmt::time::ChronoLocal;

use crate::config::Settings;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("a global logger is already installed: {0}")]
    Install(String),
}

/// Install the file logger if the settings ask for one.
///
/// Returns whether a logger was installed.
pub fn init(settings: &Settings) -> Result<bool, LoggingError> {
    if !settings.enable_logs {
        return Ok(false);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)
        .map_err(|source| LoggingError::Open {
            path: settings.log_file.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_max_level(tracing::Level::INFO)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_logging_installs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            log_file: dir.path().join("logs.txt"),
            ..Settings::default()
        };
        assert!(!init(&settings).unwrap());
        assert!(!settings.log_file.exists());
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            enable_logs: true,
            log_file: dir.path().join("missing").join("logs.txt"),
            ..Settings::default()
        };
        assert!(matches!(init(&settings), Err(LoggingError::Open { .. })));
    }
}
