use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Lookup: `SPOTIFY_ANALYZER_CONFIG_PATH`, then `./config.toml`, then
/// `$XDG_CONFIG_HOME/spotify-analyzer/config.toml` (or `~/.config/...`).
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SPOTIFY_ANALYZER__`)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// Keys that are not listed here are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Directory scanned for additional analyzer components (shared libraries).
    pub component_directory: Option<PathBuf>,
    /// Write diagnostic logs to `log_file`.
    pub enable_logs: bool,
    /// Destination of the diagnostic log when `enable_logs` is set.
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            component_directory: None,
            enable_logs: false,
            log_file: PathBuf::from("logs.txt"),
        }
    }
}
