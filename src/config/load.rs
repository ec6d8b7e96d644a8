use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "spotify-analyzer";
const CONFIG_FILE: &str = "config.toml";

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `SPOTIFY_ANALYZER__`)
/// over an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SPOTIFY_ANALYZER")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(dir) = &self.component_directory {
            if !dir.is_dir() {
                return Err(format!(
                    "component_directory {} is not a directory",
                    dir.display()
                ));
            }
        }
        if self.enable_logs && self.log_file.as_os_str().is_empty() {
            return Err("log_file must not be empty when enable_logs is set".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `SPOTIFY_ANALYZER_CONFIG_PATH`, the working
/// directory or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SPOTIFY_ANALYZER_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }

    let local = PathBuf::from(CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    default_config_path()
}

/// Compute the default config path under
/// `$XDG_CONFIG_HOME/spotify-analyzer/config.toml` or
/// `~/.config/spotify-analyzer/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join(APP_DIR).join(CONFIG_FILE))
}
