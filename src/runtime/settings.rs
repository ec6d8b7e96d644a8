use std::path::Path;

use crate::config::{self, resolve_config_path};

/// Load settings, falling back to defaults.
///
/// Config problems never stop the app; they come back as warnings for the
/// caller to report.
pub fn load_settings() -> (config::Settings, Vec<String>) {
    let (settings, mut warnings) = match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                (
                    config::Settings::default(),
                    vec![format!("invalid config, using defaults: {msg}")],
                )
            } else {
                (s, Vec::new())
            }
        }
        Err(e) => (
            config::Settings::default(),
            vec![format!("failed to load config, using defaults: {e}")],
        ),
    };
    warnings.extend(missing_config_warning(resolve_config_path().as_deref()));
    (settings, warnings)
}

/// Warning for a resolved config path that has no file behind it.
fn missing_config_warning(path: Option<&Path>) -> Option<String> {
    path.filter(|p| !p.is_file())
        .map(|p| format!("no config file at {}, using defaults", p.display()))
}
