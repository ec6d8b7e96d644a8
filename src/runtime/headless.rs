//! Non-interactive entry points: list components, print a text report.

use std::error::Error;
use std::path::Path;

use thiserror::Error;

use crate::components::{
    AnalysisError, ComponentError, ComponentRegistry, OptionSpec, OptionValue, Report,
};
use crate::library::load_tracks;

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error("error analyzing data: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("{0:?} draws a chart; only text reports can be printed")]
    NotText(String),
}

/// A printed report plus the history files that could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct TextReport {
    pub text: String,
    pub failed_files: Vec<String>,
}

/// Run `name` with default options over the history in `dir`.
pub fn text_report(
    registry: &ComponentRegistry,
    name: &str,
    dir: &Path,
) -> Result<TextReport, HeadlessError> {
    let component = registry.create(name)?;
    let loaded = load_tracks(dir);
    let options: Vec<OptionValue> = component
        .options()
        .iter()
        .map(OptionSpec::default_value)
        .collect();

    match component.analyze(&loaded.tracks, &options)? {
        Report::Text(text) => Ok(TextReport {
            text,
            failed_files: loaded.errors,
        }),
        Report::Lines(_) | Report::Grid(_) => Err(HeadlessError::NotText(name.to_string())),
    }
}

pub fn list_components() -> Result<(), Box<dyn Error>> {
    let (registry, _) = super::start();
    for name in registry.names() {
        println!("{name}");
    }
    Ok(())
}

pub fn print_report(name: &str, dir: &Path) -> Result<(), Box<dyn Error>> {
    let (registry, plugin_errors) = super::start();
    for file in plugin_errors {
        eprintln!("spotify-analyzer: could not load component library {file}");
    }

    let report = text_report(&registry, name, dir)?;
    if !report.failed_files.is_empty() {
        eprintln!(
            "spotify-analyzer: error loading tracks files: {:?}",
            report.failed_files
        );
    }
    println!("{}", report.text);
    Ok(())
}
