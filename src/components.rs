//! Analyzer components.
//!
//! A component turns the (filtered) track list plus the values of its options
//! into a [`Report`]. Built-in components live in `builtin`, extra ones can be
//! loaded from shared libraries (`plugin`), and the [`ComponentRegistry`]
//! maps display names to constructors for both.

mod builtin;
mod options;
mod plugin;
mod registry;
mod report;

use thiserror::Error;

use crate::filters::FilterError;
use crate::library::Track;

pub use builtin::{
    ArtistsPlot, MonthlyListens, PeakArtistsPlot, TopArtistsByDuration, TopArtistsByListens,
    TotalTracks, WeeklyColorMesh,
};
pub use options::{DEFAULT_HUE, OptionSpec, OptionValue};
pub use plugin::{MANIFEST_SYMBOL, PluginComponent, PluginManifest, is_plugin_file};
pub use registry::{ComponentFactory, ComponentRegistry};
pub use report::{HeatGrid, LinePlot, Report, Series, hue_color};

/// Display size used when a component does not ask for one (columns, rows).
pub const DEFAULT_SIZE: (u16, u16) = (100, 30);

/// Failure to construct a component.
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("no analyzer named {0:?}")]
    Unknown(String),

    #[error("plugin {name:?} is unusable: {reason}")]
    Plugin { name: String, reason: String },
}

/// Failure while running an analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no tracks to analyze")]
    NoTracks,

    #[error("artist {0:?} has no listens")]
    UnknownArtist(String),

    #[error("option {index} should be {expected}")]
    InvalidOption { index: usize, expected: &'static str },

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("plugin failed: {0}")]
    Plugin(String),
}

/// An analyzer the user can pick.
pub trait Component {
    fn name(&self) -> &str;

    /// Preferred report area in terminal cells (columns, rows).
    fn size(&self) -> (u16, u16) {
        DEFAULT_SIZE
    }

    /// Options shown in the sidebar; their values are passed to `analyze` in
    /// the same order.
    fn options(&self) -> Vec<OptionSpec> {
        Vec::new()
    }

    fn analyze(&self, tracks: &[Track], options: &[OptionValue]) -> Result<Report, AnalysisError>;
}
