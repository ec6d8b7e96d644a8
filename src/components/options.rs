use chrono_tz::Tz;

use super::AnalysisError;

/// Hue of the default color map (blue).
pub const DEFAULT_HUE: f64 = 240.0 / 360.0;

/// Describes one configurable input of a component.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionSpec {
    CheckButton {
        text: &'static str,
    },
    Spinbox {
        text: &'static str,
        from: i64,
        to: i64,
        default: i64,
    },
    /// Ordered selection of artists, with a "top N artists" shortcut.
    ArtistChooser,
    /// A single optional artist name.
    ArtistField {
        text: &'static str,
    },
    /// Hue of a single-hue color map.
    ColorMap,
    TimeZone {
        default: Tz,
    },
}

/// Current value of an option, in the order of `Component::options`.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Artists(Vec<String>),
    Artist(Option<String>),
    Hue(f64),
    TimeZone(Tz),
}

impl OptionSpec {
    pub fn default_value(&self) -> OptionValue {
        match self {
            Self::CheckButton { .. } => OptionValue::Bool(false),
            Self::Spinbox {
                from, to, default, ..
            } => OptionValue::Int((*default).clamp(*from, *to)),
            Self::ArtistChooser => OptionValue::Artists(Vec::new()),
            Self::ArtistField { .. } => OptionValue::Artist(None),
            Self::ColorMap => OptionValue::Hue(DEFAULT_HUE),
            Self::TimeZone { default } => OptionValue::TimeZone(*default),
        }
    }
}

fn invalid(index: usize, expected: &'static str) -> AnalysisError {
    AnalysisError::InvalidOption { index, expected }
}

pub(crate) fn artists_at(options: &[OptionValue], index: usize) -> Result<&[String], AnalysisError> {
    match options.get(index) {
        Some(OptionValue::Artists(artists)) => Ok(artists),
        _ => Err(invalid(index, "a list of artists")),
    }
}

pub(crate) fn artist_at(
    options: &[OptionValue],
    index: usize,
) -> Result<Option<&str>, AnalysisError> {
    match options.get(index) {
        Some(OptionValue::Artist(artist)) => Ok(artist.as_deref()),
        None => Ok(None),
        _ => Err(invalid(index, "an artist name")),
    }
}

pub(crate) fn hue_at(options: &[OptionValue], index: usize) -> Result<f64, AnalysisError> {
    match options.get(index) {
        Some(OptionValue::Hue(hue)) => Ok(*hue),
        None => Ok(DEFAULT_HUE),
        _ => Err(invalid(index, "a hue")),
    }
}

pub(crate) fn time_zone_at(
    options: &[OptionValue],
    index: usize,
    default: Tz,
) -> Result<Tz, AnalysisError> {
    match options.get(index) {
        Some(OptionValue::TimeZone(tz)) => Ok(*tz),
        None => Ok(default),
        _ => Err(invalid(index, "a time zone")),
    }
}
