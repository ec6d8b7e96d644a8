//! Editable state behind each component option shown in the sidebar.

use chrono_tz::Tz;

use crate::components::{AnalysisError, OptionSpec, OptionValue};
use crate::filters::parse_time_zone;
use crate::library::Track;
use crate::stats;

/// Largest "top N artists" shortcut.
pub const MAX_TOP_ARTISTS: i64 = 20;
pub const DEFAULT_TOP_ARTISTS: i64 = 10;
/// Hue change per adjustment step.
pub const HUE_STEP: f64 = 1.0 / 36.0;

/// Fuzzy/subsequence match: return the character positions in `text` that
/// match `query` (ASCII case-insensitive), or `None` if not matched.
pub fn fuzzy_match_positions(text: &str, query: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }

    let mut positions: Vec<usize> = Vec::new();
    let mut text_iter = text.chars().enumerate();

    for qc in query.chars() {
        let qc_low = qc.to_ascii_lowercase();
        loop {
            match text_iter.next() {
                Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                    positions.push(ti);
                    break;
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }

    Some(positions)
}

/// Ordered artist selection with search and a "top N" shortcut.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistChooser {
    /// Every artist in the loaded tracks, alphabetical.
    pub artists: Vec<String>,
    /// Artists ranked by their busiest day.
    pub ranked: Vec<String>,
    pub chosen: Vec<String>,
    pub top_n: i64,
}

impl Default for ArtistChooser {
    fn default() -> Self {
        Self {
            artists: Vec::new(),
            ranked: Vec::new(),
            chosen: Vec::new(),
            top_n: DEFAULT_TOP_ARTISTS,
        }
    }
}

impl ArtistChooser {
    /// Rebuild the artist universe from `tracks`; clears the selection.
    pub fn set_tracks(&mut self, tracks: &[Track]) {
        let daily = stats::listens_per_day(tracks);
        self.ranked = stats::peak_listens(&daily, None)
            .into_iter()
            .map(|(artist, _)| artist)
            .collect();
        let mut artists = daily.artists;
        artists.sort();
        self.artists = artists;
        self.chosen.clear();
    }

    /// Add `artist` if it is known and not already chosen.
    pub fn add(&mut self, artist: &str) -> bool {
        if self.chosen.iter().any(|a| a == artist) || !self.artists.iter().any(|a| a == artist) {
            return false;
        }
        self.chosen.push(artist.to_string());
        true
    }

    pub fn add_top(&mut self) {
        let n = usize::try_from(self.top_n).unwrap_or(0);
        let top: Vec<String> = self.ranked.iter().take(n).cloned().collect();
        for artist in top {
            self.add(&artist);
        }
    }

    pub fn remove_last(&mut self) -> Option<String> {
        self.chosen.pop()
    }

    pub fn adjust_top_n(&mut self, delta: i64) {
        self.top_n = (self.top_n + delta).clamp(0, MAX_TOP_ARTISTS);
    }

    /// Unchosen artists matching `query`, tightest match first.
    pub fn candidates(&self, query: &str) -> Vec<&str> {
        let mut scored: Vec<(usize, &str)> = self
            .artists
            .iter()
            .filter(|artist| !self.chosen.contains(artist))
            .filter_map(|artist| {
                let positions = fuzzy_match_positions(artist, query)?;
                let span = match (positions.first(), positions.last()) {
                    (Some(first), Some(last)) => last - first,
                    _ => 0,
                };
                Some((span, artist.as_str()))
            })
            .collect();
        scored.sort_by_key(|(span, _)| *span);
        scored.into_iter().map(|(_, artist)| artist).collect()
    }

    /// Add the best candidate for `query`. An exact name always wins.
    pub fn complete(&mut self, query: &str) -> Option<String> {
        let query = query.trim();
        let best = if self.artists.iter().any(|a| a == query) {
            Some(query.to_string())
        } else {
            self.candidates(query).first().map(|a| a.to_string())
        }?;
        self.add(&best).then_some(best)
    }
}

/// Current state of one option, mirroring its [`OptionSpec`].
#[derive(Debug, Clone, PartialEq)]
pub enum OptionState {
    Check {
        text: &'static str,
        value: bool,
    },
    Spin {
        text: &'static str,
        from: i64,
        to: i64,
        value: i64,
    },
    Artists(ArtistChooser),
    Artist {
        text: &'static str,
        value: String,
    },
    Hue(f64),
    /// Typed zone name; checked when the analysis runs.
    TimeZone(String),
}

impl OptionState {
    pub fn from_spec(spec: &OptionSpec) -> Self {
        match spec {
            OptionSpec::CheckButton { text } => Self::Check {
                text: *text,
                value: false,
            },
            OptionSpec::Spinbox {
                text,
                from,
                to,
                default,
            } => Self::Spin {
                text: *text,
                from: *from,
                to: *to,
                value: (*default).clamp(*from, *to),
            },
            OptionSpec::ArtistChooser => Self::Artists(ArtistChooser::default()),
            OptionSpec::ArtistField { text } => Self::Artist {
                text: *text,
                value: String::new(),
            },
            OptionSpec::ColorMap => Self::Hue(crate::components::DEFAULT_HUE),
            OptionSpec::TimeZone { default } => Self::TimeZone(default.name().to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Check { text, .. } | Self::Spin { text, .. } | Self::Artist { text, .. } => *text,
            Self::Artists(_) => "Artists",
            Self::Hue(_) => "Color map hue",
            Self::TimeZone(_) => "Time zone",
        }
    }

    /// Whether the option is edited by typing.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Artists(_) | Self::Artist { .. } | Self::TimeZone(_)
        )
    }

    /// Text shown when editing starts.
    pub fn edit_text(&self) -> String {
        match self {
            Self::Artist { value, .. } => value.clone(),
            Self::TimeZone(name) => name.clone(),
            _ => String::new(),
        }
    }

    /// Store an edited text value.
    pub fn commit_text(&mut self, text: &str) {
        match self {
            Self::Artist { value, .. } => *value = text.trim().to_string(),
            Self::TimeZone(name) => *name = text.trim().to_string(),
            Self::Artists(chooser) => {
                chooser.complete(text);
            }
            _ => {}
        }
    }

    pub fn toggle(&mut self) {
        if let Self::Check { value, .. } = self {
            *value = !*value;
        }
    }

    pub fn adjust(&mut self, delta: i64) {
        match self {
            Self::Spin {
                from, to, value, ..
            } => *value = (*value + delta).clamp(*from, *to),
            Self::Hue(hue) => *hue = (*hue + delta as f64 * HUE_STEP).rem_euclid(1.0),
            Self::Artists(chooser) => chooser.adjust_top_n(delta),
            _ => {}
        }
    }

    pub fn set_tracks(&mut self, tracks: &[Track]) {
        if let Self::Artists(chooser) = self {
            chooser.set_tracks(tracks);
        }
    }

    /// The value handed to the component.
    pub fn value(&self) -> Result<OptionValue, AnalysisError> {
        Ok(match self {
            Self::Check { value, .. } => OptionValue::Bool(*value),
            Self::Spin { value, .. } => OptionValue::Int(*value),
            Self::Artists(chooser) => OptionValue::Artists(chooser.chosen.clone()),
            Self::Artist { value, .. } => {
                let value = value.trim();
                OptionValue::Artist((!value.is_empty()).then(|| value.to_string()))
            }
            Self::Hue(hue) => OptionValue::Hue(*hue),
            Self::TimeZone(name) => OptionValue::TimeZone(parse_time_zone(name)?),
        })
    }

    /// Short rendering of the current value for the sidebar.
    pub fn summary(&self) -> String {
        match self {
            Self::Check { value, .. } => (if *value { "[x]" } else { "[ ]" }).to_string(),
            Self::Spin { value, .. } => value.to_string(),
            Self::Artists(chooser) => {
                format!("top {} | {} chosen", chooser.top_n, chooser.chosen.len())
            }
            Self::Artist { value, .. } if value.is_empty() => "-".to_string(),
            Self::Artist { value, .. } => value.clone(),
            Self::Hue(hue) => format!("{:.0}°", hue * 360.0),
            Self::TimeZone(name) => name.clone(),
        }
    }
}

/// Zone parse used for display hints; `None` when the name is unknown.
pub fn known_zone(name: &str) -> Option<Tz> {
    parse_time_zone(name).ok()
}
