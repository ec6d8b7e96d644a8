use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use walkdir::WalkDir;

use super::model::{EntryError, HistoryEntry, Track};

static HISTORY_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^StreamingHistory(?:_music_)?[0-9]+\.json$").expect("static regex")
});

/// Why a single history file could not be used.
#[derive(Debug, Error)]
pub enum HistoryFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad endTime {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("msPlayed {value} is out of range")]
    PlayTime { value: i64 },
}

/// Tracks found under a directory plus the names of files that failed.
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Sorted by start time, without duplicates.
    pub tracks: Vec<Track>,
    pub errors: Vec<String>,
}

/// Whether `file_name` looks like a Spotify streaming-history export.
///
/// Matching is case-sensitive: `StreamingHistory0.json`,
/// `StreamingHistory_music_3.json`.
pub fn is_history_file(file_name: &str) -> bool {
    HISTORY_FILE.is_match(file_name)
}

/// Parse every entry of one history file. Any bad entry fails the whole file.
pub fn read_history_file(path: &Path) -> Result<Vec<Track>, HistoryFileError> {
    let raw = fs::read(path)?;
    let entries: Vec<HistoryEntry> = serde_json::from_slice(&raw)?;

    entries
        .into_iter()
        .map(|entry| {
            let value = entry.end_time.clone();
            Track::from_entry(entry).map_err(|err| match err {
                EntryError::EndTime(source) => HistoryFileError::Timestamp { value, source },
                EntryError::PlayTime(value) => HistoryFileError::PlayTime { value },
            })
        })
        .collect()
}

/// Walk `dir` recursively and load every history file in it.
///
/// A file that cannot be read or parsed is skipped and its name recorded in
/// `LoadResult::errors`; the walk always continues.
pub fn load_tracks(dir: &Path) -> LoadResult {
    let mut unique: HashSet<Track> = HashSet::new();
    let mut errors: Vec<String> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if !entry.file_type().is_file() || !is_history_file(name) {
            continue;
        }

        match read_history_file(path) {
            Ok(tracks) => {
                tracing::debug!(file = name, count = tracks.len(), "loaded history file");
                unique.extend(tracks);
            }
            Err(err) => {
                tracing::warn!("error loading tracks file {name:?}: {err}");
                errors.push(name.to_string());
            }
        }
    }

    let mut tracks: Vec<Track> = unique.into_iter().collect();
    tracks.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.cmp(b)));

    tracing::info!(
        dir = %dir.display(),
        tracks = tracks.len(),
        failed = errors.len(),
        "finished loading streaming history"
    );

    LoadResult { tracks, errors }
}
