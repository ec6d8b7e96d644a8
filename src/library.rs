//! Streaming-history library: the `Track` record and the directory loader.
//!
//! Tracks are parsed from Spotify's `StreamingHistory*.json` exports,
//! deduplicated and sorted by start time before anything else sees them.

mod model;
mod scan;

pub use model::{EntryError, HistoryEntry, Track, TIMESTAMP_FORMAT};
pub use scan::{HistoryFileError, LoadResult, is_history_file, load_tracks, read_history_file};

#[cfg(test)]
mod tests;
