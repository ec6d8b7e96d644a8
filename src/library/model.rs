use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format of the `endTime` field in streaming-history exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One entry of a `StreamingHistory*.json` array, as written by Spotify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub end_time: String,
    pub artist_name: String,
    pub track_name: String,
    pub ms_played: i64,
}

/// Why one export entry cannot become a [`Track`].
#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error(transparent)]
    EndTime(#[from] chrono::ParseError),

    /// `msPlayed` does not fit a duration or puts the start out of date range.
    #[error("msPlayed {0} is out of range")]
    PlayTime(i64),
}

/// A single play event.
///
/// `duration` is always `end - start`; it is kept alongside the timestamps
/// because most reports only need the elapsed time. Timestamps carry their
/// zone, and calendar bucketing uses the local time of that zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Track {
    pub artist: String,
    pub title: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub duration: TimeDelta,
}

impl Track {
    /// Build a track from an export entry. `endTime` is interpreted as UTC.
    pub fn from_entry(entry: HistoryEntry) -> Result<Self, EntryError> {
        let naive_end = NaiveDateTime::parse_from_str(&entry.end_time, TIMESTAMP_FORMAT)?;
        let end = chrono_tz::UTC.from_utc_datetime(&naive_end);
        let ms = entry.ms_played;
        let duration = TimeDelta::try_milliseconds(ms).ok_or(EntryError::PlayTime(ms))?;
        let start = end
            .checked_sub_signed(duration)
            .ok_or(EntryError::PlayTime(ms))?;

        Ok(Self {
            artist: entry.artist_name,
            title: entry.track_name,
            start,
            end,
            duration,
        })
    }

    /// The same play event expressed in another time zone.
    pub fn to_timezone(&self, tz: Tz) -> Self {
        Self {
            artist: self.artist.clone(),
            title: self.title.clone(),
            start: self.start.with_timezone(&tz),
            end: self.end.with_timezone(&tz),
            duration: self.duration,
        }
    }

    /// Convert back to the export format (UTC `endTime`), e.g. for plugins.
    pub fn to_entry(&self) -> HistoryEntry {
        HistoryEntry {
            end_time: self.end.naive_utc().format(TIMESTAMP_FORMAT).to_string(),
            artist_name: self.artist.clone(),
            track_name: self.title.clone(),
            ms_played: self.duration.num_milliseconds(),
        }
    }
}
