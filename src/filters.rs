//! Filters applied to the loaded tracks before they reach a component.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use thiserror::Error;

use crate::library::{TIMESTAMP_FORMAT, Track};

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid date {0:?} (expected YYYY-MM-DD or YYYY-MM-DD HH:MM)")]
    InvalidDate(String),

    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),
}

/// Parse a date-range bound. A bare date means midnight of that day.
pub fn parse_bound(text: &str) -> Result<NaiveDateTime, FilterError> {
    let text = text.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT) {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| FilterError::InvalidDate(text.to_string()))
}

pub fn parse_time_zone(text: &str) -> Result<Tz, FilterError> {
    let text = text.trim();
    text.parse::<Tz>()
        .map_err(|_| FilterError::UnknownTimeZone(text.to_string()))
}

/// Keeps tracks that started at or after `start` and ended at or before `end`,
/// compared on the tracks' local wall clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRangeFilter {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRangeFilter {
    /// Build from the two text fields; blank fields are open bounds.
    pub fn from_text(start: &str, end: &str) -> Result<Self, FilterError> {
        let bound = |text: &str| {
            if text.trim().is_empty() {
                Ok(None)
            } else {
                parse_bound(text).map(Some)
            }
        };
        Ok(Self {
            start: bound(start)?,
            end: bound(end)?,
        })
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn apply(&self, tracks: &[Track]) -> Vec<Track> {
        tracks
            .iter()
            .filter(|track| {
                self.start
                    .is_none_or(|start| start <= track.start.naive_local())
                    && self.end.is_none_or(|end| end >= track.end.naive_local())
            })
            .cloned()
            .collect()
    }
}

/// Re-projects every track into one time zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeZoneFilter {
    pub tz: Tz,
}

impl TimeZoneFilter {
    pub fn apply(&self, tracks: &[Track]) -> Vec<Track> {
        tracks.iter().map(|track| track.to_timezone(self.tz)).collect()
    }
}
