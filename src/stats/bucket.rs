use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use crate::library::Track;

pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

pub fn start_of_month(dt: NaiveDateTime) -> NaiveDateTime {
    let first = dt.date() - Days::new(u64::from(dt.day0()));
    first.and_time(NaiveTime::MIN)
}

pub fn start_of_hour(dt: NaiveDateTime) -> NaiveDateTime {
    start_of_day(dt) + TimeDelta::hours(i64::from(dt.hour()))
}

/// Assign `track` to a calendar period.
///
/// `truncate` maps a wall-clock time to the start of its period. The track
/// belongs to the period containing its end when at least as much of it was
/// played after that period began as before; otherwise to the period
/// containing its start. Wall-clock times are local to the track's zone.
pub fn pin<F>(track: &Track, truncate: F) -> NaiveDateTime
where
    F: Fn(NaiveDateTime) -> NaiveDateTime,
{
    let start = track.start.naive_local();
    let end = track.end.naive_local();
    let pinned_end = truncate(end);

    if end - pinned_end >= pinned_end - start {
        pinned_end
    } else {
        truncate(start)
    }
}

/// First day of the month the track is counted in.
pub fn in_month(track: &Track) -> NaiveDate {
    pin(track, start_of_month).date()
}

pub fn in_day(track: &Track) -> NaiveDate {
    pin(track, start_of_day).date()
}

/// Start of the hour the track is counted in.
pub fn in_hour(track: &Track) -> NaiveDateTime {
    pin(track, start_of_hour)
}

/// Split a duration into whole hours, minutes and seconds.
///
/// Hours are not wrapped at 24. Fractions of a second are dropped.
pub fn hours_minutes_seconds(duration: TimeDelta) -> (i64, i64, i64) {
    let seconds = duration.num_milliseconds().div_euclid(1000);
    let within_hour = seconds.rem_euclid(3600);
    (
        seconds.div_euclid(3600),
        within_hour / 60,
        within_hour % 60,
    )
}
