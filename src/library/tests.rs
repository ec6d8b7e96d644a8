use super::*;
use chrono::{NaiveDate, TimeDelta};
use std::fs;
use tempfile::tempdir;

fn entry(end: &str, artist: &str, title: &str, ms: i64) -> String {
    format!(
        r#"{{"endTime": "{end}", "artistName": "{artist}", "trackName": "{title}", "msPlayed": {ms}}}"#
    )
}

fn history(entries: &[String]) -> String {
    format!("[{}]", entries.join(",\n"))
}

#[test]
fn history_file_pattern_is_case_sensitive() {
    assert!(is_history_file("StreamingHistory0.json"));
    assert!(is_history_file("StreamingHistory12.json"));
    assert!(is_history_file("StreamingHistory_music_3.json"));
    assert!(!is_history_file("streaminghistory0.json"));
    assert!(!is_history_file("StreamingHistory.json"));
    assert!(!is_history_file("StreamingHistory0.json.bak"));
    assert!(!is_history_file("StreamingHistory_podcast_0.json"));
    assert!(!is_history_file("Playlist1.json"));
}

#[test]
fn track_start_is_derived_from_end_and_ms_played() {
    let track = Track::from_entry(HistoryEntry {
        end_time: "2021-01-01 00:01".into(),
        artist_name: "Artist".into(),
        track_name: "Song".into(),
        ms_played: 90_500,
    })
    .unwrap();

    assert_eq!(track.duration, TimeDelta::milliseconds(90_500));
    assert_eq!(track.end - track.start, track.duration);
    assert_eq!(
        track.start.naive_utc(),
        NaiveDate::from_ymd_opt(2020, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 29, 500)
            .unwrap()
    );
}

#[test]
fn bad_end_time_is_rejected() {
    let result = Track::from_entry(HistoryEntry {
        end_time: "01/01/2021 00:01".into(),
        artist_name: "Artist".into(),
        track_name: "Song".into(),
        ms_played: 1,
    });
    assert!(result.is_err());
}

#[test]
fn to_timezone_keeps_the_instant_and_moves_the_wall_clock() {
    let track = Track::from_entry(HistoryEntry {
        end_time: "2020-07-07 01:03".into(),
        artist_name: "Artist".into(),
        track_name: "Song".into(),
        ms_played: 60_000,
    })
    .unwrap();

    let local = track.to_timezone(chrono_tz::America::Los_Angeles);
    assert_eq!(local, track);
    assert_eq!(local.duration, track.duration);
    assert_eq!(
        local.end.naive_local(),
        NaiveDate::from_ymd_opt(2020, 7, 6)
            .unwrap()
            .and_hms_opt(18, 3, 0)
            .unwrap()
    );
}

#[test]
fn to_entry_round_trips_the_export_format() {
    let original = HistoryEntry {
        end_time: "2020-07-07 01:03".into(),
        artist_name: "Artist".into(),
        track_name: "Song".into(),
        ms_played: 123_456,
    };
    let track = Track::from_entry(original.clone()).unwrap();
    let moved = track.to_timezone(chrono_tz::Asia::Tokyo);
    assert_eq!(moved.to_entry(), original);
}

#[test]
fn load_tracks_sorts_and_deduplicates() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("StreamingHistory0.json"),
        history(&[
            entry("2021-02-01 10:00", "B", "Later", 60_000),
            entry("2021-01-01 10:00", "A", "Earlier", 60_000),
            entry("2021-01-15 10:00", "C", "Middle", 60_000),
        ]),
    )
    .unwrap();

    let result = load_tracks(dir.path());
    assert!(result.errors.is_empty());
    let titles: Vec<&str> = result.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Earlier", "Middle", "Later"]);
    assert!(result.tracks.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn load_tracks_merges_duplicates_across_files_and_subdirectories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("MyData").join("older");
    fs::create_dir_all(&nested).unwrap();

    let shared = entry("2021-01-01 10:00", "A", "Same", 60_000);
    fs::write(
        dir.path().join("StreamingHistory0.json"),
        history(&[shared.clone(), entry("2021-01-02 10:00", "A", "Other", 1_000)]),
    )
    .unwrap();
    fs::write(nested.join("StreamingHistory1.json"), history(&[shared])).unwrap();
    fs::write(dir.path().join("Userdata.json"), "not even json").unwrap();

    let result = load_tracks(dir.path());
    assert!(result.errors.is_empty());
    assert_eq!(result.tracks.len(), 2);
}

#[test]
fn load_tracks_records_malformed_files_and_keeps_going() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("StreamingHistory0.json"),
        history(&[
            entry("2021-01-01 10:00", "A", "One", 60_000),
            entry("2021-01-01 10:05", "A", "Two", 60_000),
        ]),
    )
    .unwrap();
    fs::write(dir.path().join("StreamingHistory1.json"), "[{\"endTime\": ").unwrap();

    let result = load_tracks(dir.path());
    assert_eq!(result.tracks.len(), 2);
    assert_eq!(result.errors, vec!["StreamingHistory1.json".to_string()]);
}

#[test]
fn one_bad_entry_fails_its_whole_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("StreamingHistory0.json"),
        history(&[
            entry("2021-01-01 10:00", "A", "One", 60_000),
            entry("yesterday", "A", "Two", 60_000),
        ]),
    )
    .unwrap();

    let result = load_tracks(dir.path());
    assert!(result.tracks.is_empty());
    assert_eq!(result.errors, vec!["StreamingHistory0.json".to_string()]);

    let err = read_history_file(&dir.path().join("StreamingHistory0.json")).unwrap_err();
    assert!(matches!(err, HistoryFileError::Timestamp { .. }));
}

#[test]
fn out_of_range_play_time_is_rejected() {
    let entry = |ms_played| HistoryEntry {
        end_time: "2021-01-01 00:01".into(),
        artist_name: "Artist".into(),
        track_name: "Song".into(),
        ms_played,
    };
    assert_eq!(
        Track::from_entry(entry(9_000_000_000_000_000_000)),
        Err(EntryError::PlayTime(9_000_000_000_000_000_000))
    );
    assert_eq!(
        Track::from_entry(entry(i64::MIN)),
        Err(EntryError::PlayTime(i64::MIN))
    );
}

#[test]
fn huge_play_time_fails_only_its_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("StreamingHistory0.json"),
        history(&[entry("2021-01-01 10:00", "A", "Forever", 9_000_000_000_000_000_000)]),
    )
    .unwrap();
    fs::write(
        dir.path().join("StreamingHistory1.json"),
        history(&[
            entry("2021-01-01 10:00", "B", "One", 60_000),
            entry("2021-01-01 10:05", "B", "Two", 60_000),
        ]),
    )
    .unwrap();

    let result = load_tracks(dir.path());
    assert_eq!(result.errors, vec!["StreamingHistory0.json".to_string()]);
    let titles: Vec<&str> = result.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two"]);

    let err = read_history_file(&dir.path().join("StreamingHistory0.json")).unwrap_err();
    assert!(matches!(
        err,
        HistoryFileError::PlayTime { value: 9_000_000_000_000_000_000 }
    ));
}

#[test]
fn load_tracks_on_missing_directory_is_empty() {
    let dir = tempdir().unwrap();
    let result = load_tracks(&dir.path().join("missing"));
    assert!(result.tracks.is_empty());
    assert!(result.errors.is_empty());
}
