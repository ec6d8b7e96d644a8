use super::*;
use crate::components::{
    Component, ComponentError, ComponentRegistry, OptionSpec, OptionValue, Report,
};
use crate::library::Track;
use chrono::{NaiveDateTime, TimeDelta, TimeZone, Timelike};
use std::path::Path;

const GOOD_HISTORY: &str = r#"[
    {"endTime": "2021-01-01 10:00", "artistName": "Alpha", "trackName": "One", "msPlayed": 180000},
    {"endTime": "2021-01-02 10:00", "artistName": "Beta", "trackName": "Two", "msPlayed": 240000}
]"#;

fn t(artist: &str, end: &str, minutes: i64) -> Track {
    let end = NaiveDateTime::parse_from_str(end, "%Y-%m-%d %H:%M").unwrap();
    let end = chrono_tz::UTC.from_utc_datetime(&end);
    let duration = TimeDelta::minutes(minutes);
    Track {
        artist: artist.into(),
        title: "song".into(),
        start: end - duration,
        end,
        duration,
    }
}

fn history_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

fn app_on(name: &str) -> App {
    let mut app = App::new(ComponentRegistry::with_builtins());
    let index = app.names.iter().position(|n| n == name).unwrap();
    app.select(index);
    app
}

fn broken_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::with_builtins();
    registry.register(
        "Broken",
        Box::new(|| -> Result<Box<dyn Component>, ComponentError> {
            Err(ComponentError::Plugin {
                name: "Broken".into(),
                reason: "missing manifest entry".into(),
            })
        }),
    );
    registry
}

fn report_text(app: &App) -> &str {
    app.report.as_ref().and_then(Report::as_text).unwrap()
}

#[test]
fn fuzzy_match_simple() {
    let title = "Hello World";
    assert!(fuzzy_match_positions(title, "hw").is_some());
    assert!(fuzzy_match_positions(title, "ello").is_some());
    assert!(fuzzy_match_positions(title, "xyz").is_none());
    assert_eq!(fuzzy_match_positions(title, "HW"), Some(vec![0, 6]));
    assert_eq!(fuzzy_match_positions(title, ""), Some(vec![]));
}

#[test]
fn starts_on_first_component() {
    let app = App::new(ComponentRegistry::with_builtins());
    assert_eq!(app.selected, 0);
    assert_eq!(app.component_name(), Some("Listens per day (7 day average)"));
    assert!(app.popup.is_none());
    assert!(app.report.is_none());
}

#[test]
fn unbuildable_first_component_is_skipped_at_startup() {
    let app = App::new(broken_registry());
    assert_eq!(app.names[0], "Broken");
    assert_eq!(app.selected, 1);
    assert!(app.component().is_some());
    assert_eq!(app.popup.as_ref().map(|p| p.kind), Some(PopupKind::Error));
}

#[test]
fn failed_selection_reverts_to_previous_component() {
    let mut app = App::new(broken_registry());
    app.dismiss_popup();
    let total = app.names.iter().position(|n| n == "Total Tracks").unwrap();
    app.select(total);
    assert!(app.popup.is_none());

    app.select(0);
    assert_eq!(app.selected, total);
    assert_eq!(app.component_name(), Some("Total Tracks"));
    let popup = app.popup.clone().unwrap();
    assert_eq!(popup.kind, PopupKind::Error);
    assert!(popup.message.starts_with("Error creating analyzer"));
    assert!(popup.message.contains("missing manifest entry"));
}

#[test]
fn selection_wraps_around() {
    let mut app = App::new(ComponentRegistry::with_builtins());
    app.select_prev();
    assert_eq!(app.component_name(), Some("Weekly Color Mesh"));
    app.select_next();
    assert_eq!(app.selected, 0);
}

#[test]
fn analyze_without_tracks_warns() {
    let mut app = app_on("Total Tracks");
    app.analyze();
    assert_eq!(app.popup.as_ref().map(|p| p.kind), Some(PopupKind::Warning));
    assert!(app.report.is_none());
}

#[test]
fn load_reports_failed_files_and_analyzes() {
    let dir = history_dir(&[
        ("StreamingHistory0.json", GOOD_HISTORY),
        ("StreamingHistory1.json", "{not json"),
    ]);
    let mut app = app_on("Total Tracks");
    app.load(dir.path());

    assert_eq!(app.tracks().map(<[Track]>::len), Some(2));
    assert_eq!(app.loaded_dir.as_deref(), Some(dir.path()));
    let popup = app.popup.clone().unwrap();
    assert_eq!(popup.kind, PopupKind::Warning);
    assert!(popup.message.starts_with("Error loading tracks files"));
    assert!(popup.message.contains("StreamingHistory1.json"));
    assert_eq!(
        report_text(&app),
        "2 tracks listened to between 2021-01-01 and 2021-01-02"
    );
}

#[test]
fn clean_load_shows_no_popup() {
    let dir = history_dir(&[("StreamingHistory0.json", GOOD_HISTORY)]);
    let mut app = app_on("Top Artists by Listens");
    app.load(dir.path());
    assert!(app.popup.is_none());
    assert_eq!(report_text(&app), "Alpha: 1\nBeta:  1");
}

#[test]
fn analysis_error_keeps_previous_report() {
    let dir = history_dir(&[("StreamingHistory0.json", GOOD_HISTORY)]);
    let mut app = app_on("Total Tracks");
    app.load(dir.path());
    let before = app.report.clone();

    app.filters.start = "yesterday".into();
    app.analyze();

    let popup = app.popup.clone().unwrap();
    assert_eq!(popup.kind, PopupKind::Error);
    assert!(popup.message.starts_with("Error analyzing data"));
    assert!(popup.message.contains("yesterday"));
    assert_eq!(app.report, before);
}

#[test]
fn date_filter_typed_into_sidebar() {
    let dir = history_dir(&[("StreamingHistory0.json", GOOD_HISTORY)]);
    let mut app = app_on("Total Tracks");
    app.load(dir.path());

    // Total Tracks has no options, so the first field is the start bound.
    assert_eq!(app.focused(), Some(Field::Filter(FilterField::Start)));
    app.begin_edit();
    for c in "2021-01-02".chars() {
        app.push_char(c);
    }
    app.commit_edit();
    assert_eq!(app.filters.start, "2021-01-02");

    app.analyze();
    assert_eq!(
        report_text(&app),
        "1 tracks listened to between 2021-01-02 and 2021-01-02"
    );
}

#[test]
fn filters_project_into_time_zone() {
    let filters = Filters {
        time_zone: "Asia/Tokyo".into(),
        ..Filters::default()
    };
    let tracks = filters.apply(&[t("A", "2021-01-01 10:00", 3)]).unwrap();
    assert_eq!(tracks[0].end.hour(), 19);

    let filters = Filters {
        time_zone: "Mars/Olympus".into(),
        ..Filters::default()
    };
    assert!(filters.apply(&[]).is_err());
}

#[test]
fn empty_filters_keep_everything() {
    let tracks = vec![t("A", "2021-01-01 10:00", 3), t("B", "2021-01-02 10:00", 3)];
    assert_eq!(Filters::default().apply(&tracks).unwrap(), tracks);
}

#[test]
fn cancelled_edit_changes_nothing() {
    let mut app = app_on("Total Tracks");
    app.begin_edit();
    app.push_char('x');
    app.cancel_edit();
    assert!(app.editing.is_none());
    assert_eq!(app.filters, Filters::default());
}

#[test]
fn focus_cycles_through_options_and_filters() {
    let mut app = app_on("Weekly Color Mesh");
    assert_eq!(app.fields().len(), 5);
    assert_eq!(app.focused(), Some(Field::Option(0)));
    app.focus_prev();
    assert_eq!(app.focused(), Some(Field::Filter(FilterField::TimeZone)));
    app.focus_next();
    app.focus_next();
    assert_eq!(app.focused(), Some(Field::Option(1)));
}

#[test]
fn hue_adjustment_wraps() {
    let mut app = app_on("Weekly Color Mesh");
    app.options[0] = OptionState::Hue(0.0);
    app.adjust_focused(-1);
    let OptionState::Hue(hue) = app.options[0] else {
        panic!("expected a hue option");
    };
    assert!((hue - 35.0 / 36.0).abs() < 1e-9);
}

#[test]
fn mesh_time_zone_option_is_checked_on_analyze() {
    let dir = history_dir(&[("StreamingHistory0.json", GOOD_HISTORY)]);
    let mut app = app_on("Weekly Color Mesh");
    app.load(dir.path());
    assert!(matches!(app.report, Some(Report::Grid(_))));

    app.options[1] = OptionState::TimeZone("Nowhere/Special".into());
    app.analyze();
    assert_eq!(app.popup.as_ref().map(|p| p.kind), Some(PopupKind::Error));
}

#[test]
fn spinbox_and_checkbox_state() {
    let mut spin = OptionState::from_spec(&OptionSpec::Spinbox {
        text: "Days",
        from: 1,
        to: 3,
        default: 2,
    });
    spin.adjust(5);
    assert_eq!(spin.value().unwrap(), OptionValue::Int(3));
    spin.adjust(-9);
    assert_eq!(spin.value().unwrap(), OptionValue::Int(1));

    let mut check = OptionState::from_spec(&OptionSpec::CheckButton { text: "On" });
    check.toggle();
    assert_eq!(check.value().unwrap(), OptionValue::Bool(true));
    assert_eq!(check.label(), "On");
}

#[test]
fn blank_artist_field_means_none() {
    let mut field = OptionState::from_spec(&OptionSpec::ArtistField { text: "Exclude" });
    assert_eq!(field.value().unwrap(), OptionValue::Artist(None));
    field.commit_text("  Alpha ");
    assert_eq!(field.value().unwrap(), OptionValue::Artist(Some("Alpha".into())));
}

fn chooser() -> ArtistChooser {
    let mut chooser = ArtistChooser::default();
    chooser.set_tracks(&[
        t("Beta", "2021-01-01 10:00", 3),
        t("Alpha", "2021-01-01 11:00", 3),
        t("Alpha", "2021-01-01 12:00", 3),
        t("Gamma Ray", "2021-01-02 12:00", 3),
    ]);
    chooser
}

#[test]
fn chooser_ranks_by_peak_day() {
    let chooser = chooser();
    assert_eq!(chooser.artists, vec!["Alpha", "Beta", "Gamma Ray"]);
    assert_eq!(chooser.ranked, vec!["Alpha", "Beta", "Gamma Ray"]);
    assert_eq!(chooser.top_n, DEFAULT_TOP_ARTISTS);
}

#[test]
fn chooser_adds_each_artist_once() {
    let mut chooser = chooser();
    assert!(chooser.add("Beta"));
    assert!(!chooser.add("Beta"));
    assert!(!chooser.add("Nobody"));

    chooser.top_n = 2;
    chooser.add_top();
    assert_eq!(chooser.chosen, vec!["Beta", "Alpha"]);

    assert_eq!(chooser.remove_last().as_deref(), Some("Alpha"));
    assert_eq!(chooser.chosen, vec!["Beta"]);
}

#[test]
fn chooser_top_n_is_bounded() {
    let mut chooser = chooser();
    chooser.adjust_top_n(100);
    assert_eq!(chooser.top_n, MAX_TOP_ARTISTS);
    chooser.adjust_top_n(-100);
    assert_eq!(chooser.top_n, 0);
    chooser.add_top();
    assert!(chooser.chosen.is_empty());
}

#[test]
fn chooser_search_skips_chosen_artists() {
    let mut chooser = chooser();
    assert_eq!(chooser.candidates("a"), vec!["Alpha", "Beta", "Gamma Ray"]);
    assert_eq!(chooser.candidates("gr"), vec!["Gamma Ray"]);
    chooser.add("Alpha");
    assert_eq!(chooser.candidates("a"), vec!["Beta", "Gamma Ray"]);

    assert_eq!(chooser.complete("gmr").as_deref(), Some("Gamma Ray"));
    assert_eq!(chooser.complete("zzz"), None);
    assert_eq!(chooser.chosen, vec!["Alpha", "Gamma Ray"]);
}

#[test]
fn reloading_clears_chosen_artists() {
    let mut chooser = chooser();
    chooser.add("Alpha");
    chooser.set_tracks(&[t("Delta", "2021-01-01 10:00", 3)]);
    assert!(chooser.chosen.is_empty());
    assert_eq!(chooser.artists, vec!["Delta"]);
}

#[test]
fn artist_search_drives_the_daily_plot() {
    let dir = history_dir(&[("StreamingHistory0.json", GOOD_HISTORY)]);
    let mut app = App::new(ComponentRegistry::with_builtins());
    app.load(dir.path());
    assert_eq!(app.focused(), Some(Field::Option(0)));

    app.begin_edit();
    for c in "bet".chars() {
        app.push_char(c);
    }
    app.commit_edit();
    app.analyze();

    let Some(Report::Lines(plot)) = &app.report else {
        panic!("expected a line plot");
    };
    let labels: Vec<&str> = plot.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Beta"]);

    app.remove_last_artist();
    app.add_top_artists();
    assert_eq!(
        app.option_values().unwrap(),
        vec![OptionValue::Artists(vec!["Alpha".into(), "Beta".into()])]
    );
}

#[test]
fn load_prompt_loads_typed_folder() {
    let dir = history_dir(&[("StreamingHistory0.json", GOOD_HISTORY)]);
    let mut app = app_on("Total Tracks");
    app.begin_load_prompt();
    assert_eq!(
        app.editing.as_ref().map(|e| e.target),
        Some(EditTarget::LoadPath)
    );
    for c in dir.path().display().to_string().chars() {
        app.push_char(c);
    }
    app.commit_edit();
    assert_eq!(app.loaded_dir.as_deref(), Some(dir.path()));
    assert!(app.report.is_some());
}

#[test]
fn selecting_with_tracks_reanalyzes() {
    let dir = history_dir(&[("StreamingHistory0.json", GOOD_HISTORY)]);
    let mut app = app_on("Total Tracks");
    app.load(dir.path());
    app.select_next();
    assert_eq!(app.component_name(), Some("Weekly Color Mesh"));
    assert!(matches!(app.report, Some(Report::Grid(_))));
    assert!(Path::new(app.loaded_dir.as_deref().unwrap()).is_dir());
}

#[test]
fn report_scroll_saturates() {
    let mut app = app_on("Total Tracks");
    app.scroll_report(-3);
    assert_eq!(app.report_scroll, 0);
    app.scroll_report(4);
    assert_eq!(app.report_scroll, 4);
}
