use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::library::Track;
use crate::stats::{
    self, DailyListens, HOUR_LABELS, Justify, PEAK_ARTISTS_LIMIT, TOP_ARTISTS_LIMIT, WEEK_ROWS,
};

use super::options::{artist_at, artists_at, hue_at, time_zone_at};
use super::report::{HeatGrid, LinePlot, Report, Series};
use super::{AnalysisError, Component, OptionSpec, OptionValue};

/// Days averaged by the per-day plots.
const SMOOTHING_DAYS: usize = 7;
const MESH_TIME_ZONE: Tz = chrono_tz::America::Los_Angeles;

fn table<R: IntoIterator<Item = [String; N]>, const N: usize>(rows: R) -> String {
    stats::format_table(rows, " ", Justify::Left)
}

fn hours_and_minutes(duration: chrono::TimeDelta) -> [String; 2] {
    let (hours, minutes, _) = stats::hours_minutes_seconds(duration);
    [format!("{hours} hours"), format!("{minutes} minutes")]
}

fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Smoothed daily listens of `artists`, one series each, on a date axis.
fn daily_average_plot(daily: &DailyListens, artists: &[String]) -> Result<LinePlot, AnalysisError> {
    let first = daily.days.iter().min().copied();
    let last = daily.days.iter().max().copied();
    let x = |day: NaiveDate| first.map_or(0.0, |f| (day - f).num_days() as f64);

    let series = artists
        .iter()
        .map(|artist| {
            let counts = daily
                .counts_for(artist)
                .ok_or_else(|| AnalysisError::UnknownArtist(artist.clone()))?;
            let values: Vec<f64> = counts.iter().map(|&c| f64::from(c)).collect();
            let averages = stats::moving_average(&values, SMOOTHING_DAYS);
            Ok(Series {
                label: artist.clone(),
                points: daily.days.iter().map(|&d| x(d)).zip(averages).collect(),
            })
        })
        .collect::<Result<Vec<Series>, AnalysisError>>()?;

    let (x_bounds, x_labels) = match (first, last) {
        (Some(first), Some(last)) if last > first => {
            let mid = first + (last - first) / 2;
            (
                [0.0, x(last)],
                vec![first.to_string(), mid.to_string(), last.to_string()],
            )
        }
        (Some(first), _) => ([0.0, 1.0], vec![first.to_string()]),
        _ => ([0.0, 1.0], Vec::new()),
    };

    Ok(LinePlot::new(series, x_bounds, x_labels))
}

#[derive(Debug, Default)]
pub struct TotalTracks;

impl Component for TotalTracks {
    fn name(&self) -> &str {
        "Total Tracks"
    }

    fn size(&self) -> (u16, u16) {
        (80, 5)
    }

    fn analyze(&self, tracks: &[Track], _options: &[OptionValue]) -> Result<Report, AnalysisError> {
        let (Some(first), Some(last)) = (tracks.first(), tracks.last()) else {
            return Err(AnalysisError::NoTracks);
        };
        Ok(Report::Text(format!(
            "{} tracks listened to between {} and {}",
            with_thousands(tracks.len()),
            first.start.date_naive(),
            last.end.date_naive()
        )))
    }
}

#[derive(Debug, Default)]
pub struct TopArtistsByListens;

impl Component for TopArtistsByListens {
    fn name(&self) -> &str {
        "Top Artists by Listens"
    }

    fn size(&self) -> (u16, u16) {
        (80, 24)
    }

    fn analyze(&self, tracks: &[Track], _options: &[OptionValue]) -> Result<Report, AnalysisError> {
        let rows = stats::top_by_listens(tracks, TOP_ARTISTS_LIMIT)
            .into_iter()
            .map(|(artist, count)| [format!("{artist}:"), count.to_string()]);
        Ok(Report::Text(table(rows)))
    }
}

#[derive(Debug, Default)]
pub struct TopArtistsByDuration;

impl Component for TopArtistsByDuration {
    fn name(&self) -> &str {
        "Top Artists by Listen Duration"
    }

    fn size(&self) -> (u16, u16) {
        (80, 24)
    }

    fn analyze(&self, tracks: &[Track], _options: &[OptionValue]) -> Result<Report, AnalysisError> {
        let rows = stats::top_by_duration(tracks, TOP_ARTISTS_LIMIT)
            .into_iter()
            .map(|(artist, duration)| {
                let [hours, minutes] = hours_and_minutes(duration);
                [format!("{artist}:"), hours, minutes]
            });
        Ok(Report::Text(table(rows)))
    }
}

#[derive(Debug, Default)]
pub struct MonthlyListens;

impl Component for MonthlyListens {
    fn name(&self) -> &str {
        "Monthly Listens"
    }

    fn size(&self) -> (u16, u16) {
        (60, 30)
    }

    fn analyze(&self, tracks: &[Track], _options: &[OptionValue]) -> Result<Report, AnalysisError> {
        let rows = stats::monthly_durations(tracks)
            .into_iter()
            .map(|(month, duration)| {
                let [hours, minutes] = hours_and_minutes(duration);
                [month.format("%B %Y:").to_string(), hours, minutes]
            });
        Ok(Report::Text(table(rows)))
    }
}

/// Seven-day average of daily listens for hand-picked artists.
#[derive(Debug, Default)]
pub struct ArtistsPlot;

impl Component for ArtistsPlot {
    fn name(&self) -> &str {
        "Listens per day (7 day average)"
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::ArtistChooser]
    }

    fn analyze(&self, tracks: &[Track], options: &[OptionValue]) -> Result<Report, AnalysisError> {
        let artists = artists_at(options, 0)?;
        let daily = stats::listens_per_day(tracks);
        Ok(Report::Lines(daily_average_plot(&daily, artists)?))
    }
}

/// Seven-day average of the artists with the busiest single days.
#[derive(Debug, Default)]
pub struct PeakArtistsPlot;

impl Component for PeakArtistsPlot {
    fn name(&self) -> &str {
        "Top Artists by Peak Day"
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![OptionSpec::ArtistField { text: "Exclude" }]
    }

    fn analyze(&self, tracks: &[Track], options: &[OptionValue]) -> Result<Report, AnalysisError> {
        let exclude = artist_at(options, 0)?;
        let daily = stats::listens_per_day(tracks);
        let top: Vec<String> = stats::peak_listens(&daily, exclude)
            .into_iter()
            .filter(|(artist, _)| exclude != Some(artist.as_str()))
            .take(PEAK_ARTISTS_LIMIT)
            .map(|(artist, _)| artist)
            .collect();
        Ok(Report::Lines(daily_average_plot(&daily, &top)?))
    }
}

/// Listens per weekday and hour, in a fixed time zone.
#[derive(Debug, Default)]
pub struct WeeklyColorMesh;

impl Component for WeeklyColorMesh {
    fn name(&self) -> &str {
        "Weekly Color Mesh"
    }

    fn size(&self) -> (u16, u16) {
        (110, 12)
    }

    fn options(&self) -> Vec<OptionSpec> {
        vec![
            OptionSpec::ColorMap,
            OptionSpec::TimeZone {
                default: MESH_TIME_ZONE,
            },
        ]
    }

    fn analyze(&self, tracks: &[Track], options: &[OptionValue]) -> Result<Report, AnalysisError> {
        let hue = hue_at(options, 0)?;
        let tz = time_zone_at(options, 1, MESH_TIME_ZONE)?;
        let mesh = stats::weekly_mesh(tracks, tz);

        Ok(Report::Grid(HeatGrid {
            values: mesh.iter().map(|row| row.to_vec()).collect(),
            row_labels: WEEK_ROWS
                .iter()
                .map(|day| weekday_name(*day).to_string())
                .collect(),
            column_labels: HOUR_LABELS.iter().map(|l| l.to_string()).collect(),
            hue,
        }))
    }
}

fn weekday_name(day: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match day {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}
