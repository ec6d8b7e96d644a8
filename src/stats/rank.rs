use std::collections::HashMap;

use chrono::{NaiveDate, TimeDelta};

use crate::library::Track;

use super::bucket::in_month;
use super::series::DailyListens;

/// Rows shown by the "top artists" reports.
pub const TOP_ARTISTS_LIMIT: usize = 20;
/// Artists plotted by the peak-day report.
pub const PEAK_ARTISTS_LIMIT: usize = 10;

/// Fold tracks into one accumulator per artist, keeping first-seen order so
/// that a stable sort breaks ties by first appearance.
fn fold_by_artist<T, F>(tracks: &[Track], init: T, mut add: F) -> Vec<(String, T)>
where
    T: Clone,
    F: FnMut(&mut T, &Track),
{
    let mut order: Vec<(String, T)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for track in tracks {
        let slot = *index.entry(track.artist.as_str()).or_insert_with(|| {
            order.push((track.artist.clone(), init.clone()));
            order.len() - 1
        });
        add(&mut order[slot].1, track);
    }

    order
}

/// Artists ranked by number of listens, most first.
pub fn top_by_listens(tracks: &[Track], limit: usize) -> Vec<(String, usize)> {
    let mut ranked = fold_by_artist(tracks, 0_usize, |count, _| *count += 1);
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Artists ranked by total listening time, longest first.
pub fn top_by_duration(tracks: &[Track], limit: usize) -> Vec<(String, TimeDelta)> {
    let mut ranked = fold_by_artist(tracks, TimeDelta::zero(), |total, track| {
        *total += track.duration;
    });
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Total listening time per month (see [`in_month`]), newest month first.
pub fn monthly_durations(tracks: &[Track]) -> Vec<(NaiveDate, TimeDelta)> {
    let mut months: HashMap<NaiveDate, TimeDelta> = HashMap::new();
    for track in tracks {
        *months.entry(in_month(track)).or_insert_with(TimeDelta::zero) += track.duration;
    }

    let mut months: Vec<(NaiveDate, TimeDelta)> = months.into_iter().collect();
    months.sort_by(|a, b| b.0.cmp(&a.0));
    months
}

/// Artists ranked by their best single day, highest first.
///
/// `exclude` has its peak forced to zero so that it sinks below every artist
/// with at least one listen.
pub fn peak_listens(daily: &DailyListens, exclude: Option<&str>) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = daily
        .artists
        .iter()
        .map(|artist| {
            let peak = if exclude == Some(artist.as_str()) {
                0
            } else {
                daily.peak(artist)
            };
            (artist.clone(), peak)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
