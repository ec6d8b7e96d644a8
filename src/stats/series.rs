use std::collections::HashMap;

use chrono::NaiveDate;

use crate::library::Track;

use super::bucket::in_day;

/// Per-artist listen counts for every day that has at least one listen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyListens {
    /// Days in the order they were first seen in the track list.
    pub days: Vec<NaiveDate>,
    /// Artists in the order they were first seen.
    pub artists: Vec<String>,
    /// One count per entry of `days` for every artist.
    pub counts: HashMap<String, Vec<u32>>,
}

impl DailyListens {
    pub fn counts_for(&self, artist: &str) -> Option<&[u32]> {
        self.counts.get(artist).map(Vec::as_slice)
    }

    /// Highest single-day count of `artist`.
    pub fn peak(&self, artist: &str) -> u32 {
        self.counts_for(artist)
            .and_then(|counts| counts.iter().copied().max())
            .unwrap_or(0)
    }
}

/// Bucket tracks by day (see [`in_day`]) and count listens per artist per day.
pub fn listens_per_day(tracks: &[Track]) -> DailyListens {
    let mut days: Vec<NaiveDate> = Vec::new();
    let mut day_index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut track_days: Vec<usize> = Vec::with_capacity(tracks.len());

    for track in tracks {
        let day = in_day(track);
        let index = *day_index.entry(day).or_insert_with(|| {
            days.push(day);
            days.len() - 1
        });
        track_days.push(index);
    }

    let mut artists: Vec<String> = Vec::new();
    let mut counts: HashMap<String, Vec<u32>> = HashMap::new();
    for (track, &index) in tracks.iter().zip(&track_days) {
        let per_day = counts.entry(track.artist.clone()).or_insert_with(|| {
            artists.push(track.artist.clone());
            vec![0; days.len()]
        });
        per_day[index] += 1;
    }

    DailyListens {
        days,
        artists,
        counts,
    }
}

/// Unweighted moving average over a window of `distance` values.
///
/// The window covers offsets `-distance/2 + 1 ..= distance/2` (floor division,
/// so even windows lean forward). An index that falls outside the slice is
/// mirrored to the other side of the centre (`i - offset`); if that is still
/// out of range it is clamped. The result has the same length as `values`.
pub fn moving_average(values: &[f64], distance: usize) -> Vec<f64> {
    if distance == 0 || values.is_empty() {
        return values.to_vec();
    }

    let len = values.len() as i64;
    let width = distance as i64;
    let first = (-width).div_euclid(2) + 1;
    let last = width.div_euclid(2);

    (0..len)
        .map(|i| {
            let mut total = 0.0;
            for offset in first..=last {
                let mut index = i + offset;
                if index < 0 || index >= len {
                    index = i - offset;
                }
                total += values[index.clamp(0, len - 1) as usize];
            }
            total / distance as f64
        })
        .collect()
}
