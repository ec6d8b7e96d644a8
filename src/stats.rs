//! Aggregations over a sorted track list.
//!
//! Everything here is a pure function of its inputs: calendar bucketing,
//! duration formatting, table layout, smoothing and the artist rankings that
//! the analyzer components are built from.

mod bucket;
mod mesh;
mod rank;
mod series;
mod table;

pub use bucket::{
    hours_minutes_seconds, in_day, in_hour, in_month, pin, start_of_day, start_of_hour,
    start_of_month,
};
pub use mesh::{HOUR_LABELS, HOURS, WEEK_ROWS, WeeklyMesh, hour_column, weekday_row, weekly_mesh};
pub use rank::{
    PEAK_ARTISTS_LIMIT, TOP_ARTISTS_LIMIT, monthly_durations, peak_listens, top_by_duration,
    top_by_listens,
};
pub use series::{DailyListens, listens_per_day, moving_average};
pub use table::{Justify, format_table};
