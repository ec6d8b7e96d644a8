use chrono::{Datelike, Timelike, Weekday};
use chrono_tz::Tz;

use crate::library::Track;

use super::bucket::{in_day, in_hour};

pub const HOURS: usize = 24;

/// Row order of the weekly mesh.
pub const WEEK_ROWS: [Weekday; 7] = [
    Weekday::Sat,
    Weekday::Fri,
    Weekday::Thu,
    Weekday::Wed,
    Weekday::Tue,
    Weekday::Mon,
    Weekday::Sun,
];

/// Column labels of the weekly mesh; column 0 is the hour starting at 1am and
/// the last column is the midnight hour.
pub const HOUR_LABELS: [&str; HOURS] = [
    "1am", "2am", "3am", "4am", "5am", "6am", "7am", "8am", "9am", "10am", "11am", "12pm", "1pm",
    "2pm", "3pm", "4pm", "5pm", "6pm", "7pm", "8pm", "9pm", "10pm", "11pm", "12am",
];

/// Listen counts by row of [`WEEK_ROWS`] and column of [`HOUR_LABELS`].
pub type WeeklyMesh = [[u32; HOURS]; 7];

pub fn weekday_row(day: Weekday) -> usize {
    (5 - i64::from(day.num_days_from_monday())).rem_euclid(7) as usize
}

/// Column of the hour starting at `hour` o'clock: hour `h` lands in column
/// `h - 1`, so midnight wraps to the last column.
pub fn hour_column(hour: u32) -> usize {
    ((hour + HOURS as u32 - 1) % HOURS as u32) as usize
}

/// Count listens per weekday and hour after moving every track into `tz`.
pub fn weekly_mesh(tracks: &[Track], tz: Tz) -> WeeklyMesh {
    let mut mesh: WeeklyMesh = [[0; HOURS]; 7];
    for track in tracks {
        let local = track.to_timezone(tz);
        let row = weekday_row(in_day(&local).weekday());
        let column = hour_column(in_hour(&local).hour());
        mesh[row][column] += 1;
    }
    mesh
}
