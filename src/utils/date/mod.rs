// Date utility functions
// Local wall-clock helpers shared by the time axis and overlays

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::settings::TimeFormat;

/// Local midnight of `day` as a wall-clock value.
pub fn day_start(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Resolve a local wall-clock time to an instant.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant; times inside a
/// DST gap do not exist and yield `None`.
pub fn local_instant(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    naive.and_local_timezone(Local).earliest()
}

pub fn format_wall_time(time: NaiveDateTime, format: TimeFormat) -> String {
    time.format(format.pattern()).to_string()
}
