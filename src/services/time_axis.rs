//! Mapping between wall-clock times on the selected day and vertical pixel offsets.
//!
//! Offsets are measured from the top of the grid content (the `start_hour` line),
//! independent of scrolling.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime};
use std::ops::Range;

use crate::models::settings::GridSettings;
use crate::utils::date::{day_start, local_instant};

/// Minutes represented by one snap step.
pub const SNAP_MINUTES: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    hour_height: f32,
    start_hour: u32,
    end_hour: u32,
}

impl Default for TimeAxis {
    fn default() -> Self {
        Self::new(60.0, 0, 24)
    }
}

impl TimeAxis {
    pub fn new(hour_height: f32, start_hour: u32, end_hour: u32) -> Self {
        Self {
            hour_height,
            start_hour,
            end_hour,
        }
    }

    pub fn from_settings(settings: &GridSettings) -> Self {
        Self::new(settings.hour_height, settings.start_hour, settings.end_hour)
    }

    pub fn hour_height(&self) -> f32 {
        self.hour_height
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn visible_hours(&self) -> Range<u32> {
        self.start_hour..self.end_hour
    }

    pub fn pixels_per_minute(&self) -> f32 {
        self.hour_height / 60.0
    }

    /// Pixel distance covered by one 15-minute step.
    pub fn snap_quantum(&self) -> f32 {
        self.pixels_per_minute() * SNAP_MINUTES as f32
    }

    /// Round a vertical drag distance to whole snap steps.
    pub fn snap_delta(&self, delta_y: f32) -> f32 {
        let quantum = self.snap_quantum();
        (delta_y / quantum).round() * quantum
    }

    /// Total height of the visible hour band.
    pub fn content_height(&self) -> f32 {
        (self.end_hour - self.start_hour) as f32 * self.hour_height
    }

    pub fn hour_offset(&self, hour: u32) -> f32 {
        (hour as f32 - self.start_hour as f32) * self.hour_height
    }

    /// Offset of `instant` on the grid for `day`. Not clamped: times before
    /// `start_hour` come out negative, times past `end_hour` (or on other days)
    /// land beyond the content height.
    pub fn time_to_offset(&self, instant: DateTime<Local>, day: NaiveDate) -> f32 {
        self.wall_time_to_offset(instant.naive_local(), day)
    }

    pub fn wall_time_to_offset(&self, time: NaiveDateTime, day: NaiveDate) -> f32 {
        let minutes = (time - day_start(day)).num_minutes() - i64::from(self.start_hour) * 60;
        minutes as f32 * self.pixels_per_minute()
    }

    /// Wall-clock time at `offset`, with minutes rounded half-up to the nearest
    /// multiple of 15.
    pub fn offset_to_wall_time(&self, offset: f32, day: NaiveDate) -> NaiveDateTime {
        let raw_minutes =
            f64::from(offset) * 60.0 / f64::from(self.hour_height) + f64::from(self.start_hour) * 60.0;
        let steps = (raw_minutes / SNAP_MINUTES as f64 + 0.5).floor() as i64;
        day_start(day) + Duration::minutes(steps * SNAP_MINUTES)
    }

    /// Instant at `offset`; `None` if that wall-clock time does not exist locally.
    pub fn offset_to_time(&self, offset: f32, day: NaiveDate) -> Option<DateTime<Local>> {
        local_instant(self.offset_to_wall_time(offset, day))
    }

    /// Earliest and latest start a moved entity may take on `day`.
    pub fn start_bounds(&self, day: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let midnight = day_start(day);
        let earliest = midnight + Duration::hours(i64::from(self.start_hour));
        let latest = midnight + Duration::hours(i64::from(self.end_hour))
            - Duration::minutes(SNAP_MINUTES);
        (earliest, latest)
    }

    /// Clamp a wall-clock start into the visible band of `day`.
    pub fn clamp_start(&self, time: NaiveDateTime, day: NaiveDate) -> NaiveDateTime {
        let (earliest, latest) = self.start_bounds(day);
        time.clamp(earliest, latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use test_case::test_case;

    fn jan_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 10, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_nine_am_maps_to_540() {
        let axis = TimeAxis::default();
        assert_eq!(axis.time_to_offset(at(9, 0), jan_10()), 540.0);
    }

    #[test]
    fn test_offset_respects_start_hour() {
        let axis = TimeAxis::new(80.0, 7, 19);
        assert_eq!(axis.time_to_offset(at(8, 30), jan_10()), 120.0);
        assert_eq!(axis.time_to_offset(at(6, 0), jan_10()), -80.0);
    }

    #[test]
    fn test_other_day_lands_outside_band() {
        let axis = TimeAxis::default();
        let next_day = Local.with_ymd_and_hms(2024, 1, 11, 1, 0, 0).unwrap();
        assert!(axis.time_to_offset(next_day, jan_10()) >= axis.content_height());
    }

    #[test_case(540.0, 9, 0 ; "exact hour")]
    #[test_case(547.0, 9, 0 ; "rounds down below half")]
    #[test_case(547.5, 9, 15 ; "half rounds up")]
    #[test_case(585.0, 9, 45 ; "quarter past")]
    #[test_case(1432.0, 23, 45 ; "late evening")]
    fn test_offset_to_time_rounds_to_quarter(offset: f32, hour: u32, minute: u32) {
        let axis = TimeAxis::default();
        let time = axis.offset_to_time(offset, jan_10()).unwrap();
        assert_eq!((time.hour(), time.minute()), (hour, minute));
    }

    #[test]
    fn test_offset_past_midnight_rolls_to_next_day() {
        let axis = TimeAxis::default();
        let time = axis.offset_to_wall_time(24.0 * 60.0 + 30.0, jan_10());
        assert_eq!(time.date(), NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
    }

    #[test]
    fn test_snap_delta() {
        let axis = TimeAxis::default();
        assert_eq!(axis.snap_quantum(), 15.0);
        assert_eq!(axis.snap_delta(47.0), 45.0);
        assert_eq!(axis.snap_delta(-8.0), -15.0);
        assert_eq!(axis.snap_delta(7.0), 0.0);
    }

    #[test]
    fn test_clamp_start_keeps_last_quarter() {
        let axis = TimeAxis::default();
        let late = axis.offset_to_wall_time(24.0 * 60.0 + 60.0, jan_10());
        let clamped = axis.clamp_start(late, jan_10());
        assert_eq!(clamped, jan_10().and_hms_opt(23, 45, 0).unwrap());

        let early = axis.offset_to_wall_time(-90.0, jan_10());
        assert_eq!(axis.clamp_start(early, jan_10()), jan_10().and_hms_opt(0, 0, 0).unwrap());
    }
}
