//! Static hour grid for the selected day.
//!
//! Produces backend-agnostic primitives (slot lines, hour labels, current time
//! line); `ui_egui::grid_painter` turns them into egui shapes.

use chrono::{DateTime, Local, NaiveDate, NaiveTime};

use super::time_axis::{TimeAxis, SNAP_MINUTES};
use crate::models::settings::TimeFormat;
use crate::utils::date::format_wall_time;

const SLOTS_PER_HOUR: u32 = (60 / SNAP_MINUTES) as u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLine {
    pub offset: f32,
    /// Hour boundaries are drawn stronger than quarter-hour lines
    pub is_hour_start: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourLabel {
    pub hour: u32,
    pub offset: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridScene {
    pub lines: Vec<SlotLine>,
    pub labels: Vec<HourLabel>,
    /// Offset of the "now" line when the selected day is today and inside the band
    pub now_offset: Option<f32>,
    pub content_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRenderer {
    axis: TimeAxis,
    time_format: TimeFormat,
}

impl GridRenderer {
    pub fn new(axis: TimeAxis, time_format: TimeFormat) -> Self {
        Self { axis, time_format }
    }

    pub fn scene(&self, day: NaiveDate, now: DateTime<Local>) -> GridScene {
        let slot_height = self.axis.snap_quantum();
        let mut lines = Vec::new();
        let mut labels = Vec::new();

        for hour in self.axis.visible_hours() {
            let hour_top = self.axis.hour_offset(hour);
            for slot in 0..SLOTS_PER_HOUR {
                lines.push(SlotLine {
                    offset: hour_top + slot as f32 * slot_height,
                    is_hour_start: slot == 0,
                });
            }

            let time = NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN);
            labels.push(HourLabel {
                hour,
                offset: hour_top,
                text: format_wall_time(day.and_time(time), self.time_format),
            });
        }

        // Closing line under the last visible hour
        lines.push(SlotLine {
            offset: self.axis.content_height(),
            is_hour_start: true,
        });

        GridScene {
            lines,
            labels,
            now_offset: self.now_offset(day, now),
            content_height: self.axis.content_height(),
        }
    }

    pub fn now_offset(&self, day: NaiveDate, now: DateTime<Local>) -> Option<f32> {
        if now.date_naive() != day {
            return None;
        }
        let offset = self.axis.time_to_offset(now, day);
        (0.0..self.axis.content_height())
            .contains(&offset)
            .then_some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn jan_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[test]
    fn test_full_day_has_quarter_lines_and_labels() {
        let renderer = GridRenderer::new(TimeAxis::default(), TimeFormat::TwentyFourHour);
        let now = Local.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let scene = renderer.scene(jan_10(), now);

        assert_eq!(scene.lines.len(), 24 * 4 + 1);
        assert_eq!(scene.labels.len(), 24);
        assert_eq!(scene.labels[9].text, "09:00");
        assert_eq!(scene.labels[9].offset, 540.0);
        assert_eq!(scene.lines.iter().filter(|l| l.is_hour_start).count(), 25);
        assert_eq!(scene.content_height, 1440.0);
        assert!(scene.now_offset.is_none());
    }

    #[test]
    fn test_now_line_on_selected_day() {
        let renderer = GridRenderer::new(TimeAxis::default(), TimeFormat::TwentyFourHour);
        let now = Local.with_ymd_and_hms(2024, 1, 10, 13, 30, 0).unwrap();
        assert_eq!(renderer.now_offset(jan_10(), now), Some(810.0));
    }

    #[test]
    fn test_now_line_hidden_outside_band() {
        let renderer = GridRenderer::new(TimeAxis::new(60.0, 8, 18), TimeFormat::TwentyFourHour);
        let now = Local.with_ymd_and_hms(2024, 1, 10, 19, 0, 0).unwrap();
        assert_eq!(renderer.now_offset(jan_10(), now), None);
    }

    #[test]
    fn test_twelve_hour_labels() {
        let renderer = GridRenderer::new(TimeAxis::new(60.0, 8, 18), TimeFormat::TwelveHour);
        let now = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let scene = renderer.scene(jan_10(), now);
        assert_eq!(scene.labels.first().map(|l| l.text.as_str()), Some("8:00 AM"));
        assert_eq!(scene.labels[0].offset, 0.0);
        assert_eq!(scene.labels.last().map(|l| l.text.as_str()), Some("5:00 PM"));
    }
}
