// Settings module
// Grid geometry and gesture timing, loadable from grid.toml

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Clock style for hour labels and the drag label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl TimeFormat {
    /// chrono format string for a wall-clock time in this style
    pub fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::TwentyFourHour => "%H:%M",
            TimeFormat::TwelveHour => "%-I:%M %p",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Hour height must be a positive number of pixels")]
    InvalidHourHeight,
    #[error("Visible hours must satisfy start < end <= 24 (got {start}..{end})")]
    InvalidHourRange { start: u32, end: u32 },
    #[error("Time label column must not be negative")]
    InvalidLabelWidth,
    #[error("Timing value `{0}` must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Geometry and gesture timing for the day grid.
///
/// Every field has a default so a partial `grid.toml` only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Pixels per hour on the vertical axis
    pub hour_height: f32,
    /// First visible hour (inclusive)
    pub start_hour: u32,
    /// Last visible hour (exclusive)
    pub end_hour: u32,
    /// Width of the hour-label column left of the entity track
    pub time_label_width: f32,
    pub entity_long_press_ms: u64,
    pub background_long_press_ms: u64,
    /// Pointer travel that turns a press into a scroll rather than a tap/long-press
    pub touch_slop: f32,
    pub scroll_settle_ms: u64,
    pub drag_failsafe_secs: u64,
    pub ghost_lifetime_ms: u64,
    pub time_format: TimeFormat,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            hour_height: 60.0,
            start_hour: 0,
            end_hour: 24,
            time_label_width: 55.0,
            entity_long_press_ms: 300,
            background_long_press_ms: 500,
            touch_slop: 10.0,
            scroll_settle_ms: 150,
            drag_failsafe_secs: 10,
            ghost_lifetime_ms: 1500,
            time_format: TimeFormat::TwentyFourHour,
        }
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.hour_height.is_finite() && self.hour_height > 0.0) {
            return Err(SettingsError::InvalidHourHeight);
        }
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(SettingsError::InvalidHourRange {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if !(self.time_label_width.is_finite() && self.time_label_width >= 0.0) {
            return Err(SettingsError::InvalidLabelWidth);
        }

        let timings = [
            ("entity_long_press_ms", self.entity_long_press_ms),
            ("background_long_press_ms", self.background_long_press_ms),
            ("scroll_settle_ms", self.scroll_settle_ms),
            ("drag_failsafe_secs", self.drag_failsafe_secs),
            ("ghost_lifetime_ms", self.ghost_lifetime_ms),
        ];
        for (name, value) in timings {
            if value == 0 {
                return Err(SettingsError::ZeroDuration(name));
            }
        }

        Ok(())
    }

    pub fn entity_long_press(&self) -> Duration {
        Duration::from_millis(self.entity_long_press_ms)
    }

    pub fn background_long_press(&self) -> Duration {
        Duration::from_millis(self.background_long_press_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }

    pub fn drag_failsafe(&self) -> Duration {
        Duration::from_secs(self.drag_failsafe_secs)
    }

    pub fn ghost_lifetime(&self) -> Duration {
        Duration::from_millis(self.ghost_lifetime_ms)
    }
}
