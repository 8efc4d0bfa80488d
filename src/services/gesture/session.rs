use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::time::Instant;

use super::input::PointerId;
use super::{PendingPress, PressTarget};
use crate::models::entity::{EntityKey, EntityKind};
use crate::services::layout::{EntityFrame, GridPoint};
use crate::services::time_axis::TimeAxis;
use crate::utils::date::local_instant;

/// The single in-flight drag-to-reschedule interaction.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub key: EntityKey,
    /// Pointer that owns the drag; other pointers never move it
    pub pointer: PointerId,
    /// Where the owning pointer went down
    pub origin: GridPoint,
    pub original_start: DateTime<Local>,
    /// Frame at drag start, used for the phantom box
    pub original_frame: EntityFrame,
    /// Vertical travel so far, always a whole number of snap steps
    pub current_delta: f32,
    pub started_at: Instant,
}

impl DragSession {
    pub fn from_press(press: &PendingPress, target: &PressTarget, started_at: Instant) -> Self {
        Self {
            key: target.key.clone(),
            pointer: press.pointer,
            origin: press.origin,
            original_start: target.start,
            original_frame: target.frame,
            current_delta: 0.0,
            started_at,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.key.kind
    }

    /// Where the dragged block is drawn right now.
    pub fn current_frame(&self) -> EntityFrame {
        self.original_frame.translated(self.current_delta)
    }

    /// Wall-clock start the entity would get if released now, clamped into the
    /// visible band of `day`.
    pub fn target_wall_time(&self, axis: &TimeAxis, day: NaiveDate) -> NaiveDateTime {
        let raw = axis.offset_to_wall_time(self.original_frame.offset + self.current_delta, day);
        axis.clamp_start(raw, day)
    }

    pub fn target_start(&self, axis: &TimeAxis, day: NaiveDate) -> Option<DateTime<Local>> {
        local_instant(self.target_wall_time(axis, day))
    }
}
