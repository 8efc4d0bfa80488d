//! Transient, non-interactive previews drawn over the grid: the "new entity here"
//! ghost after a background long-press, the phantom left at a dragged entity's
//! original position, and the floating "Moving to HH:MM" label.

use chrono::{DateTime, Local, NaiveDate};
use std::time::{Duration, Instant};

use super::gesture::DragSession;
use super::layout::{EntityFrame, EntityLayout};
use crate::models::entity::EntityKind;
use crate::models::settings::TimeFormat;
use crate::utils::date::format_wall_time;

/// Height of the creation ghost, in minutes.
const GHOST_MINUTES: f32 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewGhost {
    pub kind: EntityKind,
    pub time: DateTime<Local>,
    pub visible_until: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GhostOverlay {
    pub kind: EntityKind,
    pub frame: EntityFrame,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragLabel {
    pub text: String,
    /// Top of the dragged block; the label is anchored here
    pub offset: f32,
    pub x: f32,
}

#[derive(Debug)]
pub struct PreviewOverlay {
    ghost: Option<PreviewGhost>,
    ghost_lifetime: Duration,
    time_format: TimeFormat,
}

impl PreviewOverlay {
    pub fn new(ghost_lifetime: Duration, time_format: TimeFormat) -> Self {
        Self {
            ghost: None,
            ghost_lifetime,
            time_format,
        }
    }

    pub fn show_ghost(&mut self, kind: EntityKind, time: DateTime<Local>, now: Instant) {
        self.ghost = Some(PreviewGhost {
            kind,
            time,
            visible_until: now + self.ghost_lifetime,
        });
    }

    /// Returns `true` if a ghost was visible.
    pub fn hide_ghost(&mut self) -> bool {
        self.ghost.take().is_some()
    }

    /// Drop the ghost once its lifetime has passed. Returns `true` if it expired.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.ghost {
            Some(ghost) if now >= ghost.visible_until => {
                self.ghost = None;
                true
            }
            _ => false,
        }
    }

    pub fn ghost(&self) -> Option<&PreviewGhost> {
        self.ghost.as_ref()
    }

    pub fn ghost_overlay(&self, layout: &EntityLayout, day: NaiveDate) -> Option<GhostOverlay> {
        let ghost = self.ghost.as_ref()?;
        let title = match ghost.kind {
            EntityKind::Appointment => "New appointment",
            EntityKind::Availability => "New availability",
        };
        Some(GhostOverlay {
            kind: ghost.kind,
            frame: EntityFrame {
                x: layout.time_label_width(),
                offset: layout.axis().time_to_offset(ghost.time, day),
                width: layout.entity_width(),
                height: GHOST_MINUTES * layout.axis().pixels_per_minute(),
            },
            text: format!(
                "{} at {}",
                title,
                format_wall_time(ghost.time.naive_local(), self.time_format)
            ),
        })
    }

    /// Dimmed box at the dragged entity's pre-drag position.
    pub fn phantom(session: Option<&DragSession>) -> Option<EntityFrame> {
        session.map(|session| session.original_frame)
    }

    pub fn drag_label(
        &self,
        session: Option<&DragSession>,
        layout: &EntityLayout,
        day: NaiveDate,
    ) -> Option<DragLabel> {
        let session = session?;
        let target = session.target_wall_time(layout.axis(), day);
        let frame = session.current_frame();
        Some(DragLabel {
            text: format!("Moving to {}", format_wall_time(target, self.time_format)),
            offset: frame.offset,
            x: frame.x,
        })
    }
}
