//! Raw input consumed by the gesture controller and the events it recognizes.

use chrono::{DateTime, Local};
use std::time::Instant;

use crate::models::entity::EntityKey;
use crate::services::layout::GridPoint;

/// Identifies one finger / mouse button across down, move and up.
pub type PointerId = u64;

/// Input delivered by the host, stamped with the host's clock.
///
/// Positions are in grid content coordinates. `Scroll` reports the scroll view's
/// current offset; only a change from the previously reported offset counts as
/// scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridInput {
    PointerDown {
        pointer: PointerId,
        pos: GridPoint,
        at: Instant,
    },
    PointerMove {
        pointer: PointerId,
        pos: GridPoint,
        at: Instant,
    },
    PointerUp {
        pointer: PointerId,
        pos: GridPoint,
        at: Instant,
    },
    Scroll {
        offset: f32,
        at: Instant,
    },
    /// The host's dedicated "cancel move" control
    CancelDrag {
        at: Instant,
    },
}

impl GridInput {
    pub fn at(&self) -> Instant {
        match self {
            GridInput::PointerDown { at, .. }
            | GridInput::PointerMove { at, .. }
            | GridInput::PointerUp { at, .. }
            | GridInput::Scroll { at, .. }
            | GridInput::CancelDrag { at } => *at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Host cancel control
    Explicit,
    /// Another pointer landed on empty background
    TapOutside,
    /// Failsafe: the drag ran too long without a release
    Timeout,
    /// Released where it started
    NoMovement,
    /// Target wall-clock time does not exist locally (DST gap)
    InvalidTime,
    /// Selected day changed under the drag
    DayChanged,
}

/// Gestures recognized by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    Tap(EntityKey),
    /// Background long-press confirmed at this (snapped) time
    CreateAtTime(DateTime<Local>),
    DragStart(EntityKey),
    DragUpdate {
        key: EntityKey,
        delta_y: f32,
    },
    DragEnd {
        key: EntityKey,
        new_start: DateTime<Local>,
    },
    DragCancel {
        key: EntityKey,
        reason: CancelReason,
    },
}
