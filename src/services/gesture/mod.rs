//! Gesture recognition for the day grid.
//!
//! One state machine turns pointer and scroll input into taps, background
//! long-press creation requests and drag-to-reschedule interactions:
//!
//! - a short press on an entity is a tap,
//! - holding an entity for the entity threshold starts a drag,
//! - holding empty background for the (longer) background threshold requests a new
//!   entity at the pressed time,
//! - any change of scroll position suppresses all of the above until scrolling has
//!   settled, and an active drag locks scrolling out.
//!
//! Timers (long-press confirmation, scroll settle, drag failsafe) are evaluated
//! against the timestamps carried by input, and by [`GestureController::tick`].

mod input;
mod session;

pub use input::{CancelReason, GestureEvent, GridInput, PointerId};
pub use session::DragSession;

use chrono::{DateTime, Local, NaiveDate};
use std::time::{Duration, Instant};

use super::layout::{hit_test, EntityFrame, GridPoint, PlacedEntity};
use super::time_axis::TimeAxis;
use crate::models::entity::EntityKey;
use crate::models::settings::GridSettings;

#[derive(Clone, Debug, PartialEq)]
pub struct PendingPress {
    pub pointer: PointerId,
    pub origin: GridPoint,
    pub pressed_at: Instant,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PressTarget {
    pub key: EntityKey,
    pub start: DateTime<Local>,
    pub frame: EntityFrame,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    PressHoldPendingOnEntity {
        press: PendingPress,
        target: PressTarget,
    },
    PressHoldPendingOnBackground {
        press: PendingPress,
    },
    Dragging(DragSession),
    Scrolling {
        last_change: Instant,
    },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::PressHoldPendingOnEntity { .. } => "press-hold-entity",
            GestureState::PressHoldPendingOnBackground { .. } => "press-hold-background",
            GestureState::Dragging(_) => "dragging",
            GestureState::Scrolling { .. } => "scrolling",
        }
    }
}

#[derive(Debug)]
pub struct GestureController {
    axis: TimeAxis,
    entity_long_press: Duration,
    background_long_press: Duration,
    touch_slop: f32,
    scroll_settle: Duration,
    drag_failsafe: Duration,
    state: GestureState,
    last_scroll_offset: Option<f32>,
}

impl GestureController {
    pub fn new(settings: &GridSettings) -> Self {
        Self {
            axis: TimeAxis::from_settings(settings),
            entity_long_press: settings.entity_long_press(),
            background_long_press: settings.background_long_press(),
            touch_slop: settings.touch_slop,
            scroll_settle: settings.scroll_settle(),
            drag_failsafe: settings.drag_failsafe(),
            state: GestureState::Idle,
            last_scroll_offset: None,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_scrolling(&self) -> bool {
        matches!(self.state, GestureState::Scrolling { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    /// Hosts must lock their scroll view while this is `false`.
    pub fn scroll_enabled(&self) -> bool {
        !self.is_dragging()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        match &self.state {
            GestureState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Feed one input event. `placed` must be the frames currently on screen for
    /// `day`, in paint order.
    pub fn handle(
        &mut self,
        input: GridInput,
        placed: &[PlacedEntity<'_>],
        day: NaiveDate,
    ) -> Vec<GestureEvent> {
        let mut events = self.tick(input.at(), day);

        match input {
            GridInput::PointerDown { pointer, pos, at } => {
                self.pointer_down(pointer, pos, at, placed, &mut events)
            }
            GridInput::PointerMove { pointer, pos, .. } => self.pointer_move(pointer, pos, &mut events),
            GridInput::PointerUp { pointer, pos, .. } => {
                self.pointer_up(pointer, pos, day, &mut events)
            }
            GridInput::Scroll { offset, at } => self.scroll(offset, at),
            GridInput::CancelDrag { .. } => {
                events.extend(self.cancel_drag(CancelReason::Explicit));
            }
        }

        events
    }

    /// Advance timers to `now`: settle scrolling, confirm long presses and fire
    /// the drag failsafe.
    pub fn tick(&mut self, now: Instant, day: NaiveDate) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        match &self.state {
            GestureState::Scrolling { last_change } => {
                if now.saturating_duration_since(*last_change) >= self.scroll_settle {
                    log::debug!("Scrolling settled");
                    self.state = GestureState::Idle;
                }
            }
            GestureState::PressHoldPendingOnEntity { press, target } => {
                if now.saturating_duration_since(press.pressed_at) >= self.entity_long_press {
                    let session = DragSession::from_press(press, target, now);
                    log::debug!("Drag started for {}", session.key);
                    events.push(GestureEvent::DragStart(session.key.clone()));
                    self.state = GestureState::Dragging(session);
                }
            }
            GestureState::PressHoldPendingOnBackground { press } => {
                if now.saturating_duration_since(press.pressed_at) >= self.background_long_press {
                    match self.axis.offset_to_time(press.origin.y, day) {
                        Some(time) => {
                            log::debug!("Background long-press confirmed at {}", time);
                            events.push(GestureEvent::CreateAtTime(time));
                        }
                        None => log::debug!("Background long-press landed on a nonexistent local time"),
                    }
                    self.state = GestureState::Idle;
                }
            }
            GestureState::Dragging(session) => {
                if now.saturating_duration_since(session.started_at) >= self.drag_failsafe {
                    log::warn!(
                        "Drag of {} exceeded {:?} without release; cancelling",
                        session.key,
                        self.drag_failsafe
                    );
                    events.extend(self.cancel_drag(CancelReason::Timeout));
                }
            }
            GestureState::Idle => {}
        }

        events
    }

    /// End any active drag without committing it.
    pub fn cancel_drag(&mut self, reason: CancelReason) -> Option<GestureEvent> {
        if !self.is_dragging() {
            return None;
        }
        match std::mem::take(&mut self.state) {
            GestureState::Dragging(session) => {
                log::debug!("Drag of {} cancelled ({:?})", session.key, reason);
                Some(GestureEvent::DragCancel {
                    key: session.key,
                    reason,
                })
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Drop a pending press without emitting anything (e.g. the day changed).
    pub fn reset_pending(&mut self) {
        if matches!(
            self.state,
            GestureState::PressHoldPendingOnEntity { .. } | GestureState::PressHoldPendingOnBackground { .. }
        ) {
            self.state = GestureState::Idle;
        }
    }

    /// Frames as painted during a drag: the dragged entity sits at its current
    /// position and on top. Its original slot (the phantom) is not hittable.
    fn as_rendered<'a>(placed: &[PlacedEntity<'a>], session: &DragSession) -> Vec<PlacedEntity<'a>> {
        let (dragged, mut rendered): (Vec<_>, Vec<_>) = placed
            .iter()
            .copied()
            .partition(|item| item.entity.key() == session.key);
        rendered.extend(dragged.into_iter().map(|item| PlacedEntity {
            entity: item.entity,
            frame: session.current_frame(),
        }));
        rendered
    }

    fn pointer_down(
        &mut self,
        pointer: PointerId,
        pos: GridPoint,
        at: Instant,
        placed: &[PlacedEntity<'_>],
        events: &mut Vec<GestureEvent>,
    ) {
        let hit = match self.drag_session() {
            Some(session) => hit_test(&Self::as_rendered(placed, session), pos).copied(),
            None => hit_test(placed, pos).copied(),
        };

        match &self.state {
            GestureState::Scrolling { .. } => {
                log::trace!("Press suppressed while scrolling");
            }
            GestureState::Dragging(session) => {
                if session.pointer == pointer {
                    return;
                }
                if hit.is_none() {
                    events.extend(self.cancel_drag(CancelReason::TapOutside));
                } else {
                    log::debug!("Ignoring second press on an entity while a drag is active");
                }
            }
            GestureState::PressHoldPendingOnEntity { .. }
            | GestureState::PressHoldPendingOnBackground { .. } => {
                log::trace!("Ignoring extra pointer {} during pending press", pointer);
            }
            GestureState::Idle => {
                let press = PendingPress {
                    pointer,
                    origin: pos,
                    pressed_at: at,
                };
                self.state = match hit {
                    Some(item) => GestureState::PressHoldPendingOnEntity {
                        press,
                        target: PressTarget {
                            key: item.entity.key(),
                            start: item.entity.start,
                            frame: item.frame,
                        },
                    },
                    None => GestureState::PressHoldPendingOnBackground { press },
                };
            }
        }
    }

    fn pointer_move(&mut self, pointer: PointerId, pos: GridPoint, events: &mut Vec<GestureEvent>) {
        let slop = self.touch_slop;
        let axis = self.axis;

        match &mut self.state {
            GestureState::PressHoldPendingOnEntity { press, .. }
            | GestureState::PressHoldPendingOnBackground { press } => {
                if press.pointer == pointer && press.origin.distance_to(pos) > slop {
                    log::trace!("Press moved past touch slop; abandoning");
                    self.state = GestureState::Idle;
                }
            }
            GestureState::Dragging(session) => {
                if session.pointer != pointer {
                    return;
                }
                let snapped = axis.snap_delta(pos.y - session.origin.y);
                if snapped != session.current_delta {
                    session.current_delta = snapped;
                    events.push(GestureEvent::DragUpdate {
                        key: session.key.clone(),
                        delta_y: snapped,
                    });
                }
            }
            GestureState::Idle | GestureState::Scrolling { .. } => {}
        }
    }

    fn pointer_up(
        &mut self,
        pointer: PointerId,
        pos: GridPoint,
        day: NaiveDate,
        events: &mut Vec<GestureEvent>,
    ) {
        match &self.state {
            GestureState::PressHoldPendingOnEntity { press, target } if press.pointer == pointer => {
                log::debug!("Tap on {}", target.key);
                events.push(GestureEvent::Tap(target.key.clone()));
                self.state = GestureState::Idle;
            }
            GestureState::PressHoldPendingOnBackground { press } if press.pointer == pointer => {
                self.state = GestureState::Idle;
            }
            GestureState::Dragging(session) if session.pointer == pointer => {
                self.pointer_move(pointer, pos, events);
                self.release(day, events);
            }
            _ => {
                log::trace!("Ignoring release of pointer {} in {} state", pointer, self.state.name());
            }
        }
    }

    fn release(&mut self, day: NaiveDate, events: &mut Vec<GestureEvent>) {
        let Some(session) = self.drag_session() else {
            return;
        };

        if session.current_delta == 0.0 {
            events.extend(self.cancel_drag(CancelReason::NoMovement));
            return;
        }

        match session.target_start(&self.axis, day) {
            Some(new_start) if new_start == session.original_start => {
                events.extend(self.cancel_drag(CancelReason::NoMovement));
            }
            Some(new_start) => {
                let key = session.key.clone();
                log::debug!("Drag of {} released at {}", key, new_start);
                self.state = GestureState::Idle;
                events.push(GestureEvent::DragEnd { key, new_start });
            }
            None => {
                events.extend(self.cancel_drag(CancelReason::InvalidTime));
            }
        }
    }

    fn scroll(&mut self, offset: f32, at: Instant) {
        let previous = self.last_scroll_offset.replace(offset);

        if self.is_dragging() {
            log::trace!("Scroll ignored while dragging");
            return;
        }
        match previous {
            Some(previous) if previous != offset => {}
            _ => return,
        }

        if matches!(
            self.state,
            GestureState::PressHoldPendingOnEntity { .. } | GestureState::PressHoldPendingOnBackground { .. }
        ) {
            log::trace!("Scroll abandoned pending press");
        }
        self.state = GestureState::Scrolling { last_change: at };
    }
}
