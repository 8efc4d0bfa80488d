//! The day-grid engine a host embeds.
//!
//! `ScheduleGrid` wires the time axis, layout, gesture controller, optimistic
//! store and preview overlay together. The host feeds it input and entity
//! snapshots, paints what it exposes, and receives committed user intent through
//! [`ScheduleHost`]. Everything runs on the caller's thread; the host's
//! persistence work happens after the callbacks return and is never awaited here.

use chrono::{DateTime, Local, NaiveDate};
use std::time::Instant;

use super::gesture::{CancelReason, DragSession, GestureController, GestureEvent, GestureState, GridInput};
use super::grid_scene::{GridRenderer, GridScene};
use super::layout::{EntityFrame, EntityLayout};
use super::overlay::{DragLabel, GhostOverlay, PreviewOverlay};
use super::schedule_store::ScheduleStore;
use super::time_axis::TimeAxis;
use crate::models::entity::{EntityKind, ScheduleEntity};
use crate::models::settings::{GridSettings, SettingsError};
use crate::models::snapshot::ScheduleSnapshot;

/// Callbacks into the host application.
pub trait ScheduleHost {
    fn on_entity_tapped(&mut self, entity: &ScheduleEntity);

    /// A background long-press asked for a new entity of `kind` at `time`.
    /// Call [`ScheduleGrid::finish_create`] once the request is handled.
    fn on_create_requested(&mut self, time: DateTime<Local>, kind: EntityKind);

    /// A drag was committed. `entity` is the pre-move state; the local copy has
    /// already been moved to `new_start`. On failure, re-supply the
    /// authoritative entities to roll back.
    fn on_entity_moved(&mut self, entity: &ScheduleEntity, new_start: DateTime<Local>);
}

/// What changed, passed to state-change subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridChange {
    Entities,
    Day,
    EditingMode,
    Geometry,
    Gesture,
    Overlay,
}

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(GridChange)>;

/// An entity ready to paint: the dragged one is reported at its drag position.
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub entity: &'a ScheduleEntity,
    pub frame: EntityFrame,
    pub is_dragging: bool,
}

pub struct ScheduleGrid {
    settings: GridSettings,
    layout: EntityLayout,
    renderer: GridRenderer,
    day: NaiveDate,
    editing_availability: bool,
    store: ScheduleStore,
    gestures: GestureController,
    overlay: PreviewOverlay,
    host: Box<dyn ScheduleHost>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl ScheduleGrid {
    pub fn new(
        settings: GridSettings,
        day: NaiveDate,
        host: Box<dyn ScheduleHost>,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let axis = TimeAxis::from_settings(&settings);

        Ok(Self {
            layout: EntityLayout::new(axis, settings.time_label_width, 0.0),
            renderer: GridRenderer::new(axis, settings.time_format),
            day,
            editing_availability: false,
            store: ScheduleStore::new(),
            gestures: GestureController::new(&settings),
            overlay: PreviewOverlay::new(settings.ghost_lifetime(), settings.time_format),
            host,
            listeners: Vec::new(),
            next_subscription: 1,
            settings,
        })
    }

    // ----- inbound -----

    pub fn set_day(&mut self, day: NaiveDate) {
        if day == self.day {
            return;
        }
        if let Some(event) = self.gestures.cancel_drag(CancelReason::DayChanged) {
            self.dispatch(vec![event], Instant::now());
        }
        self.gestures.reset_pending();
        if self.overlay.hide_ghost() {
            self.notify(GridChange::Overlay);
        }
        log::debug!("Selected day changed to {}", day);
        self.day = day;
        self.notify(GridChange::Day);
    }

    pub fn set_entities(
        &mut self,
        appointments: Vec<ScheduleEntity>,
        availabilities: Vec<ScheduleEntity>,
    ) {
        self.ingest_snapshot(ScheduleSnapshot::new(appointments, availabilities));
    }

    /// Replace the entity lists wholesale. Deferred while a drag is active.
    /// Invalid or duplicate entities are dropped.
    pub fn ingest_snapshot(&mut self, mut snapshot: ScheduleSnapshot) {
        let dropped = snapshot.retain_valid();
        if dropped > 0 {
            log::warn!("Ignored {} invalid entities in host snapshot", dropped);
        }
        let deferred = self.store.is_session_active();
        self.store.ingest(snapshot.into_stacked());
        if !deferred {
            self.notify(GridChange::Entities);
        }
    }

    pub fn set_editing_mode(&mut self, is_availability_mode: bool) {
        if self.editing_availability != is_availability_mode {
            self.editing_availability = is_availability_mode;
            self.notify(GridChange::EditingMode);
        }
    }

    /// Width of the whole track, hour-label column included.
    pub fn set_track_width(&mut self, width: f32) {
        if self.layout.track_width() != width {
            self.layout.set_track_width(width);
            self.notify(GridChange::Geometry);
        }
    }

    /// The host finished handling a creation request; drop the ghost.
    pub fn finish_create(&mut self) {
        if self.overlay.hide_ghost() {
            self.notify(GridChange::Overlay);
        }
    }

    pub fn handle(&mut self, input: GridInput) {
        let now = input.at();
        let before = self.gestures.state().name();
        let events = {
            let placed = self.layout.place(self.store.current(), self.day);
            self.gestures.handle(input, &placed, self.day)
        };
        self.after_gestures(before, events, now);
    }

    /// Advance timers; hosts call this every frame (or on a timer) while
    /// `needs_tick()` is true.
    pub fn tick(&mut self, now: Instant) {
        let before = self.gestures.state().name();
        let events = self.gestures.tick(now, self.day);
        self.after_gestures(before, events, now);
    }

    pub fn needs_tick(&self) -> bool {
        !matches!(self.gestures.state(), GestureState::Idle) || self.overlay.ghost().is_some()
    }

    // ----- observers -----

    pub fn subscribe(&mut self, listener: impl FnMut(GridChange) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    // ----- queries -----

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn layout(&self) -> &EntityLayout {
        &self.layout
    }

    pub fn creation_kind(&self) -> EntityKind {
        if self.editing_availability {
            EntityKind::Availability
        } else {
            EntityKind::Appointment
        }
    }

    /// Effective entities, optimistic moves included.
    pub fn entities(&self) -> &[ScheduleEntity] {
        self.store.current()
    }

    pub fn has_pending_changes(&self) -> bool {
        self.store.has_pending_changes()
    }

    pub fn gesture_state(&self) -> &GestureState {
        self.gestures.state()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.gestures.drag_session()
    }

    pub fn is_scrolling(&self) -> bool {
        self.gestures.is_scrolling()
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn scroll_enabled(&self) -> bool {
        self.gestures.scroll_enabled()
    }

    pub fn scene(&self, now: DateTime<Local>) -> GridScene {
        self.renderer.scene(self.day, now)
    }

    /// Visible entities in paint order, the dragged one at its current position.
    pub fn render_items(&self) -> Vec<RenderItem<'_>> {
        let session = self.gestures.drag_session();
        self.layout
            .place(self.store.current(), self.day)
            .into_iter()
            .map(|placed| {
                let dragged = session.filter(|s| s.key == placed.entity.key());
                RenderItem {
                    entity: placed.entity,
                    frame: dragged.map_or(placed.frame, |s| s.current_frame()),
                    is_dragging: dragged.is_some(),
                }
            })
            .collect()
    }

    pub fn ghost(&self) -> Option<GhostOverlay> {
        self.overlay.ghost_overlay(&self.layout, self.day)
    }

    pub fn phantom(&self) -> Option<EntityFrame> {
        PreviewOverlay::phantom(self.gestures.drag_session())
    }

    pub fn drag_label(&self) -> Option<DragLabel> {
        self.overlay
            .drag_label(self.gestures.drag_session(), &self.layout, self.day)
    }

    // ----- internals -----

    fn after_gestures(&mut self, before: &'static str, events: Vec<GestureEvent>, now: Instant) {
        let state_changed = before != self.gestures.state().name();
        let had_events = !events.is_empty();
        self.dispatch(events, now);

        if self.overlay.expire(now) {
            self.notify(GridChange::Overlay);
        }
        if state_changed || had_events {
            self.notify(GridChange::Gesture);
        }
    }

    fn dispatch(&mut self, events: Vec<GestureEvent>, now: Instant) {
        for event in events {
            match event {
                GestureEvent::Tap(key) => {
                    if let Some(entity) = self.store.get(&key).cloned() {
                        self.host.on_entity_tapped(&entity);
                    }
                }
                GestureEvent::CreateAtTime(time) => {
                    let kind = self.creation_kind();
                    log::info!("Requesting new {} at {}", kind.as_str(), time);
                    self.overlay.show_ghost(kind, time, now);
                    self.notify(GridChange::Overlay);
                    self.host.on_create_requested(time, kind);
                }
                GestureEvent::DragStart(_) => self.store.begin_session(),
                GestureEvent::DragUpdate { .. } => {}
                GestureEvent::DragEnd { key, new_start } => {
                    let original = self.store.get(&key).cloned();
                    let moved = self.store.commit_session(&key, new_start);
                    self.notify(GridChange::Entities);
                    match original {
                        Some(entity) if moved => {
                            log::info!("Moved {} to {}", key, new_start);
                            self.host.on_entity_moved(&entity, new_start);
                        }
                        _ => log::debug!("Dragged entity {} no longer present; move dropped", key),
                    }
                }
                GestureEvent::DragCancel { key, reason } => {
                    log::debug!("Drag of {} cancelled ({:?})", key, reason);
                    let had_snapshot = self.store.has_deferred_snapshot();
                    self.store.cancel_session();
                    if had_snapshot {
                        self.notify(GridChange::Entities);
                    }
                }
            }
        }
    }

    fn notify(&mut self, change: GridChange) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct NullHost;

    impl ScheduleHost for NullHost {
        fn on_entity_tapped(&mut self, _entity: &ScheduleEntity) {}
        fn on_create_requested(&mut self, _time: DateTime<Local>, _kind: EntityKind) {}
        fn on_entity_moved(&mut self, _entity: &ScheduleEntity, _new_start: DateTime<Local>) {}
    }

    fn grid() -> ScheduleGrid {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        ScheduleGrid::new(GridSettings::default(), day, Box::new(NullHost)).unwrap()
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = GridSettings {
            hour_height: 0.0,
            ..GridSettings::default()
        };
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let result = ScheduleGrid::new(settings, day, Box::new(NullHost));
        assert!(matches!(result, Err(SettingsError::InvalidHourHeight)));
    }

    #[test]
    fn test_subscribers_receive_changes_until_unsubscribed() {
        let mut grid = grid();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = grid.subscribe(move |change| sink.borrow_mut().push(change));

        grid.set_editing_mode(true);
        grid.set_editing_mode(true);
        grid.set_day(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
        assert_eq!(*seen.borrow(), vec![GridChange::EditingMode, GridChange::Day]);

        assert!(grid.unsubscribe(id));
        assert!(!grid.unsubscribe(id));
        grid.set_track_width(320.0);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_zero_duration_entity_is_not_ingested() {
        let mut grid = grid();
        grid.set_track_width(400.0);
        let start = Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let good = ScheduleEntity::appointment("a", "A", start, 30).unwrap();
        let zero = ScheduleEntity {
            id: "b".into(),
            duration_minutes: 0,
            ..good.clone()
        };

        grid.set_entities(vec![good, zero], vec![]);
        assert_eq!(grid.entities().len(), 1);
        assert_eq!(grid.render_items()[0].entity.id, "a");
    }

    #[test]
    fn test_render_items_use_track_width() {
        let mut grid = grid();
        grid.set_track_width(400.0);
        let start = Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        grid.set_entities(vec![ScheduleEntity::appointment("a", "A", start, 30).unwrap()], vec![]);

        let items = grid.render_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].frame.width, 345.0);
        assert!(!items[0].is_dragging);
        assert_eq!(grid.creation_kind(), EntityKind::Appointment);
    }
}
