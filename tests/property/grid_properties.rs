// Property-based tests for time mapping, snapping and hit testing
// Random offsets, hour heights and entity sets against the grid invariants

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use schedule_grid::models::entity::{EntityKind, ScheduleEntity};
use schedule_grid::models::settings::GridSettings;
use schedule_grid::services::gesture::GridInput;
use schedule_grid::services::layout::{hit_test, EntityLayout, GridPoint};
use schedule_grid::services::time_axis::TimeAxis;
use schedule_grid::{ScheduleGrid, ScheduleHost};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

/// Host that records every committed move
struct RecordingHost {
    moves: Rc<RefCell<Vec<DateTime<Local>>>>,
}

impl ScheduleHost for RecordingHost {
    fn on_entity_tapped(&mut self, _entity: &ScheduleEntity) {}
    fn on_create_requested(&mut self, _time: DateTime<Local>, _kind: EntityKind) {}
    fn on_entity_moved(&mut self, _entity: &ScheduleEntity, new_start: DateTime<Local>) {
        self.moves.borrow_mut().push(new_start);
    }
}

/// Drag the 09:00 appointment by `dy` pixels and release; returns the starts the
/// host was told about.
fn drag_by(dy: f32) -> Vec<DateTime<Local>> {
    let moves = Rc::new(RefCell::new(Vec::new()));
    let host = RecordingHost { moves: Rc::clone(&moves) };
    let mut grid = ScheduleGrid::new(GridSettings::default(), day(), Box::new(host)).unwrap();
    grid.set_track_width(400.0);
    let start = Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
    grid.set_entities(vec![ScheduleEntity::appointment("a", "A", start, 30).unwrap()], vec![]);

    let t0 = Instant::now();
    let at = |ms: u64| t0 + Duration::from_millis(ms);
    let origin = GridPoint::new(100.0, 550.0);
    let target = GridPoint::new(100.0, 550.0 + dy);

    grid.handle(GridInput::PointerDown { pointer: 1, pos: origin, at: at(0) });
    grid.tick(at(300));
    assert!(grid.is_dragging());
    grid.handle(GridInput::PointerMove { pointer: 1, pos: target, at: at(350) });
    grid.handle(GridInput::PointerUp { pointer: 1, pos: target, at: at(400) });
    assert!(!grid.is_dragging());

    let recorded = moves.borrow().clone();
    recorded
}

fn hour_heights() -> impl Strategy<Value = f32> {
    prop_oneof![Just(40.0f32), Just(60.0f32), Just(72.0f32), Just(96.0f32), Just(120.0f32)]
}

proptest! {
    /// Property: a snapped delta is a whole number of quarter hours, no more than
    /// half a quarter hour away from the raw travel
    #[test]
    fn prop_snapped_delta_is_whole_quarter_hours(
        hour_height in hour_heights(),
        delta in -2000.0f32..2000.0,
    ) {
        let axis = TimeAxis::new(hour_height, 0, 24);
        let snapped = axis.snap_delta(delta);
        let steps = snapped / axis.snap_quantum();

        prop_assert!((steps - steps.round()).abs() < 1e-3);
        prop_assert!((snapped - delta).abs() <= axis.snap_quantum() / 2.0 + 1e-3);
    }

    /// Property: every offset resolves to a quarter-hour wall time
    #[test]
    fn prop_offsets_resolve_to_quarter_hours(
        hour_height in hour_heights(),
        offset in 0.0f32..1400.0,
    ) {
        let axis = TimeAxis::new(hour_height, 0, 24);
        let time = axis.offset_to_wall_time(offset, day());
        prop_assert_eq!(time.minute() % 15, 0);
        prop_assert_eq!(time.second(), 0);
    }

    /// Property: quarter-hour instants inside the band map to an offset and back
    #[test]
    fn prop_quarter_hours_survive_offset_mapping(
        hour_height in hour_heights(),
        start_hour in 0u32..12,
        slot in 0u32..48,
    ) {
        let axis = TimeAxis::new(hour_height, start_hour, start_hour + 12);
        let minutes = start_hour * 60 + slot * 15;
        let instant = Local
            .with_ymd_and_hms(2024, 1, 10, minutes / 60, minutes % 60, 0)
            .unwrap();

        let offset = axis.time_to_offset(instant, day());
        prop_assert_eq!(axis.offset_to_time(offset, day()), Some(instant));
    }

    /// Property: clamped starts never leave the visible band
    #[test]
    fn prop_clamped_start_stays_in_band(
        start_hour in 0u32..12,
        span in 1u32..12,
        offset in -3000.0f32..3000.0,
    ) {
        let axis = TimeAxis::new(60.0, start_hour, start_hour + span);
        let (earliest, latest) = axis.start_bounds(day());
        let clamped = axis.clamp_start(axis.offset_to_wall_time(offset, day()), day());
        prop_assert!(clamped >= earliest && clamped <= latest);
    }

    /// Property: hit testing returns the last entity in paint order whose frame
    /// contains the point
    #[test]
    fn prop_hit_test_picks_topmost(
        slots in prop::collection::vec((0u32..20, 1u32..8), 1..12),
        y in 0.0f32..1440.0,
    ) {
        let entities: Vec<ScheduleEntity> = slots
            .iter()
            .enumerate()
            .map(|(i, (hour, quarters))| {
                let start = Local.with_ymd_and_hms(2024, 1, 10, *hour, 0, 0).unwrap();
                ScheduleEntity::appointment(format!("e{}", i), "", start, quarters * 15).unwrap()
            })
            .collect();
        let layout = EntityLayout::new(TimeAxis::default(), 55.0, 400.0);
        let placed = layout.place(&entities, day());
        let point = GridPoint::new(200.0, y);

        let expected = placed.iter().rposition(|item| item.frame.contains(point));
        let hit = hit_test(&placed, point).map(|item| item.entity.id.clone());
        prop_assert_eq!(hit, expected.map(|i| placed[i].entity.id.clone()));
    }

    /// Property: mapping any in-day minute to an offset and back lands on that
    /// minute rounded half-up to a quarter hour
    #[test]
    fn prop_offset_round_trip_rounds_to_quarter_hour(
        hour_height in hour_heights(),
        minutes in 0u32..(23 * 60 + 45),
    ) {
        let axis = TimeAxis::new(hour_height, 0, 24);
        let instant = Local
            .with_ymd_and_hms(2024, 1, 10, minutes / 60, minutes % 60, 0)
            .unwrap();
        let rounded = (minutes + 7) / 15 * 15;
        let expected = Local
            .with_ymd_and_hms(2024, 1, 10, rounded / 60, rounded % 60, 0)
            .unwrap();

        let offset = axis.time_to_offset(instant, day());
        prop_assert_eq!(axis.offset_to_time(offset, day()), Some(expected));
    }

    /// Property: a committed drag reports exactly one quarter-hour start inside
    /// the band, following the snapped pointer travel
    #[test]
    fn prop_drag_commits_snapped_clamped_start(dy in -700i32..1000) {
        let moves = drag_by(dy as f32);

        let steps = (dy as f32 / 15.0).round() as i32;
        let expected_minutes = (540 + steps * 15).clamp(0, 23 * 60 + 45) as u32;
        let (earliest, latest) = TimeAxis::default().start_bounds(day());

        for start in &moves {
            prop_assert_eq!(start.minute() % 15, 0);
            prop_assert!(start.naive_local() >= earliest && start.naive_local() <= latest);
        }
        if expected_minutes == 540 {
            prop_assert!(moves.is_empty());
        } else {
            let expected = Local
                .with_ymd_and_hms(2024, 1, 10, expected_minutes / 60, expected_minutes % 60, 0)
                .unwrap();
            prop_assert_eq!(moves, vec![expected]);
        }
    }
}
