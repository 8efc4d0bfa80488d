// Unit tests for the entity payload model
// Wire names of the payload enums and validation of host-supplied snapshots

use chrono::{Local, TimeZone};
use test_case::test_case;

use schedule_grid::models::entity::{
    AppointmentStatus, AvailabilityType, EntityDetails, EntityError, EntityKey, EntityKind, ScheduleEntity,
};
use schedule_grid::models::snapshot::ScheduleSnapshot;

#[test_case("scheduled", AppointmentStatus::Scheduled ; "scheduled")]
#[test_case("in_progress", AppointmentStatus::InProgress ; "in progress")]
#[test_case("completed", AppointmentStatus::Completed ; "completed")]
#[test_case("needs_notes", AppointmentStatus::NeedsNotes ; "needs notes")]
#[test_case("cancelled", AppointmentStatus::Cancelled ; "cancelled")]
fn test_appointment_status_wire_names(wire: &str, expected: AppointmentStatus) {
    let parsed: AppointmentStatus = serde_json::from_str(&format!("\"{}\"", wire)).unwrap();
    assert_eq!(parsed, expected);
}

#[test_case("available", AvailabilityType::Available ; "available")]
#[test_case("unavailable", AvailabilityType::Unavailable ; "unavailable")]
#[test_case("break", AvailabilityType::Break ; "break")]
fn test_availability_type_wire_names(wire: &str, expected: AvailabilityType) {
    let parsed: AvailabilityType = serde_json::from_str(&format!("\"{}\"", wire)).unwrap();
    assert_eq!(parsed, expected);
}

#[test_case(EntityKind::Appointment, "17", "appointment:17" ; "appointment key")]
#[test_case(EntityKind::Availability, "17", "availability:17" ; "availability key")]
fn test_entity_key_display(kind: EntityKind, id: &str, expected: &str) {
    assert_eq!(EntityKey::new(kind, id).to_string(), expected);
}

#[test_case("", 30, EntityError::EmptyId ; "empty id")]
#[test_case("   ", 30, EntityError::EmptyId ; "blank id")]
#[test_case("a", 0, EntityError::ZeroDuration ; "zero duration")]
fn test_constructor_rejects_invalid_entities(id: &str, minutes: u32, expected: EntityError) {
    let start = Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
    assert_eq!(
        ScheduleEntity::availability(id, "Shift", start, minutes).unwrap_err(),
        expected
    );
}

#[test]
fn test_availability_payload_defaults() {
    let json = r#"{
        "availabilities": [{
            "id": "7",
            "start": "2024-01-10T08:00:00+00:00",
            "duration_minutes": 240,
            "details": { "kind": "availability" }
        }]
    }"#;

    let snapshot = ScheduleSnapshot::from_json(json).unwrap();
    let block = &snapshot.availabilities[0];
    assert_eq!(block.kind(), EntityKind::Availability);
    assert_eq!(block.display_label(), "Availability");
    match &block.details {
        EntityDetails::Availability(details) => {
            assert_eq!(details.availability_type, AvailabilityType::Available);
            assert!(details.notes.is_none());
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn test_snapshot_validation_catches_bad_wire_entities() {
    // Deserialization bypasses the constructors, so validate() is the gate
    let json = r#"{
        "appointments": [{
            "id": "9",
            "start": "2024-01-10T09:00:00+00:00",
            "duration_minutes": 0,
            "details": { "kind": "appointment", "staff": null }
        }]
    }"#;

    let snapshot = ScheduleSnapshot::from_json(json).unwrap();
    assert_eq!(snapshot.validate(), Err(EntityError::ZeroDuration));
}

#[test]
fn test_snapshot_json_round_trip_keeps_lists_apart() {
    let start = Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
    let snapshot = ScheduleSnapshot::new(
        vec![ScheduleEntity::appointment("1", "Visit", start, 30).unwrap()],
        vec![ScheduleEntity::availability("1", "Shift", start, 60).unwrap()],
    );

    let restored = ScheduleSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(restored, snapshot);
    assert_ne!(restored.appointments[0].key(), restored.availabilities[0].key());
}
