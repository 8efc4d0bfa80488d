//! In-memory stand-in for the scheduling backend the grid is normally embedded in.
//!
//! Grid callbacks are queued through [`QueueHost`] and drained by the app after
//! each frame's input, mirroring how a networked host persists changes and then
//! re-supplies snapshots.

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::models::entity::{AppointmentStatus, AvailabilityType, EntityError, EntityKey, EntityKind, ScheduleEntity};
use crate::models::snapshot::ScheduleSnapshot;
use crate::services::schedule_grid::ScheduleHost;
use crate::utils::date::local_instant;

#[derive(Debug, Clone)]
pub(crate) enum HostRequest {
    Open(ScheduleEntity),
    Create { time: DateTime<Local>, kind: EntityKind },
    Move { entity: ScheduleEntity, new_start: DateTime<Local> },
}

pub(crate) type RequestQueue = Rc<RefCell<Vec<HostRequest>>>;

/// `ScheduleHost` that only records what the grid asked for.
pub(crate) struct QueueHost {
    queue: RequestQueue,
}

impl QueueHost {
    pub fn new(queue: RequestQueue) -> Self {
        Self { queue }
    }
}

impl ScheduleHost for QueueHost {
    fn on_entity_tapped(&mut self, entity: &ScheduleEntity) {
        self.queue.borrow_mut().push(HostRequest::Open(entity.clone()));
    }

    fn on_create_requested(&mut self, time: DateTime<Local>, kind: EntityKind) {
        self.queue.borrow_mut().push(HostRequest::Create { time, kind });
    }

    fn on_entity_moved(&mut self, entity: &ScheduleEntity, new_start: DateTime<Local>) {
        self.queue.borrow_mut().push(HostRequest::Move {
            entity: entity.clone(),
            new_start,
        });
    }
}

pub(crate) struct DemoBackend {
    appointments: Vec<ScheduleEntity>,
    availabilities: Vec<ScheduleEntity>,
    seeded_days: HashSet<NaiveDate>,
    next_id: u32,
    /// Simulates a failing server: every move is refused
    pub reject_moves: bool,
}

impl DemoBackend {
    pub fn new() -> Self {
        Self {
            appointments: Vec::new(),
            availabilities: Vec::new(),
            seeded_days: HashSet::new(),
            next_id: 1,
            reject_moves: false,
        }
    }

    pub fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot::new(self.appointments.clone(), self.availabilities.clone())
    }

    /// Populate `day` with a handful of sample entities the first time it is shown.
    pub fn ensure_day(&mut self, day: NaiveDate) {
        if !self.seeded_days.insert(day) {
            return;
        }

        let at = |h: u32, m: u32| {
            NaiveTime::from_hms_opt(h, m, 0).and_then(|time| local_instant(day.and_time(time)))
        };

        let availability = [
            (8, 0, 240, AvailabilityType::Available, "Front desk"),
            (12, 0, 60, AvailabilityType::Break, "Lunch"),
            (13, 0, 240, AvailabilityType::Available, "Front desk"),
        ];
        for (h, m, minutes, availability_type, label) in availability {
            let Some(start) = at(h, m) else { continue };
            let id = self.allocate_id();
            match ScheduleEntity::builder()
                .id(id)
                .label(label)
                .start(start)
                .duration_minutes(minutes)
                .availability(availability_type, None)
                .build()
            {
                Ok(entity) => self.availabilities.push(entity),
                Err(err) => log::warn!("Skipping sample availability: {}", err),
            }
        }

        let appointments = [
            (9, 0, 30, "Rex - vaccination", "Dr. Lee", AppointmentStatus::Completed),
            (10, 30, 60, "Bella - dental", "Dr. Patel", AppointmentStatus::InProgress),
            (13, 15, 45, "Milo - check-up", "Dr. Lee", AppointmentStatus::Scheduled),
            (15, 0, 30, "Luna - nail trim", "Sam", AppointmentStatus::NeedsNotes),
        ];
        for (h, m, minutes, label, staff, status) in appointments {
            let Some(start) = at(h, m) else { continue };
            let id = self.allocate_id();
            let pet = label.split(" - ").next().unwrap_or(label).to_string();
            match ScheduleEntity::builder()
                .id(id)
                .label(label)
                .start(start)
                .duration_minutes(minutes)
                .appointment(Some(staff.to_string()), vec![pet], status)
                .build()
            {
                Ok(entity) => self.appointments.push(entity),
                Err(err) => log::warn!("Skipping sample appointment: {}", err),
            }
        }
    }

    pub fn create(&mut self, time: DateTime<Local>, kind: EntityKind) -> Result<ScheduleEntity, EntityError> {
        let id = self.allocate_id();
        let entity = match kind {
            EntityKind::Appointment => ScheduleEntity::appointment(id, "New appointment", time, 30)?,
            EntityKind::Availability => ScheduleEntity::availability(id, "Available", time, 60)?,
        };
        self.list_mut(kind).push(entity.clone());
        Ok(entity)
    }

    /// Persist a committed move. Returns `false` when the backend refuses it.
    pub fn move_entity(&mut self, key: &EntityKey, new_start: DateTime<Local>) -> bool {
        if self.reject_moves {
            log::warn!("Backend rejected move of {}", key);
            return false;
        }
        match self.list_mut(key.kind).iter_mut().find(|e| e.id == key.id) {
            Some(entity) => {
                entity.start = new_start;
                true
            }
            None => false,
        }
    }

    fn list_mut(&mut self, kind: EntityKind) -> &mut Vec<ScheduleEntity> {
        match kind {
            EntityKind::Appointment => &mut self.appointments,
            EntityKind::Availability => &mut self.availabilities,
        }
    }

    fn allocate_id(&mut self) -> String {
        let id = format!("demo-{}", self.next_id);
        self.next_id += 1;
        id
    }
}
