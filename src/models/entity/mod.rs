// Schedule entity module
// Time-boxed items drawn on the day grid: appointments and availability blocks

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which kind of time-boxed item an entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Appointment,
    Availability,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Appointment => "appointment",
            EntityKind::Availability => "availability",
        }
    }
}

/// Identity of an entity across reloads: same kind and same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKey {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityKey {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

/// Completion status of an appointment, computed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    NeedsNotes,
    Cancelled,
}

/// What a staff availability block expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityType {
    #[default]
    Available,
    Unavailable,
    Break,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppointmentDetails {
    /// Assigned staff member, if any
    pub staff: Option<String>,
    /// Names of the pets seen in this appointment
    #[serde(default)]
    pub pets: Vec<String>,
    #[serde(default)]
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailabilityDetails {
    #[serde(default)]
    pub availability_type: AvailabilityType,
    pub notes: Option<String>,
}

/// Kind-specific payload of a schedule entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityDetails {
    Appointment(AppointmentDetails),
    Availability(AvailabilityDetails),
}

/// Validation errors for schedule entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("Entity id cannot be empty")]
    EmptyId,
    #[error("Entity duration must be at least one minute")]
    ZeroDuration,
    #[error("Entity start time is required")]
    MissingStart,
    #[error("Entity details are required")]
    MissingDetails,
}

/// A time-boxed item rendered on the day grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntity {
    pub id: String,
    pub start: DateTime<Local>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub label: String,
    pub details: EntityDetails,
}

impl ScheduleEntity {
    /// Create an appointment with default details.
    ///
    /// # Examples
    /// ```
    /// use schedule_grid::models::entity::ScheduleEntity;
    /// use chrono::{Local, TimeZone};
    ///
    /// let start = Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
    /// let visit = ScheduleEntity::appointment("a-1", "Rex - vaccination", start, 30).unwrap();
    /// assert_eq!(visit.end(), start + chrono::Duration::minutes(30));
    /// ```
    pub fn appointment(
        id: impl Into<String>,
        label: impl Into<String>,
        start: DateTime<Local>,
        duration_minutes: u32,
    ) -> Result<Self, EntityError> {
        Self::builder()
            .id(id)
            .label(label)
            .start(start)
            .duration_minutes(duration_minutes)
            .details(EntityDetails::Appointment(AppointmentDetails::default()))
            .build()
    }

    /// Create an availability block with default details.
    pub fn availability(
        id: impl Into<String>,
        label: impl Into<String>,
        start: DateTime<Local>,
        duration_minutes: u32,
    ) -> Result<Self, EntityError> {
        Self::builder()
            .id(id)
            .label(label)
            .start(start)
            .duration_minutes(duration_minutes)
            .details(EntityDetails::Availability(AvailabilityDetails::default()))
            .build()
    }

    pub fn builder() -> ScheduleEntityBuilder {
        ScheduleEntityBuilder::new()
    }

    pub fn validate(&self) -> Result<(), EntityError> {
        if self.id.trim().is_empty() {
            return Err(EntityError::EmptyId);
        }
        if self.duration_minutes == 0 {
            return Err(EntityError::ZeroDuration);
        }
        Ok(())
    }

    pub fn kind(&self) -> EntityKind {
        match self.details {
            EntityDetails::Appointment(_) => EntityKind::Appointment,
            EntityDetails::Availability(_) => EntityKind::Availability,
        }
    }

    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.kind(), self.id.clone())
    }

    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn end(&self) -> DateTime<Local> {
        self.start + self.duration()
    }

    /// Local calendar day the entity starts on.
    pub fn local_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    /// Text shown on the block; falls back to the kind when the label is blank.
    pub fn display_label(&self) -> &str {
        let label = self.label.trim();
        if label.is_empty() {
            match self.kind() {
                EntityKind::Appointment => "Appointment",
                EntityKind::Availability => "Availability",
            }
        } else {
            label
        }
    }
}

/// Builder for schedule entities with optional payload fields
pub struct ScheduleEntityBuilder {
    id: Option<String>,
    label: String,
    start: Option<DateTime<Local>>,
    duration_minutes: u32,
    details: Option<EntityDetails>,
}

impl ScheduleEntityBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            label: String::new(),
            start: None,
            duration_minutes: 0,
            details: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn details(mut self, details: EntityDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Shorthand for an appointment payload
    pub fn appointment(
        self,
        staff: Option<String>,
        pets: Vec<String>,
        status: AppointmentStatus,
    ) -> Self {
        self.details(EntityDetails::Appointment(AppointmentDetails {
            staff,
            pets,
            status,
        }))
    }

    /// Shorthand for an availability payload
    pub fn availability(self, availability_type: AvailabilityType, notes: Option<String>) -> Self {
        self.details(EntityDetails::Availability(AvailabilityDetails {
            availability_type,
            notes,
        }))
    }

    pub fn build(self) -> Result<ScheduleEntity, EntityError> {
        let id = self.id.ok_or(EntityError::EmptyId)?;
        let start = self.start.ok_or(EntityError::MissingStart)?;
        let details = self.details.ok_or(EntityError::MissingDetails)?;

        let entity = ScheduleEntity {
            id,
            start,
            duration_minutes: self.duration_minutes,
            label: self.label,
            details,
        };

        entity.validate()?;
        Ok(entity)
    }
}

impl Default for ScheduleEntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
