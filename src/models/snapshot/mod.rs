//! Host-supplied snapshot of one day's entities.
//!
//! Hosts fetch appointments and availability blocks separately; the snapshot keeps
//! them apart so the grid can stack availability below appointments.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::entity::{EntityError, EntityKind, ScheduleEntity};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    #[serde(default)]
    pub appointments: Vec<ScheduleEntity>,
    #[serde(default)]
    pub availabilities: Vec<ScheduleEntity>,
}

impl ScheduleSnapshot {
    pub fn new(appointments: Vec<ScheduleEntity>, availabilities: Vec<ScheduleEntity>) -> Self {
        Self {
            appointments,
            availabilities,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Validate every entity in both lists.
    pub fn validate(&self) -> Result<(), EntityError> {
        for entity in self.appointments.iter().chain(self.availabilities.iter()) {
            entity.validate()?;
        }
        Ok(())
    }

    /// Drop entities that fail validation or repeat an earlier key, logging each
    /// one. Returns how many were dropped.
    pub fn retain_valid(&mut self) -> usize {
        let before = self.len();
        let mut seen = HashSet::new();

        for list in [&mut self.appointments, &mut self.availabilities] {
            list.retain(|entity| {
                if let Err(err) = entity.validate() {
                    log::warn!("Dropping invalid entity {}: {}", entity.key(), err);
                    return false;
                }
                if !seen.insert(entity.key()) {
                    log::warn!("Dropping duplicate entity {}", entity.key());
                    return false;
                }
                true
            });
        }

        before - self.len()
    }

    /// Flatten into paint order: availability blocks first, appointments above them.
    ///
    /// Entities filed under the wrong list are moved to the list matching their kind.
    pub fn into_stacked(self) -> Vec<ScheduleEntity> {
        let (mut lower, mut misfiled_upper): (Vec<_>, Vec<_>) = self
            .availabilities
            .into_iter()
            .partition(|e| e.kind() == EntityKind::Availability);
        let (misfiled_lower, appointments): (Vec<_>, Vec<_>) = self
            .appointments
            .into_iter()
            .partition(|e| e.kind() == EntityKind::Availability);

        lower.extend(misfiled_lower);
        let mut stacked = lower;
        stacked.extend(appointments);
        stacked.append(&mut misfiled_upper);
        stacked
    }

    pub fn len(&self) -> usize {
        self.appointments.len() + self.availabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
