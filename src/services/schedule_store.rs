//! Optimistic in-memory cache of the entities shown on the grid.
//!
//! The host's latest snapshot is authoritative. A committed drag mutates a local
//! copy immediately; the next snapshot the host ingests replaces that copy, which
//! is how a rejected move gets rolled back. While a drag session is open, incoming
//! snapshots are buffered so the dragged block does not jump under the pointer.

use chrono::{DateTime, Local};

use crate::models::entity::{EntityKey, ScheduleEntity};

#[derive(Debug, Default)]
pub struct ScheduleStore {
    authoritative: Vec<ScheduleEntity>,
    optimistic: Option<Vec<ScheduleEntity>>,
    deferred: Option<Vec<ScheduleEntity>>,
    session_active: bool,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The effective list: the optimistic copy when one exists, else the host's list.
    pub fn current(&self) -> &[ScheduleEntity] {
        self.optimistic.as_deref().unwrap_or(&self.authoritative)
    }

    pub fn get(&self, key: &EntityKey) -> Option<&ScheduleEntity> {
        self.current().iter().find(|entity| entity.key() == *key)
    }

    pub fn has_pending_changes(&self) -> bool {
        self.optimistic.is_some()
    }

    pub fn has_deferred_snapshot(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn is_session_active(&self) -> bool {
        self.session_active
    }

    /// Move one entity in the local copy. Returns `false` (and changes nothing)
    /// when no entity has that key.
    pub fn apply_move(&mut self, key: &EntityKey, new_start: DateTime<Local>) -> bool {
        if !self.current().iter().any(|entity| entity.key() == *key) {
            log::debug!("Ignoring optimistic move for unknown entity {}", key);
            return false;
        }

        let authoritative = &self.authoritative;
        let local = self.optimistic.get_or_insert_with(|| authoritative.clone());
        if let Some(entity) = local.iter_mut().find(|entity| entity.key() == *key) {
            entity.start = new_start;
        }
        true
    }

    /// Replace the authoritative list, discarding optimistic state. Buffered
    /// while a drag session is open; the latest buffered snapshot wins.
    pub fn ingest(&mut self, fresh: Vec<ScheduleEntity>) {
        if self.session_active {
            log::debug!("Deferring snapshot of {} entities until drag ends", fresh.len());
            self.deferred = Some(fresh);
            return;
        }
        self.replace(fresh);
    }

    pub fn begin_session(&mut self) {
        self.session_active = true;
    }

    /// Close the drag session without a move; applies any buffered snapshot.
    pub fn cancel_session(&mut self) {
        self.session_active = false;
        if let Some(fresh) = self.deferred.take() {
            self.replace(fresh);
        }
    }

    /// Close the drag session with a committed move.
    ///
    /// A buffered snapshot was captured before the commit, so it is applied first
    /// and the move is layered on top of it.
    pub fn commit_session(&mut self, key: &EntityKey, new_start: DateTime<Local>) -> bool {
        self.session_active = false;
        if let Some(fresh) = self.deferred.take() {
            self.replace(fresh);
        }
        self.apply_move(key, new_start)
    }

    fn replace(&mut self, fresh: Vec<ScheduleEntity>) {
        self.authoritative = fresh;
        self.optimistic = None;
    }
}
