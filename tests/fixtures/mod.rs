// Test fixtures - reusable grid data
// A fixed day, a few entities and a scripted clock for gesture timing

#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::time::{Duration, Instant};

use schedule_grid::services::gesture::{GridInput, PointerId};
use schedule_grid::services::layout::GridPoint;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, Jan 10, 2024 (no DST transition in any common zone)
    pub fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    pub fn next_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()
    }

    /// Local instant on [`day`]
    pub fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 10, hour, minute, 0).unwrap()
    }
}

/// Sample entities for testing
pub mod entities {
    use super::*;
    use schedule_grid::models::entity::ScheduleEntity;

    /// 09:00-09:30 appointment, occupying y 540..570 at 60px/hour
    pub fn checkup() -> ScheduleEntity {
        ScheduleEntity::appointment("a-1", "Rex - check-up", dates::at(9, 0), 30).unwrap()
    }

    /// 11:00-12:00 appointment, occupying y 660..720
    pub fn dental() -> ScheduleEntity {
        ScheduleEntity::appointment("a-2", "Bella - dental", dates::at(11, 0), 60).unwrap()
    }

    /// 08:00-12:00 availability block under both appointments
    pub fn morning_shift() -> ScheduleEntity {
        ScheduleEntity::availability("v-1", "Front desk", dates::at(8, 0), 240).unwrap()
    }
}

/// Scripted pointer input against a fixed starting instant
pub struct Clock {
    t0: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self { t0: Instant::now() }
    }

    pub fn ms(&self, millis: u64) -> Instant {
        self.t0 + Duration::from_millis(millis)
    }

    pub fn down(&self, pointer: PointerId, x: f32, y: f32, millis: u64) -> GridInput {
        GridInput::PointerDown {
            pointer,
            pos: GridPoint::new(x, y),
            at: self.ms(millis),
        }
    }

    pub fn moved(&self, pointer: PointerId, x: f32, y: f32, millis: u64) -> GridInput {
        GridInput::PointerMove {
            pointer,
            pos: GridPoint::new(x, y),
            at: self.ms(millis),
        }
    }

    pub fn up(&self, pointer: PointerId, x: f32, y: f32, millis: u64) -> GridInput {
        GridInput::PointerUp {
            pointer,
            pos: GridPoint::new(x, y),
            at: self.ms(millis),
        }
    }

    pub fn scroll(&self, offset: f32, millis: u64) -> GridInput {
        GridInput::Scroll {
            offset,
            at: self.ms(millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_entities_are_on_fixture_day() {
        assert_eq!(entities::checkup().local_date(), dates::day());
        assert_eq!(entities::dental().local_date(), dates::day());
        assert_eq!(entities::morning_shift().local_date(), dates::day());
    }
}
