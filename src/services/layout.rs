//! Entity layout for the day grid.
//!
//! Entities are placed independently: overlapping items share the same horizontal
//! band and simply overlap. Slice order is paint order, so later entries sit on top
//! and win hit tests.

use chrono::NaiveDate;
use std::ops::Range;

use super::time_axis::TimeAxis;
use crate::models::entity::ScheduleEntity;

/// A point in grid content coordinates (scroll offset already applied).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridPoint {
    pub x: f32,
    pub y: f32,
}

impl GridPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: GridPoint) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Rendered rectangle of an entity in grid content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EntityFrame {
    pub x: f32,
    /// Vertical offset from the top of the grid content
    pub offset: f32,
    pub width: f32,
    pub height: f32,
}

impl EntityFrame {
    pub fn bottom(&self) -> f32 {
        self.offset + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn contains(&self, point: GridPoint) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.offset && point.y < self.bottom()
    }

    pub fn translated(&self, delta_y: f32) -> Self {
        Self {
            offset: self.offset + delta_y,
            ..*self
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlacedEntity<'a> {
    pub entity: &'a ScheduleEntity,
    pub frame: EntityFrame,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityLayout {
    axis: TimeAxis,
    time_label_width: f32,
    track_width: f32,
}

impl EntityLayout {
    pub fn new(axis: TimeAxis, time_label_width: f32, track_width: f32) -> Self {
        Self {
            axis,
            time_label_width,
            track_width,
        }
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn time_label_width(&self) -> f32 {
        self.time_label_width
    }

    pub fn track_width(&self) -> f32 {
        self.track_width
    }

    pub fn set_track_width(&mut self, width: f32) {
        self.track_width = width.max(0.0);
    }

    /// Width available to entity blocks once the hour-label column is taken.
    pub fn entity_width(&self) -> f32 {
        (self.track_width - self.time_label_width).max(0.0)
    }

    /// Entities whose local start date is `day` and whose start hour lies in `hours`.
    pub fn visible_entities<'a>(
        all: &'a [ScheduleEntity],
        day: NaiveDate,
        hours: Range<u32>,
    ) -> Vec<&'a ScheduleEntity> {
        all.iter()
            .filter(|entity| entity.local_date() == day && hours.contains(&entity.start_hour()))
            .collect()
    }

    pub fn frame(&self, entity: &ScheduleEntity, day: NaiveDate) -> EntityFrame {
        EntityFrame {
            x: self.time_label_width,
            offset: self.axis.time_to_offset(entity.start, day),
            width: self.entity_width(),
            height: entity.duration_minutes as f32 * self.axis.pixels_per_minute(),
        }
    }

    /// Visible entities with their frames, in paint order.
    pub fn place<'a>(&self, all: &'a [ScheduleEntity], day: NaiveDate) -> Vec<PlacedEntity<'a>> {
        Self::visible_entities(all, day, self.axis.visible_hours())
            .into_iter()
            .map(|entity| PlacedEntity {
                entity,
                frame: self.frame(entity, day),
            })
            .collect()
    }
}

/// Topmost placed entity under `point`, if any.
pub fn hit_test<'p, 'a>(placed: &'p [PlacedEntity<'a>], point: GridPoint) -> Option<&'p PlacedEntity<'a>> {
    placed.iter().rev().find(|item| item.frame.contains(point))
}
