// Service module exports
// The grid engine and its building blocks, leaf-first

pub mod time_axis;
pub mod grid_scene;
pub mod layout;
pub mod gesture;
pub mod schedule_store;
pub mod overlay;
pub mod schedule_grid;
pub mod settings;
