// Schedule Grid Library
// Day-schedule grid engine: time axis, layout, gestures, optimistic updates

pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;

pub use models::entity::{EntityKey, EntityKind, ScheduleEntity};
pub use models::settings::GridSettings;
pub use models::snapshot::ScheduleSnapshot;
pub use services::gesture::{GestureEvent, GridInput, PointerId};
pub use services::layout::GridPoint;
pub use services::schedule_grid::{GridChange, ScheduleGrid, ScheduleHost};
