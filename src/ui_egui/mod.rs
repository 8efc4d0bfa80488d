mod app;
mod grid_painter;
mod input;
mod palette;

pub use app::ScheduleGridApp;
