// Module exports for models

pub mod entity;
pub mod settings;
pub mod snapshot;
