//! Custom widgets for the viewer

mod map;
mod status;

pub use map::MapWidget;
pub use status::{StatusInfo, StatusWidget};
