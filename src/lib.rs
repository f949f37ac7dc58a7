// Library crate root.
//
// Pick a path over a raster: clicks become waypoints, consecutive waypoints
// are joined by rasterized straight sections, and the sections concatenate
// into one transect of grid indices. The binary (src/main.rs) is a thin host
// around `viewer::run`.

pub mod im;
pub mod rasterize;
pub mod history;
pub mod overlay;
pub mod event;
pub mod display;
pub mod controller;
pub mod viewer;
pub mod config;
pub mod error;
pub mod logging;

pub use controller::{ControllerState, InputController};
pub use error::{Result, TransectError};
pub use history::{SelectionHistory, Transect};
pub use rasterize::{rasterize_section, Section, Waypoint};
