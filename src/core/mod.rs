pub mod constants;
pub mod grid;

pub use constants::{EARTH_RADIUS, IDENTIFIER_VERSION, MAX_COORDINATE, MAX_ZOOM_LEVEL};
pub use grid::{lonlat_to_tile, mercator_to_tile};
