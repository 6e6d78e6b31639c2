pub mod coord;
pub mod error;
pub mod identifier;

pub use coord::{Coordinate, is_valid_lonlat, lonlat_to_mercator};
pub use error::TileError;
pub use identifier::{decode_identifier, generate_identifier};
