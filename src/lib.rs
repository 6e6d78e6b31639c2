//! # slippy-rs
//!
//! Web Mercator (slippy map / XYZ) tile indexing: deterministic conversion
//! from longitude/latitude coordinates to the tile containing them at a
//! given zoom level (0-30).
//!
//! There are currently three main entry points.
//!
//! ### 1. `Tile` - Single Tile Operations
//!
//! ```
//! use slippy_rs::Tile;
//!
//! # fn main() -> Result<(), slippy_rs::TileError> {
//! let tile = Tile::from_lonlat(&(-2.248, 53.481), 12)?;
//! println!("{}", tile.path());
//! assert!(tile.valid());
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `TileGrid` - Collections of Tiles
//!
//! ```
//! use slippy_rs::TileGrid;
//! use geo_types::point;
//!
//! # fn main() -> Result<(), slippy_rs::TileError> {
//! let grid = TileGrid::builder()
//!     .zoom_level(10)
//!     .lonlat_extent(-2.30, 53.45, -2.20, 53.52)
//!     .build()?;
//!
//! let pt = point! { x: -2.25, y: 53.48 };
//! if let Some(tile) = grid.get_tile_at(&pt) {
//!     println!("{}", tile.id());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToTile` - CSV File Conversion
//!
//! Convert CSV files with geometry columns (WKT or GeoJSON) to tile-indexed
//! CSVs:
//!
//! ```no_run
//! use slippy_rs::{CsvToTile, CsvTileConfig, Crs};
//!
//! let config = CsvTileConfig::new("geometry", 12)
//!     .exclude(vec!["Geo Point".into()])
//!     .crs(Crs::Wgs84)
//!     .with_tile_path();
//!
//! // Using trait method
//! "input.csv".to_tile_csv("output.csv", &config).unwrap();
//! ```
//!
//! Or use separate coordinate columns (e.g., Lon/Lat or Mercator X/Y):
//!
//! ```no_run
//! use slippy_rs::{CsvTileConfig, Crs, csv_to_tile_csv};
//!
//! let config = CsvTileConfig::from_coords("Longitude", "Latitude", 12)
//!     .crs(Crs::Wgs84);
//!
//! csv_to_tile_csv("bus_stops.csv", "output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod core;
pub mod util;

pub use crate::api::{
    CoordinateSource, Crs, CsvTileConfig, CsvToTile, Tile, TileGrid, TileGridBuilder,
    csv_to_tile_csv,
};
pub use crate::core::{
    EARTH_RADIUS, IDENTIFIER_VERSION, MAX_COORDINATE, MAX_ZOOM_LEVEL, lonlat_to_tile,
    mercator_to_tile,
};
pub use crate::util::{
    Coordinate, TileError, decode_identifier, generate_identifier, is_valid_lonlat,
    lonlat_to_mercator,
};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;
    use std::collections::BTreeMap;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), TileError> {
        let grid = TileGrid::builder()
            .zoom_level(10)
            .lonlat_extent(-2.30, 53.45, -2.20, 53.52)
            .build()?;

        assert!(!grid.is_empty());
        assert_eq!(grid.zoom_level(), 10);

        let pt = point! { x: -2.25, y: 53.48 };
        let tile = grid.get_tile_at(&pt);
        assert!(tile.is_some());

        if let Some(tile) = tile {
            let (version, zoom, x, y) = decode_identifier(&tile.id())?;
            assert_eq!(version, IDENTIFIER_VERSION);
            assert_eq!(zoom, 10);
            assert_eq!((x, y), (tile.x, tile.y));
            assert_eq!(tile.path(), format!("10/{}/{}", tile.x, tile.y));
        }
        Ok(())
    }

    #[test]
    fn test_using_geo_types_macros() -> Result<(), TileError> {
        let pt = point! { x: -2.248, y: 53.481 };
        let (x, y) = lonlat_to_tile(&pt, 10)?;
        assert!(x > 0);
        assert!(y > 0);

        let tile = Tile::from_lonlat(&pt, 10)?;
        assert_eq!((tile.x, tile.y), (x, y));
        Ok(())
    }

    #[test]
    fn test_tiles_as_ordered_map_keys() -> Result<(), TileError> {
        let mut counts: BTreeMap<Tile, u32> = BTreeMap::new();
        for &coord in &[
            (-2.25, 53.48),
            (-2.25, 53.48),
            (13.38, 52.52),
            (139.69, 35.68),
        ] {
            let tile = Tile::from_lonlat(&coord, 8)?;
            *counts.entry(tile).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 3);
        assert_eq!(counts.values().sum::<u32>(), 4);

        let keys: Vec<_> = counts.keys().copied().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }

    #[test]
    fn test_explicit_and_point_construction_agree() -> Result<(), TileError> {
        let from_point = Tile::from_lonlat(&(-2.248, 53.481), 12)?;
        let explicit = Tile::from_zxy(from_point.zoom, from_point.x, from_point.y)?;
        assert_eq!(from_point, explicit);

        let unchecked = Tile::new(from_point.zoom, from_point.x, from_point.y);
        assert_eq!(from_point, unchecked);
        Ok(())
    }
}
