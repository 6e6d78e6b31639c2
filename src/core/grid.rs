use crate::core::constants::{MAX_COORDINATE, MAX_ZOOM_LEVEL};
use crate::util::coord::{Coordinate, lonlat_to_mercator};
use crate::util::error::TileError;

/// Converts a web Mercator planar coordinate to tile column/row indices.
///
/// Returns `(x, y)` for the tile containing the given point at the specified
/// zoom level. Column 0 is the westernmost column and row 0 the northernmost
/// row. Raw indices are clamped into `[0, 2^zoom - 1]`, so points on the
/// eastern/southern grid boundary (or slightly outside the plane due to
/// floating-point rounding) resolve to the nearest edge tile rather than an
/// out-of-range index.
pub fn mercator_to_tile<C: Coordinate>(coord: &C, zoom: u8) -> Result<(u32, u32), TileError> {
    if zoom > MAX_ZOOM_LEVEL {
        return Err(TileError::InvalidZoomLevel(zoom));
    }
    if !coord.x().is_finite() || !coord.y().is_finite() {
        return Err(TileError::InvalidPlanarCoordinate {
            x: coord.x(),
            y: coord.y(),
        });
    }

    let tiles = 1i64 << zoom;
    let scale = MAX_COORDINATE * 2.0 / tiles as f64;

    let raw_x = ((coord.x() + MAX_COORDINATE) / scale).floor() as i64;
    let raw_y = ((MAX_COORDINATE - coord.y()) / scale).floor() as i64;

    Ok((
        raw_x.clamp(0, tiles - 1) as u32,
        raw_y.clamp(0, tiles - 1) as u32,
    ))
}

/// Converts a WGS84 longitude/latitude coordinate to tile column/row indices.
pub fn lonlat_to_tile<C: Coordinate>(coord: &C, zoom: u8) -> Result<(u32, u32), TileError> {
    if zoom > MAX_ZOOM_LEVEL {
        return Err(TileError::InvalidZoomLevel(zoom));
    }
    let mercator = lonlat_to_mercator(coord)?;
    mercator_to_tile(&mercator, zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_zoom_zero_is_single_root_tile() -> Result<(), TileError> {
        for &(lon, lat) in &[
            (0.0, 0.0),
            (-180.0, -90.0),
            (180.0, 90.0),
            (-2.248, 53.481),
            (139.69, 35.68),
        ] {
            assert_eq!(lonlat_to_tile(&(lon, lat), 0)?, (0, 0));
        }
        Ok(())
    }

    #[test]
    fn test_zoom_one_quadrants() -> Result<(), TileError> {
        // upper-left quadrant of the plane
        assert_eq!(lonlat_to_tile(&(-90.0, 45.0), 1)?, (0, 0));
        // lower-right quadrant
        assert_eq!(lonlat_to_tile(&(90.0, -45.0), 1)?, (1, 1));
        // upper-right and lower-left
        assert_eq!(lonlat_to_tile(&(90.0, 45.0), 1)?, (1, 0));
        assert_eq!(lonlat_to_tile(&(-90.0, -45.0), 1)?, (0, 1));
        Ok(())
    }

    #[test]
    fn test_north_pole_clamps_to_row_zero() -> Result<(), TileError> {
        for zoom in [0u8, 1, 5, 12, 30] {
            let (_, y) = lonlat_to_tile(&(0.0, 90.0), zoom)?;
            assert_eq!(y, 0);
        }
        Ok(())
    }

    #[test]
    fn test_south_east_boundary_clamps_to_last_tile() -> Result<(), TileError> {
        // (+M, -M) computes raw indices equal to 2^zoom; clamp keeps them in range
        let (x, y) = lonlat_to_tile(&(180.0, -90.0), 4)?;
        assert_eq!((x, y), (15, 15));
        Ok(())
    }

    #[test]
    fn test_known_location() -> Result<(), TileError> {
        // Manchester, UK at zoom 12 (standard XYZ tile numbering)
        let pt = point! { x: -2.2479699500757597, y: 53.48082746395233 };
        assert_eq!(lonlat_to_tile(&pt, 12)?, (2022, 1325));
        Ok(())
    }

    #[test]
    fn test_mercator_input_matches_lonlat_input() -> Result<(), TileError> {
        let lonlat = (-2.248, 53.481);
        let mercator = lonlat_to_mercator(&lonlat)?;
        assert_eq!(lonlat_to_tile(&lonlat, 10)?, mercator_to_tile(&mercator, 10)?);
        Ok(())
    }

    #[test]
    fn test_invalid_zoom_level() {
        let result = lonlat_to_tile(&(0.0, 0.0), 31);
        assert!(matches!(result, Err(TileError::InvalidZoomLevel(31))));

        let result = mercator_to_tile(&(0.0, 0.0), 255);
        assert!(matches!(result, Err(TileError::InvalidZoomLevel(255))));
    }

    #[test]
    fn test_non_finite_planar_coordinate() {
        let result = mercator_to_tile(&(f64::NAN, 0.0), 5);
        assert!(matches!(
            result,
            Err(TileError::InvalidPlanarCoordinate { .. })
        ));
    }

    #[test]
    fn test_max_zoom_indices_fit_u32() -> Result<(), TileError> {
        let (x, y) = lonlat_to_tile(&(179.9999999, -85.0511287), 30)?;
        assert!(x < 1u32 << 30);
        assert!(y < 1u32 << 30);
        Ok(())
    }
}
