use crate::core::constants::{EARTH_RADIUS, MAX_COORDINATE};
use crate::util::error::TileError;
use geo_types::Point;
use std::f64::consts::FRAC_PI_4;

pub trait Coordinate {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// Checks whether a coordinate is a valid geographic location:
/// finite, longitude in [-180, 180] and latitude in [-90, 90].
pub fn is_valid_lonlat<C: Coordinate>(coord: &C) -> bool {
    let (lon, lat) = (coord.x(), coord.y());
    lon.is_finite() && lat.is_finite() && (-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)
}

/// Projects a WGS84 longitude/latitude coordinate onto the web Mercator plane.
///
/// The result is clamped into `[-MAX_COORDINATE, MAX_COORDINATE]` on both
/// axes, so latitudes beyond the square Mercator extent (about +/-85.05
/// degrees) land on the top or bottom edge of the plane rather than outside
/// it.
pub fn lonlat_to_mercator<C: Coordinate>(coord: &C) -> Result<Point<f64>, TileError> {
    if !is_valid_lonlat(coord) {
        return Err(TileError::InvalidLocation {
            lon: coord.x(),
            lat: coord.y(),
        });
    }

    let x = EARTH_RADIUS * coord.x().to_radians();
    // ln(tan(0)) at the south pole is -inf; clamp brings it back to the edge
    let y = EARTH_RADIUS * (FRAC_PI_4 + coord.y().to_radians() / 2.0).tan().ln();

    Ok(Point::new(
        x.clamp(-MAX_COORDINATE, MAX_COORDINATE),
        y.clamp(-MAX_COORDINATE, MAX_COORDINATE),
    ))
}
