/// Identifier version for encoding/decoding
pub const IDENTIFIER_VERSION: u8 = 1;

/// Earth radius in meters for the spherical Mercator projection (EPSG:3857)
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Maximum planar coordinate magnitude in the Mercator plane.
///
/// The projection maps the valid geographic extent onto the square
/// `[-MAX_COORDINATE, MAX_COORDINATE]` on both axes (Earth radius times pi).
pub const MAX_COORDINATE: f64 = 20_037_508.342_789_244;

/// Maximum zoom level (tile indices fit in 32 bits up to here)
pub const MAX_ZOOM_LEVEL: u8 = 30;
