/// Error type for slippy-rs operations.
#[derive(Debug, PartialEq)]
pub enum TileError {
    /// The zoom level is outside the valid range (0-30).
    InvalidZoomLevel(u8),
    /// A tile index is outside the `0..2^zoom` grid at its zoom level.
    TileIndexOutOfRange { zoom: u8, x: u32, y: u32 },
    /// A longitude/latitude coordinate is non-finite or outside the
    /// canonical domain.
    InvalidLocation { lon: f64, lat: f64 },
    /// A planar Mercator coordinate is non-finite.
    InvalidPlanarCoordinate { x: f64, y: f64 },
    /// The tile identifier has an invalid length.
    InvalidIdentifierLength,
    /// The tile identifier checksum validation failed.
    InvalidChecksum,
    /// The identifier version is not supported.
    UnsupportedVersion(u8),
    /// Failed to decode Base64 identifier.
    Base64DecodeError,
    /// File I/O error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for TileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileError::InvalidZoomLevel(z) => write!(f, "Invalid zoom level: {}", z),
            TileError::TileIndexOutOfRange { zoom, x, y } => {
                write!(f, "Tile index ({}, {}) out of range at zoom {}", x, y, zoom)
            }
            TileError::InvalidLocation { lon, lat } => {
                write!(f, "Invalid location: ({}, {})", lon, lat)
            }
            TileError::InvalidPlanarCoordinate { x, y } => {
                write!(f, "Invalid planar coordinate: ({}, {})", x, y)
            }
            TileError::InvalidIdentifierLength => write!(f, "Invalid identifier length"),
            TileError::InvalidChecksum => write!(f, "Invalid checksum"),
            TileError::UnsupportedVersion(v) => write!(f, "Unsupported version: {}", v),
            TileError::Base64DecodeError => write!(f, "Base64 decode error"),
            TileError::IoError(msg) => write!(f, "IO error: {}", msg),
            TileError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            TileError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for TileError {}
