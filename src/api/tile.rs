use crate::core::constants::MAX_ZOOM_LEVEL;
use crate::core::grid::{lonlat_to_tile, mercator_to_tile};
use crate::util::coord::Coordinate;
use crate::util::error::TileError;
use crate::util::identifier::{decode_identifier, generate_identifier};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A tile in the usual web Mercator (slippy map / XYZ) tiling scheme.
///
/// A tile is identified by its column `x`, row `y` and `zoom` level within a
/// `2^zoom x 2^zoom` grid. Row 0 is the northernmost row. Tiles are plain
/// immutable values: cheap to copy, safe to share between threads, and
/// usable as keys in ordered or hashed containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Column index (0 is the westernmost column)
    pub x: u32,
    /// Row index (0 is the northernmost row)
    pub y: u32,
    /// Zoom level (0-30)
    pub zoom: u8,
}

impl Tile {
    /// Create a tile with the given zoom level and column/row indices.
    ///
    /// The values are stored verbatim and are not checked in release
    /// builds, which keeps bulk enumeration of tile ranges assertion-free.
    /// Use [`Tile::from_zxy`] for externally-sourced coordinates, or check
    /// the result with [`Tile::valid`].
    ///
    /// Preconditions (asserted in debug builds):
    /// `zoom <= 30`, `x < 2^zoom`, `y < 2^zoom`.
    pub fn new(zoom: u8, x: u32, y: u32) -> Self {
        debug_assert!(zoom <= MAX_ZOOM_LEVEL);
        debug_assert!(x < 1u32 << zoom);
        debug_assert!(y < 1u32 << zoom);
        Self { x, y, zoom }
    }

    /// Create a tile from explicit coordinates, validating them.
    ///
    /// # Example
    /// ```
    /// use slippy_rs::{Tile, TileError};
    ///
    /// let tile = Tile::from_zxy(12, 2022, 1325)?;
    /// assert!(tile.valid());
    ///
    /// assert!(Tile::from_zxy(31, 0, 0).is_err());
    /// assert!(Tile::from_zxy(4, 16, 0).is_err());
    /// # Ok::<(), TileError>(())
    /// ```
    pub fn from_zxy(zoom: u8, x: u32, y: u32) -> Result<Self, TileError> {
        if zoom > MAX_ZOOM_LEVEL {
            return Err(TileError::InvalidZoomLevel(zoom));
        }
        let max = 1u32 << zoom;
        if x >= max || y >= max {
            return Err(TileError::TileIndexOutOfRange { zoom, x, y });
        }
        Ok(Self { x, y, zoom })
    }

    /// Create the tile containing a WGS84 longitude/latitude coordinate at
    /// the given zoom level.
    ///
    /// The computed indices are clamped into `[0, 2^zoom - 1]`, so any valid
    /// location yields a valid tile, including locations on the grid
    /// boundary or at the projection's latitude limits.
    ///
    /// # Example
    /// ```
    /// use slippy_rs::{Tile, TileError};
    ///
    /// let tile = Tile::from_lonlat(&(-2.248, 53.481), 12)?;
    /// assert_eq!(tile.zoom, 12);
    /// assert!(tile.valid());
    /// # Ok::<(), TileError>(())
    /// ```
    pub fn from_lonlat<C: Coordinate>(coord: &C, zoom: u8) -> Result<Self, TileError> {
        let (x, y) = lonlat_to_tile(coord, zoom)?;
        Ok(Self { x, y, zoom })
    }

    /// Create the tile containing an already-projected web Mercator planar
    /// coordinate at the given zoom level.
    pub fn from_mercator<C: Coordinate>(coord: &C, zoom: u8) -> Result<Self, TileError> {
        let (x, y) = mercator_to_tile(coord, zoom)?;
        Ok(Self { x, y, zoom })
    }

    /// Create a tile from an encoded identifier.
    ///
    /// # Example
    /// ```
    /// use slippy_rs::{Tile, TileError};
    ///
    /// let tile = Tile::from_zxy(12, 2022, 1325)?;
    /// let restored = Tile::from_tile_id(&tile.id())?;
    /// assert_eq!(tile, restored);
    /// # Ok::<(), TileError>(())
    /// ```
    pub fn from_tile_id(id: &str) -> Result<Self, TileError> {
        let (_, zoom, x, y) = decode_identifier(id)?;
        Self::from_zxy(zoom, x, y)
    }

    /// Check whether this tile is valid: the zoom level must be at most 30
    /// and the column/row must each be below `2^zoom`.
    pub fn valid(&self) -> bool {
        if self.zoom > MAX_ZOOM_LEVEL {
            return false;
        }
        let max = 1u32 << self.zoom;
        self.x < max && self.y < max
    }

    /// The encoded identifier for this tile.
    pub fn id(&self) -> String {
        generate_identifier(self.zoom, self.x, self.y)
    }

    /// The `zoom/x/y` path form used by tile servers.
    ///
    /// # Example
    /// ```
    /// use slippy_rs::Tile;
    ///
    /// assert_eq!(Tile::new(12, 2022, 1325).path(), "12/2022/1325");
    /// ```
    pub fn path(&self) -> String {
        format!("{}/{}/{}", self.zoom, self.x, self.y)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// An arbitrary total order for use in sorted containers: zoom level first,
/// then column, then row. This is not a spatial proximity measure.
impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.zoom
            .cmp(&other.zoom)
            .then(self.x.cmp(&other.x))
            .then(self.y.cmp(&other.y))
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
