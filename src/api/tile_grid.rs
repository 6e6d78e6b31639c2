use crate::api::tile::Tile;
use crate::core::grid::lonlat_to_tile;
use crate::util::coord::Coordinate;
use crate::util::error::TileError;
use geo_types::{Point, Rect};

/// All tiles covering a longitude/latitude extent at a fixed zoom level.
///
/// The grid is a flat collection at a single zoom; it does not walk parent
/// or child zoom levels.
#[derive(Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    zoom_level: u8,
}

impl TileGrid {
    pub fn builder() -> TileGridBuilder {
        TileGridBuilder::new()
    }

    /// Build the grid covering the extent between two lon/lat corners.
    ///
    /// # Example
    /// ```
    /// use slippy_rs::{TileGrid, TileError};
    ///
    /// let grid = TileGrid::from_lonlat_extent(&(-2.30, 53.45), &(-2.20, 53.52), 12)?;
    /// assert!(!grid.is_empty());
    /// # Ok::<(), TileError>(())
    /// ```
    pub fn from_lonlat_extent<C: Coordinate>(
        min: &C,
        max: &C,
        zoom_level: u8,
    ) -> Result<Self, TileError> {
        // north-west corner has the smallest row index
        let (x_min, y_min) = lonlat_to_tile(&(min.x(), max.y()), zoom_level)?;
        let (x_max, y_max) = lonlat_to_tile(&(max.x(), min.y()), zoom_level)?;

        let columns = (x_max.saturating_sub(x_min) + 1) as usize;
        let rows = (y_max.saturating_sub(y_min) + 1) as usize;
        let mut tiles = Vec::with_capacity(columns * rows);
        for x in x_min..=x_max {
            for y in y_min..=y_max {
                tiles.push(Tile::new(zoom_level, x, y));
            }
        }
        Ok(Self { tiles, zoom_level })
    }

    pub fn from_rect(rect: &Rect<f64>, zoom_level: u8) -> Result<Self, TileError> {
        Self::from_lonlat_extent(
            &(rect.min().x, rect.min().y),
            &(rect.max().x, rect.max().y),
            zoom_level,
        )
    }

    pub fn zoom_level(&self) -> u8 {
        self.zoom_level
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// The grid tile containing the given lon/lat point, if any.
    pub fn get_tile_at(&self, point: &Point<f64>) -> Option<&Tile> {
        let (x, y) = lonlat_to_tile(point, self.zoom_level).ok()?;
        self.tiles.iter().find(|tile| tile.x == x && tile.y == y)
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&Tile>
    where
        F: Fn(&Tile) -> bool,
    {
        self.tiles.iter().filter(|tile| predicate(tile)).collect()
    }
}

#[derive(Debug, Default)]
pub struct TileGridBuilder {
    zoom_level: Option<u8>,
    min_lon: Option<f64>,
    min_lat: Option<f64>,
    max_lon: Option<f64>,
    max_lat: Option<f64>,
}

impl TileGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom_level(mut self, zoom_level: u8) -> Self {
        self.zoom_level = Some(zoom_level);
        self
    }

    pub fn lonlat_extent(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        self.min_lon = Some(min_lon);
        self.min_lat = Some(min_lat);
        self.max_lon = Some(max_lon);
        self.max_lat = Some(max_lat);
        self
    }

    pub fn rect(mut self, rect: &Rect<f64>) -> Self {
        self.min_lon = Some(rect.min().x);
        self.min_lat = Some(rect.min().y);
        self.max_lon = Some(rect.max().x);
        self.max_lat = Some(rect.max().y);
        self
    }

    pub fn build(self) -> Result<TileGrid, TileError> {
        let zoom_level = self.zoom_level.expect("zoom_level must be set");
        let min_lon = self.min_lon.expect("extent must be set");
        let min_lat = self.min_lat.expect("extent must be set");
        let max_lon = self.max_lon.expect("extent must be set");
        let max_lat = self.max_lat.expect("extent must be set");

        TileGrid::from_lonlat_extent(&(min_lon, min_lat), &(max_lon, max_lat), zoom_level)
    }
}
