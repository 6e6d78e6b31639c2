use crate::api::tile::Tile;
use crate::util::error::TileError;
use geo::Centroid;
use geo_types::Geometry;
use geojson::GeoJson;
use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use wkt::Wkt;

/// For the type of geometry source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { x_idx: usize, y_idx: usize },
}

/// Coordinate reference system for input coordinate data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crs {
    /// WGS84 (EPSG:4326) - longitude/latitude coordinates
    #[default]
    Wgs84,
    /// Web Mercator (EPSG:3857) - planar x/y coordinates in meters
    Mercator,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate X and Y coordinate columns (e.g., Lon/Lat)
    CoordinateColumns { x_column: String, y_column: String },
}

/// Configuration for CSV to tile conversion.
#[derive(Debug, Clone)]
pub struct CsvTileConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub zoom_level: u8,
    pub crs: Crs,
    pub include_tile_path: bool,
}

impl CsvTileConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use slippy_rs::CsvTileConfig;
    ///
    /// let config = CsvTileConfig::new("geometry", 12);
    /// ```
    pub fn new(geometry_column: impl Into<String>, zoom_level: u8) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            zoom_level,
            crs: Crs::default(),
            include_tile_path: false,
        }
    }

    /// Create config for a CSV with separate X/Y coordinate columns.
    ///
    /// # Example
    /// ```
    /// use slippy_rs::{CsvTileConfig, Crs};
    ///
    /// // For WGS84 coordinates (Longitude/Latitude)
    /// let config = CsvTileConfig::from_coords("Longitude", "Latitude", 12)
    ///     .crs(Crs::Wgs84);
    ///
    /// // For already-projected web Mercator coordinates
    /// let config = CsvTileConfig::from_coords("X", "Y", 12)
    ///     .crs(Crs::Mercator);
    /// ```
    pub fn from_coords(
        x_column: impl Into<String>,
        y_column: impl Into<String>,
        zoom_level: u8,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                x_column: x_column.into(),
                y_column: y_column.into(),
            },
            exclude_columns: Vec::new(),
            zoom_level,
            crs: Crs::default(),
            include_tile_path: false,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn crs(mut self, crs: Crs) -> Self {
        self.crs = crs;
        self
    }

    /// Include the `zoom/x/y` tile path as an extra output column.
    pub fn with_tile_path(mut self) -> Self {
        self.include_tile_path = true;
        self
    }
}

pub trait CsvToTile {
    fn to_tile_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvTileConfig,
    ) -> Result<(), TileError>;
}

impl<P: AsRef<Path>> CsvToTile for P {
    fn to_tile_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvTileConfig,
    ) -> Result<(), TileError> {
        csv_to_tile_csv(self, output_path, config)
    }
}

fn parse_geometry(s: &str) -> Result<Geometry<f64>, TileError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

fn parse_geojson(s: &str) -> Result<Geometry<f64>, TileError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| TileError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => {
            Geometry::try_from(geom).map_err(|e| TileError::GeometryParseError(e.to_string()))
        }
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| TileError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(|g| {
                Geometry::try_from(g).map_err(|e| TileError::GeometryParseError(e.to_string()))
            }),
        GeoJson::FeatureCollection(_) => Err(TileError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

fn parse_wkt(s: &str) -> Result<Geometry<f64>, TileError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| TileError::GeometryParseError(e.to_string()))?;

    wkt.try_into()
        .map_err(|_| TileError::GeometryParseError("Failed to convert WKT to geometry".to_string()))
}

fn coord_to_tile(x: f64, y: f64, zoom: u8, crs: Crs) -> Result<Tile, TileError> {
    match crs {
        Crs::Wgs84 => Tile::from_lonlat(&(x, y), zoom),
        Crs::Mercator => Tile::from_mercator(&(x, y), zoom),
    }
}

fn geometry_to_tiles(geom: Geometry<f64>, zoom: u8, crs: Crs) -> Result<Vec<Tile>, TileError> {
    match geom {
        Geometry::Point(pt) => Ok(vec![coord_to_tile(pt.x(), pt.y(), zoom, crs)?]),
        Geometry::MultiPoint(mp) => {
            let mut tiles = Vec::new();
            for pt in mp.0 {
                tiles.push(coord_to_tile(pt.x(), pt.y(), zoom, crs)?);
            }
            Ok(tiles)
        }
        Geometry::LineString(line) => {
            // adjacent vertices often share a tile; the ordered set dedupes
            let mut tiles = BTreeSet::new();
            for c in line.0 {
                tiles.insert(coord_to_tile(c.x, c.y, zoom, crs)?);
            }
            Ok(tiles.into_iter().collect())
        }
        Geometry::MultiLineString(mls) => {
            let mut tiles = BTreeSet::new();
            for line in mls.0 {
                for c in line.0 {
                    tiles.insert(coord_to_tile(c.x, c.y, zoom, crs)?);
                }
            }
            Ok(tiles.into_iter().collect())
        }
        Geometry::Polygon(poly) => {
            if let Some(centroid) = poly.centroid() {
                Ok(vec![coord_to_tile(centroid.x(), centroid.y(), zoom, crs)?])
            } else {
                Ok(vec![])
            }
        }
        Geometry::MultiPolygon(mp) => {
            let mut tiles = Vec::new();
            for poly in mp.0 {
                if let Some(centroid) = poly.centroid() {
                    tiles.push(coord_to_tile(centroid.x(), centroid.y(), zoom, crs)?);
                }
            }
            Ok(tiles)
        }
        Geometry::GeometryCollection(gc) => {
            let mut all_tiles = Vec::new();
            for g in gc.0 {
                all_tiles.extend(geometry_to_tiles(g, zoom, crs)?);
            }
            Ok(all_tiles)
        }
        _ => Err(TileError::GeometryParseError(
            "Unsupported geometry type".to_string(),
        )),
    }
}

// ============================================================================
// CSV Conversion
// ============================================================================

/// Converts a CSV file with geometry or coordinate columns to a CSV file with
/// tile IDs.
///
/// Streams output to minimize memory usage for large files.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use slippy_rs::{csv_to_tile_csv, CsvTileConfig, Crs};
///
/// let config = CsvTileConfig::new("Geo Shape", 12)
///     .exclude(vec!["Geo Point".into()])
///     .crs(Crs::Wgs84);
///
/// csv_to_tile_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use slippy_rs::{csv_to_tile_csv, CsvTileConfig};
///
/// let config = CsvTileConfig::from_coords("Longitude", "Latitude", 12)
///     .with_tile_path();
///
/// csv_to_tile_csv("bus_stops.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_tile_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvTileConfig,
) -> Result<(), TileError> {
    let file = File::open(csv_path).map_err(|e| TileError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| TileError::CsvError(e.to_string()))?
        .clone();

    // Determine which columns to exclude based on source type
    let (source_indices, mut exclude_indices) =
        match &config.source {
            CoordinateSource::GeometryColumn(col) => {
                let idx = headers.iter().position(|h| h == col).ok_or_else(|| {
                    TileError::CsvError(format!("Geometry column '{}' not found", col))
                })?;
                let mut exclude = HashSet::new();
                exclude.insert(idx);
                (SourceIndices::Geometry(idx), exclude)
            }
            CoordinateSource::CoordinateColumns { x_column, y_column } => {
                let x_idx = headers.iter().position(|h| h == x_column).ok_or_else(|| {
                    TileError::CsvError(format!("X column '{}' not found", x_column))
                })?;
                let y_idx = headers.iter().position(|h| h == y_column).ok_or_else(|| {
                    TileError::CsvError(format!("Y column '{}' not found", y_column))
                })?;
                let mut exclude = HashSet::new();
                exclude.insert(x_idx);
                exclude.insert(y_idx);
                (SourceIndices::Coordinates { x_idx, y_idx }, exclude)
            }
        };

    // Add user-specified exclusions
    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| TileError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    // Write header row
    let mut header_row: Vec<&str> = vec!["tile_id"];
    if config.include_tile_path {
        header_row.push("tile_path");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| TileError::CsvError(e.to_string()))?;

    // Process rows
    for result in reader.records() {
        let record = result.map_err(|e| TileError::CsvError(e.to_string()))?;

        let tiles = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    TileError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                let geom = parse_geometry(geom_str)?;
                geometry_to_tiles(geom, config.zoom_level, config.crs)?
            }
            SourceIndices::Coordinates { x_idx, y_idx } => {
                let x_str = record
                    .get(*x_idx)
                    .ok_or_else(|| {
                        TileError::CsvError(format!("Missing X column at index {}", x_idx))
                    })?
                    .trim();
                let y_str = record
                    .get(*y_idx)
                    .ok_or_else(|| {
                        TileError::CsvError(format!("Missing Y column at index {}", y_idx))
                    })?
                    .trim();

                let x: f64 = x_str.parse().map_err(|_| {
                    TileError::CsvError(format!("Invalid X coordinate: '{}'", x_str))
                })?;
                let y: f64 = y_str.parse().map_err(|_| {
                    TileError::CsvError(format!("Invalid Y coordinate: '{}'", y_str))
                })?;

                vec![coord_to_tile(x, y, config.zoom_level, config.crs)?]
            }
        };

        for tile in tiles {
            let mut row: Vec<String> = vec![tile.id()];

            if config.include_tile_path {
                row.push(tile.path());
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| TileError::CsvError(e.to_string()))?;
        }
    }

    writer
        .flush()
        .map_err(|e| TileError::CsvError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_geojson_point() -> Result<(), TileError> {
        let json = r#"{"type":"Point","coordinates":[-0.1,51.5]}"#;
        let geom = parse_geometry(json)?;
        match geom {
            Geometry::Point(pt) => {
                assert!((pt.x() - (-0.1)).abs() < 0.001);
                assert!((pt.y() - 51.5).abs() < 0.001);
            }
            _ => panic!("Expected Point"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_linestring() -> Result<(), TileError> {
        let json = r#"{"type":"LineString","coordinates":[[-0.1,51.5],[-0.2,51.6]]}"#;
        let geom = parse_geometry(json)?;
        match geom {
            Geometry::LineString(line) => {
                assert_eq!(line.0.len(), 2);
            }
            _ => panic!("Expected LineString"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_wkt_point() -> Result<(), TileError> {
        let wkt = "POINT(-0.1 51.5)";
        let geom = parse_geometry(wkt)?;
        match geom {
            Geometry::Point(pt) => {
                assert!((pt.x() - (-0.1)).abs() < 0.001);
                assert!((pt.y() - 51.5).abs() < 0.001);
            }
            _ => panic!("Expected Point"),
        }
        Ok(())
    }

    #[test]
    fn test_linestring_tiles_are_deduplicated_and_sorted() -> Result<(), TileError> {
        // at zoom 2 these three vertices span two tiles
        let json = r#"{"type":"LineString","coordinates":[[-100.0,40.0],[-95.0,40.0],[10.0,40.0]]}"#;
        let geom = parse_geometry(json)?;
        let tiles = geometry_to_tiles(geom, 2, Crs::Wgs84)?;

        assert_eq!(tiles.len(), 2);
        assert!(tiles.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }

    #[test]
    fn test_polygon_maps_via_centroid() -> Result<(), TileError> {
        let wkt = "POLYGON((-1.0 51.0, 1.0 51.0, 1.0 52.0, -1.0 52.0, -1.0 51.0))";
        let geom = parse_geometry(wkt)?;
        let tiles = geometry_to_tiles(geom, 6, Crs::Wgs84)?;

        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0], Tile::from_lonlat(&(0.0, 51.5), 6)?);
        Ok(())
    }

    #[test]
    fn test_csv_to_tile_csv_geometry_column() -> Result<(), TileError> {
        let dir = tempdir().map_err(|e| TileError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(|e| TileError::IoError(e.to_string()))?;
        writeln!(file, "ASSET_ID,TYPE,geometry").map_err(|e| TileError::IoError(e.to_string()))?;
        writeln!(
            file,
            "CDT123,Pipe,\"{{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[-0.1,51.5]}}\""
        )
        .map_err(|e| TileError::IoError(e.to_string()))?;

        let config = CsvTileConfig::new("geometry", 12).crs(Crs::Wgs84);
        csv_to_tile_csv(&csv_path, &output_path, &config)?;

        assert!(output_path.exists());
        Ok(())
    }

    #[test]
    fn test_csv_from_coords_wgs84() -> Result<(), TileError> {
        let dir = tempdir().map_err(|e| TileError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(|e| TileError::IoError(e.to_string()))?;
        writeln!(file, "StopCode,Name,Longitude,Latitude")
            .map_err(|e| TileError::IoError(e.to_string()))?;
        writeln!(file, "ABC123,Temple Meads,-2.58302,51.44827")
            .map_err(|e| TileError::IoError(e.to_string()))?;
        writeln!(file, "DEF456,Castle Park,-2.59147,51.45460")
            .map_err(|e| TileError::IoError(e.to_string()))?;

        let config = CsvTileConfig::from_coords("Longitude", "Latitude", 12).with_tile_path();
        csv_to_tile_csv(&csv_path, &output_path, &config)?;

        let output =
            std::fs::read_to_string(&output_path).map_err(|e| TileError::IoError(e.to_string()))?;
        assert!(output.contains("tile_id"));
        assert!(output.contains("tile_path"));
        assert!(output.contains("StopCode"));
        assert!(output.contains("Name"));
        assert!(!output.contains(",Longitude"));
        assert!(!output.contains(",Latitude"));

        // Bristol at zoom 12
        let expected = Tile::from_lonlat(&(-2.58302, 51.44827), 12)?;
        assert!(output.contains(&expected.path()));
        Ok(())
    }

    #[test]
    fn test_csv_from_coords_mercator() -> Result<(), TileError> {
        let dir = tempdir().map_err(|e| TileError::IoError(e.to_string()))?;
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).map_err(|e| TileError::IoError(e.to_string()))?;
        writeln!(file, "ID,X,Y").map_err(|e| TileError::IoError(e.to_string()))?;
        writeln!(file, "1,-287555.7,6700000.0").map_err(|e| TileError::IoError(e.to_string()))?;

        let config = CsvTileConfig::from_coords("X", "Y", 10).crs(Crs::Mercator);
        csv_to_tile_csv(&csv_path, &output_path, &config)?;

        assert!(output_path.exists());
        Ok(())
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("test.csv");
        let output_path = dir.path().join("output.csv");

        let mut file = File::create(&csv_path).unwrap();
        writeln!(file, "ID,Description").unwrap();
        writeln!(file, "1,no geometry here").unwrap();

        let config = CsvTileConfig::new("geometry", 12);
        let result = csv_to_tile_csv(&csv_path, &output_path, &config);
        assert!(matches!(result, Err(TileError::CsvError(_))));
    }

    #[test]
    fn test_crs_enum_default() {
        assert_eq!(Crs::default(), Crs::Wgs84);
    }
}
