pub mod tile;
pub mod tile_csv;
pub mod tile_grid;

pub use tile::Tile;
pub use tile_csv::{CoordinateSource, Crs, CsvTileConfig, CsvToTile, csv_to_tile_csv};
pub use tile_grid::{TileGrid, TileGridBuilder};
