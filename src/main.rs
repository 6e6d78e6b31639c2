use slippy_rs::{Tile, TileError};

fn main() -> Result<(), TileError> {
    let lon = -2.2479699500757597;
    let lat = 53.48082746395233;

    let tile = Tile::from_lonlat(&(lon, lat), 12)?;

    println!("Tile ID: {}", tile.id());
    println!("Path: {}", tile.path());
    println!("Column: {}, Row: {}, Zoom: {}", tile.x, tile.y, tile.zoom);

    let restored = Tile::from_tile_id(&tile.id())?;
    println!("Restored: {}", restored);

    Ok(())
}
