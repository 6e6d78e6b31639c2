use crate::core::constants::IDENTIFIER_VERSION;
use crate::util::error::TileError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Encodes a tile as an opaque URL-safe Base64 identifier.
///
/// Layout: version byte, zoom byte, column and row as big-endian u32, then a
/// wrapping-add checksum byte over everything before it.
pub fn generate_identifier(zoom: u8, x: u32, y: u32) -> String {
    let mut binary_data = Vec::with_capacity(11);
    binary_data.push(IDENTIFIER_VERSION);
    binary_data.push(zoom);
    binary_data.extend_from_slice(&x.to_be_bytes());
    binary_data.extend_from_slice(&y.to_be_bytes());

    let checksum: u8 = binary_data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    binary_data.push(checksum);

    URL_SAFE_NO_PAD.encode(&binary_data)
}

/// Decodes a tile identifier back into `(version, zoom, x, y)`.
///
/// Validates length, checksum and version. The decoded fields are not
/// checked against the tile grid here; callers construct a tile through the
/// checked path for that.
pub fn decode_identifier(identifier: &str) -> Result<(u8, u8, u32, u32), TileError> {
    let binary_data = URL_SAFE_NO_PAD
        .decode(identifier)
        .map_err(|_| TileError::Base64DecodeError)?;

    if binary_data.len() != 11 {
        return Err(TileError::InvalidIdentifierLength);
    }

    let (data, checksum_bytes) = binary_data.split_at(10);
    let checksum = checksum_bytes[0];

    let calculated_checksum: u8 = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    if calculated_checksum != checksum {
        return Err(TileError::InvalidChecksum);
    }

    let version = data[0];
    if version != IDENTIFIER_VERSION {
        return Err(TileError::UnsupportedVersion(version));
    }

    let zoom = data[1];
    let x_bytes: [u8; 4] = data[2..6]
        .try_into()
        .map_err(|_| TileError::InvalidIdentifierLength)?;
    let y_bytes: [u8; 4] = data[6..10]
        .try_into()
        .map_err(|_| TileError::InvalidIdentifierLength)?;

    Ok((
        version,
        zoom,
        u32::from_be_bytes(x_bytes),
        u32::from_be_bytes(y_bytes),
    ))
}
