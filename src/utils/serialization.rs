// Bincode transport encoding for transactions and blocks.
// Header signing/hashing bytes never go through here; see Header::to_bytes.
use crate::error::Result;

/// Serialize data using bincode 2.0 with standard configuration
pub fn serialize<T: bincode::Encode>(data: &T) -> Result<Vec<u8>> {
    let config = bincode::config::standard();
    let bytes = bincode::encode_to_vec(data, config)?;
    Ok(bytes)
}

/// Deserialize data using bincode 2.0 with standard configuration
pub fn deserialize<T: bincode::Decode<()>>(bytes: &[u8]) -> Result<T> {
    let config = bincode::config::standard();
    let (data, _) = bincode::decode_from_slice(bytes, config)?;
    Ok(data)
}
