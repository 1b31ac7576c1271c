//! Value codec
//!
//! Turns any `Serialize` value into the opaque bytes handed to a backend and
//! back. The payload is self-describing serde_json, so structs, sequences,
//! maps and primitives round-trip without a schema at decode time. A short
//! envelope header in front of the payload makes foreign bytes (written by
//! another program, or by an incompatible version) fail to decode instead of
//! being misread.
//!
//! JSON writes `None`, `()` and non-finite floats all as `null`, so values
//! that depend on telling them apart (`Some(None)`, `Some(())`, `NaN`,
//! infinities) are rejected by [`encode`] rather than stored and later decoded
//! as something else.
//!
//! ```text
//! +------+------+---------+-------------------+
//! | 0xCF | 0xAC | version | serde_json payload |
//! +------+------+---------+-------------------+
//! ```

use crate::error::{CacheError, CacheResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

mod lossless;

const MAGIC: [u8; 2] = [0xCF, 0xAC];
const FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1;

/// Serialize a value into an encoded cache payload
///
/// Fails with [`CacheError::Encoding`] for values `decode` could not
/// reproduce exactly.
pub fn encode<T>(value: &T) -> CacheResult<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    lossless::check(value).map_err(|e| CacheError::Encoding(e.to_string()))?;

    let mut bytes = Vec::with_capacity(64);
    bytes.extend_from_slice(&MAGIC);
    bytes.push(FORMAT_VERSION);
    serde_json::to_writer(&mut bytes, value).map_err(|e| CacheError::Encoding(e.to_string()))?;
    Ok(bytes)
}

/// Deserialize an encoded cache payload into `T`
///
/// Fails with [`CacheError::Decoding`] when the header is missing or foreign,
/// the version is unknown, or the payload does not match the shape of `T`.
pub fn decode<T>(bytes: &[u8]) -> CacheResult<T>
where
    T: DeserializeOwned,
{
    if bytes.len() < HEADER_LEN || bytes[..MAGIC.len()] != MAGIC {
        return Err(CacheError::Decoding(
            "payload was not produced by the cache codec".to_string(),
        ));
    }

    let version = bytes[MAGIC.len()];
    if version != FORMAT_VERSION {
        return Err(CacheError::Decoding(format!(
            "unsupported codec version {version} (expected {FORMAT_VERSION})"
        )));
    }

    serde_json::from_slice(&bytes[HEADER_LEN..]).map_err(|e| CacheError::Decoding(e.to_string()))
}
