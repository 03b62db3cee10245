//! [`ConfigMap`] to canonical JSON bytes.

use crate::error::EncodeError;
use crate::value::ConfigMap;

/// Encode `map` as JSON with two-space indentation.
///
/// Keys are written in the map's iteration order.
///
/// # Errors
///
/// Returns an [`EncodeError`] if serialization fails, which does not happen
/// for trees built from decoded documents.
pub fn encode(map: &ConfigMap) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec_pretty(map)?)
}
