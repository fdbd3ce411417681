use branchguard_types::{ApiError, Collection};
use serde::de::DeserializeOwned;

const BOM: char = '\u{feff}';

/// Drop a leading UTF-8 byte-order mark, if any.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Parse a list response body and return its `value` array.
///
/// A body without `value` is an empty collection.
pub fn decode_collection<T: DeserializeOwned>(url: &str, body: &str) -> Result<Vec<T>, ApiError> {
    let collection: Collection<T> =
        serde_json::from_str(strip_bom(body)).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })?;
    Ok(collection.value)
}
