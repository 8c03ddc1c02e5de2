//! Manifest decoding.

use serde_json::Value;

use crate::error::{Result, VcsError};

/// Parse a JSON document fetched from `url`. The URL is only used to give
/// decode errors some context.
pub fn parse_json(raw: &str, url: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|source| VcsError::Decode {
        url: url.to_string(),
        source,
    })
}
