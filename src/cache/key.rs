// Cache key derivation
// Author: kelexine (https://github.com/kelexine)
//
// Key scheme v1: "<endpoint path>:<sha256 hex>", where the digest covers the
// compact JSON object of the request parameters with keys in ascending byte
// order. The API key is not part of the parameters and never hashed.
// Changing any of this invalidates every stored entry.

use crate::error::Result;
use crate::places::{Endpoint, Params};
use sha2::{Digest, Sha256};

/// Derive the cache key for a request to `endpoint` with `params`.
pub fn cache_key(endpoint: Endpoint, params: &Params) -> Result<String> {
    // Params is backed by a BTreeMap, so serialization is already canonical
    let canonical = serde_json::to_string(params)?;

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());

    Ok(format!("{}:{:x}", endpoint.path(), hasher.finalize()))
}
