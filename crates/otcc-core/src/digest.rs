//! # Content Digest
//!
//! SHA-256 digests used to fingerprint assessment outputs. Two runs over the
//! same documents and catalog produce identical control results, so their
//! digests match; a reviewer can compare two exported reports without
//! diffing the evidence by hand.

use sha2::{Digest, Sha256};

/// Compute a lowercase SHA-256 hex string over `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
