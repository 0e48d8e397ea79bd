//! Content hashing utilities.

use sha2::{Digest, Sha256};

/// SHA-256 digest of arbitrary bytes.
///
/// Used for the whole-file short-circuit: byte-identical inputs never need a
/// structural comparison.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}
