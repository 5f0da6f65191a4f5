//! # Hashing Utilities
//!
//! SHA-256 is the only hash function in ASTRA, and it is used for exactly
//! one thing: sealing blocks. Every block's `hash` field is the hex-encoded
//! SHA-256 digest of the block's canonical encoding with the hash field
//! itself excluded. The validator recomputes the same digest to detect
//! tampering.
//!
//! One hash function, one purpose. The moment someone proposes adding a
//! second "just in case", point them at this paragraph.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// Returns the 32-byte digest as a fixed-size array. This is the workhorse
/// behind every block seal and every tamper check in the ledger.
///
/// # Example
///
/// ```
/// use astra_ledger::crypto::sha256;
///
/// let digest = sha256(b"ASTRA ledger");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute SHA-256 and return the digest hex-encoded.
///
/// Block hashes are stored and compared as lowercase hex strings (64
/// characters), because that is the form they travel in over the API and
/// the form `block_by_hash` lookups arrive in. Hashing straight to hex
/// keeps the two representations from drifting apart at call sites.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        // SHA-256 of empty string — the canonical test vector everyone
        // should have memorized by now.
        let digest = sha256(b"");
        assert_eq!(
            hex::encode(digest),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_deterministic() {
        let a = sha256(b"astra");
        let b = sha256(b"astra");
        assert_eq!(a, b);
    }

    #[test]
    fn sha256_different_inputs() {
        let a = sha256(b"astra");
        let b = sha256(b"Astra"); // case sensitive!
        assert_ne!(a, b);
    }

    #[test]
    fn sha256_hex_matches_array() {
        let data = b"consistency check";
        assert_eq!(sha256_hex(data), hex::encode(sha256(data)));
        assert_eq!(sha256_hex(data).len(), 64);
    }

    #[test]
    fn sha256_hex_is_lowercase() {
        let h = sha256_hex(b"case check");
        assert_eq!(h, h.to_lowercase());
    }
}
