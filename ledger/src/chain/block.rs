//! # Block Structure
//!
//! A block is the atomic unit of the ledger: an immutable-once-sealed
//! record carrying its position, its payload, and the cryptographic
//! linkage that makes tampering evident.
//!
//! ## Block Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Block                                               │
//! │  ├── height: u64            (position in the chain)  │
//! │  ├── timestamp: u64         (unix seconds at append) │
//! │  ├── previous_hash: Option<String>  (None = genesis) │
//! │  ├── hash: String           (hex SHA-256, sealed)    │
//! │  └── body: String           (hex-encoded JSON)       │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! The digest covers exactly `{height, timestamp, previous_hash, body}`,
//! serialized as canonical JSON. The `hash` field itself is excluded — it
//! is computed once at seal time and never recomputed on the stored block.
//! The validator recomputes the digest from the other fields and compares.
//!
//! ## Body Encoding
//!
//! The body is opaque to the chain: an arbitrary JSON payload, serialized
//! and hex-encoded at construction time, decodable on demand. The chain
//! never interprets it except in `stars_by_address`, which decodes each
//! body and keeps the ones that parse as a [`StarRecord`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::config::GENESIS_MARKER;
use crate::crypto::hash::sha256_hex;

/// Errors from block construction and body decoding.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("failed to encode block body: {0}")]
    BodyEncode(#[from] serde_json::Error),

    #[error("block body is not decodable: {0}")]
    BodyDecode(String),
}

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// A sealed ledger block.
///
/// Blocks are immutable after construction: the constructor computes the
/// hash over the other fields and from then on nothing legitimately
/// changes. Any field that *does* change afterwards is exactly what the
/// validator exists to catch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (0-indexed, genesis = 0).
    pub height: u64,
    /// Unix timestamp in seconds, set at append time.
    pub timestamp: u64,
    /// Hash of the immediately preceding block. `None` only for genesis.
    pub previous_hash: Option<String>,
    /// Hex SHA-256 digest over the other four fields, set at seal time.
    pub hash: String,
    /// Hex-encoded JSON payload.
    pub body: String,
}

/// The decoded form of a star block's body: an address and the star data
/// it claimed. The star payload stays opaque JSON — the ledger records
/// claims, it doesn't do astronomy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Hex-encoded Ed25519 address of the owner.
    pub address: String,
    /// Arbitrary star data as submitted (e.g. `{dec, ra, story}`).
    pub star: serde_json::Value,
}

impl StarRecord {
    /// Whether this record actually carries star data.
    ///
    /// `stars_by_address` only returns records with a non-empty payload —
    /// a null, empty-object, or empty-string star is a claim of nothing.
    pub fn has_star(&self) -> bool {
        match &self.star {
            serde_json::Value::Null => false,
            serde_json::Value::String(s) => !s.is_empty(),
            serde_json::Value::Object(m) => !m.is_empty(),
            serde_json::Value::Array(a) => !a.is_empty(),
            _ => true,
        }
    }
}

/// Genesis body marker. The genesis block belongs to no address and owns
/// no star; its body is this fixed tag.
#[derive(Debug, Serialize, Deserialize)]
struct GenesisBody {
    data: String,
}

impl Block {
    /// Construct and seal a new block.
    ///
    /// The timestamp is taken from the system clock at call time; the hash
    /// is computed over the finished fields before the block is returned,
    /// so callers never see a half-built block.
    ///
    /// This does NOT link or store the block — chain linkage is the
    /// [`ChainStore`](super::store::ChainStore)'s job, and it is the only
    /// caller outside of tests.
    pub fn new<T: Serialize>(
        height: u64,
        previous_hash: Option<String>,
        payload: &T,
    ) -> Result<Self, BlockError> {
        let body = encode_body(payload)?;
        let timestamp = unix_now_secs();
        let hash = compute_block_hash(height, timestamp, previous_hash.as_deref(), &body);

        Ok(Block {
            height,
            timestamp,
            previous_hash,
            hash,
            body,
        })
    }

    /// Construct the genesis block: height 0, no previous hash, fixed
    /// marker body.
    pub fn genesis() -> Self {
        let body = GenesisBody {
            data: GENESIS_MARKER.to_string(),
        };
        Self::new(0, None, &body).expect("genesis body encoding is infallible")
    }

    /// Recompute this block's digest from its own fields.
    ///
    /// Use this to verify that the stored `hash` matches the actual
    /// content. On an untampered block the result equals `self.hash`.
    pub fn compute_hash(&self) -> String {
        compute_block_hash(
            self.height,
            self.timestamp,
            self.previous_hash.as_deref(),
            &self.body,
        )
    }

    /// Decode the body back into a typed payload.
    ///
    /// Fails if the body isn't valid hex, isn't valid JSON, or doesn't
    /// match the requested shape — which is how the genesis block falls
    /// out of [`StarRecord`] scans naturally.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T, BlockError> {
        let bytes =
            hex::decode(&self.body).map_err(|e| BlockError::BodyDecode(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| BlockError::BodyDecode(e.to_string()))
    }

    /// Whether this is the genesis block (sentinel previous hash).
    pub fn is_genesis(&self) -> bool {
        self.previous_hash.is_none()
    }
}

// ---------------------------------------------------------------------------
// Hash & Body Encoding
// ---------------------------------------------------------------------------

/// The exact encoded form a block digest covers. Field order matters:
/// serde_json emits struct fields in declaration order, which makes this
/// encoding canonical as long as nobody reorders the fields below.
#[derive(Serialize)]
struct DigestView<'a> {
    height: u64,
    timestamp: u64,
    previous_hash: Option<&'a str>,
    body: &'a str,
}

/// Compute the hex SHA-256 digest of a block's sealed form.
///
/// Covers height, timestamp, previous_hash, and body — never the stored
/// hash itself.
fn compute_block_hash(
    height: u64,
    timestamp: u64,
    previous_hash: Option<&str>,
    body: &str,
) -> String {
    let view = DigestView {
        height,
        timestamp,
        previous_hash,
        body,
    };
    let encoded = serde_json::to_vec(&view).unwrap_or_default();
    sha256_hex(&encoded)
}

/// Serialize a payload to JSON and hex-encode it for storage.
fn encode_body<T: Serialize>(payload: &T) -> Result<String, BlockError> {
    let bytes = serde_json::to_vec(payload)?;
    Ok(hex::encode(bytes))
}

/// Current unix time in whole seconds.
fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn genesis_block_properties() {
        let genesis = Block::genesis();
        assert_eq!(genesis.height, 0);
        assert!(genesis.previous_hash.is_none());
        assert!(genesis.is_genesis());
        assert_eq!(genesis.hash, genesis.compute_hash());
    }

    #[test]
    fn genesis_body_decodes_to_marker() {
        let genesis = Block::genesis();
        let decoded: serde_json::Value = genesis.decode_body().expect("decodable body");
        assert_eq!(decoded, json!({ "data": "Genesis Block" }));
    }

    #[test]
    fn genesis_body_is_not_a_star_record() {
        // stars_by_address relies on this: the genesis body has no
        // `address` field, so it never parses as a StarRecord.
        let genesis = Block::genesis();
        assert!(genesis.decode_body::<StarRecord>().is_err());
    }

    #[test]
    fn sealed_hash_matches_recomputation() {
        let payload = json!({ "address": "abc", "star": { "dec": "68°", "ra": "16h" } });
        let block = Block::new(3, Some("aa".repeat(32)), &payload).expect("block");
        assert_eq!(block.hash, block.compute_hash());
        assert_eq!(block.hash.len(), 64);
    }

    #[test]
    fn tampered_body_changes_recomputed_hash() {
        let mut block = Block::new(1, Some("ab".repeat(32)), &json!({"x": 1})).expect("block");
        let sealed = block.hash.clone();
        block.body = hex::encode(br#"{"x":2}"#);
        assert_ne!(block.compute_hash(), sealed);
    }

    #[test]
    fn tampered_previous_hash_changes_recomputed_hash() {
        let mut block = Block::new(1, Some("ab".repeat(32)), &json!({"x": 1})).expect("block");
        let sealed = block.hash.clone();
        block.previous_hash = Some("cd".repeat(32));
        assert_ne!(block.compute_hash(), sealed);
    }

    #[test]
    fn digest_excludes_stored_hash() {
        // Overwriting the hash field must not change what the digest
        // computes to — the digest covers everything *but* the hash.
        let mut block = Block::new(2, None, &json!({"y": true})).expect("block");
        let recomputed_before = block.compute_hash();
        block.hash = "00".repeat(32);
        assert_eq!(block.compute_hash(), recomputed_before);
    }

    #[test]
    fn body_roundtrips_through_encoding() {
        let payload = json!({ "address": "deadbeef", "star": { "story": "found it" } });
        let block = Block::new(1, None, &payload).expect("block");
        let decoded: serde_json::Value = block.decode_body().expect("decodable");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn undecodable_body_is_an_error() {
        let mut block = Block::new(1, None, &json!({})).expect("block");
        block.body = "not hex!".to_string();
        assert!(block.decode_body::<serde_json::Value>().is_err());
    }

    #[test]
    fn star_record_emptiness() {
        let full = StarRecord {
            address: "aa".into(),
            star: json!({ "dec": "68°", "ra": "16h", "story": "mine" }),
        };
        assert!(full.has_star());

        for empty in [json!(null), json!(""), json!({}), json!([])] {
            let record = StarRecord {
                address: "aa".into(),
                star: empty,
            };
            assert!(!record.has_star());
        }
    }

    #[test]
    fn block_serialization_roundtrip() {
        let block = Block::new(5, Some("ff".repeat(32)), &json!({"z": [1, 2, 3]})).expect("block");
        let encoded = serde_json::to_string(&block).expect("serialize");
        let recovered: Block = serde_json::from_str(&encoded).expect("deserialize");
        assert_eq!(block, recovered);
    }
}
