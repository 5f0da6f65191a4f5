//! # Chain Validator
//!
//! Read-only full traversal of the block sequence, producing a complete
//! report of every integrity problem found. Two things can go wrong:
//!
//! - **Tampering** — a block's stored hash no longer matches the digest
//!   recomputed from its own fields. Someone edited a sealed block.
//! - **Broken linkage** — a block's `previous_hash` doesn't equal the
//!   actual hash of the block before it. The chain has been spliced.
//!
//! The scan deliberately does not fail fast: the caller gets every
//! violation in one pass, in chain order. An empty report is the
//! invariant the store's append path depends on — `append` refuses to
//! build on anything this function complains about.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::block::Block;

/// A single integrity violation found during a chain scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The block's content no longer matches its sealed hash.
    Tampered {
        height: u64,
        /// The (now untrustworthy) hash stored on the tampered block.
        stored_hash: String,
    },
    /// The block does not link to its actual predecessor.
    BrokenLink {
        height: u64,
        /// The predecessor hash the chain actually has at this point.
        expected: Option<String>,
        /// The previous_hash the block claims.
        found: Option<String>,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Tampered {
                height,
                stored_hash,
            } => write!(f, "block {} tampered: stored hash {}", height, stored_hash),
            Violation::BrokenLink {
                height,
                expected,
                found,
            } => write!(
                f,
                "block {} linkage broken: expected previous hash {}, found {}",
                height,
                expected.as_deref().unwrap_or("<none>"),
                found.as_deref().unwrap_or("<none>"),
            ),
        }
    }
}

/// Scan a chain snapshot for tampering and linkage breaks.
///
/// Non-mutating, no fail-fast. For each block in order the digest is
/// recomputed from the block's own fields and compared to the stored
/// hash; separately, the previous block's hash is tracked across the
/// iteration (starting from the genesis sentinel, `None`) and compared to
/// each block's `previous_hash` claim.
///
/// Linkage is checked against the *stored* hash of the predecessor, not
/// its recomputed one — a tampered block yields one `Tampered` violation
/// for itself, not a cascade of `BrokenLink`s for every block after it.
///
/// Returns all violations in chain order; empty means fully consistent.
pub fn validate(chain: &[Block]) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut previous: Option<&str> = None;

    for block in chain {
        if block.compute_hash() != block.hash {
            violations.push(Violation::Tampered {
                height: block.height,
                stored_hash: block.hash.clone(),
            });
        }

        if block.previous_hash.as_deref() != previous {
            violations.push(Violation::BrokenLink {
                height: block.height,
                expected: previous.map(str::to_string),
                found: block.previous_hash.clone(),
            });
        }

        previous = Some(block.hash.as_str());
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Builds a well-linked chain of `n` blocks on top of genesis.
    fn build_chain(n: usize) -> Vec<Block> {
        let mut chain = vec![Block::genesis()];
        for i in 1..n {
            let previous = chain.last().expect("non-empty").hash.clone();
            let block = Block::new(i as u64, Some(previous), &json!({ "n": i })).expect("block");
            chain.push(block);
        }
        chain
    }

    #[test]
    fn empty_chain_is_valid() {
        assert!(validate(&[]).is_empty());
    }

    #[test]
    fn fresh_chain_is_valid() {
        let chain = build_chain(5);
        assert!(validate(&chain).is_empty());
    }

    #[test]
    fn tampered_body_is_reported_once() {
        let mut chain = build_chain(4);
        chain[2].body = hex::encode(br#"{"forged":true}"#);

        let report = validate(&chain);
        assert_eq!(
            report,
            vec![Violation::Tampered {
                height: 2,
                stored_hash: chain[2].hash.clone(),
            }]
        );
    }

    #[test]
    fn broken_linkage_is_reported() {
        let mut chain = build_chain(4);
        chain[3].previous_hash = Some("00".repeat(32));
        // Re-seal so only the linkage is wrong, not the digest.
        chain[3].hash = chain[3].compute_hash();

        let report = validate(&chain);
        assert_eq!(report.len(), 1);
        assert!(matches!(
            &report[0],
            Violation::BrokenLink { height: 3, .. }
        ));
    }

    #[test]
    fn genesis_with_previous_hash_is_a_linkage_violation() {
        let mut chain = build_chain(2);
        chain[0].previous_hash = Some("11".repeat(32));
        chain[0].hash = chain[0].compute_hash();

        let report = validate(&chain);
        // Block 0 breaks the sentinel rule; block 1 now links to a hash
        // that changed when block 0 was re-sealed.
        assert!(report
            .iter()
            .any(|v| matches!(v, Violation::BrokenLink { height: 0, .. })));
    }

    #[test]
    fn scan_does_not_stop_at_first_violation() {
        let mut chain = build_chain(6);
        chain[1].body = hex::encode(b"oops");
        chain[4].body = hex::encode(b"oops again");

        let report = validate(&chain);
        let heights: Vec<u64> = report
            .iter()
            .map(|v| match v {
                Violation::Tampered { height, .. } => *height,
                Violation::BrokenLink { height, .. } => *height,
            })
            .collect();
        assert_eq!(heights, vec![1, 4]);
    }

    #[test]
    fn tampering_does_not_cascade_into_linkage_noise() {
        // Editing one block's body must produce exactly one violation:
        // successors still link to the stored (sealed) hash, which is
        // unchanged.
        let mut chain = build_chain(5);
        chain[2].body = hex::encode(b"edited");

        let report = validate(&chain);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn violation_display_names_the_block() {
        let v = Violation::Tampered {
            height: 7,
            stored_hash: "ab".repeat(32),
        };
        let rendered = v.to_string();
        assert!(rendered.contains("block 7"));
        assert!(rendered.contains(&"ab".repeat(32)));
    }
}
