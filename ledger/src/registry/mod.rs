//! # Star Registry — Ownership Proof Workflow
//!
//! The gate in front of the chain's special append path. Registering a
//! star is a three-step conversation:
//!
//! 1. The caller asks for a challenge for their address. The registry
//!    hands back a timestamped string and remembers nothing.
//! 2. The caller signs the challenge externally, with the key behind the
//!    address. The ledger never sees the key.
//! 3. The caller submits address + challenge + signature + star data. The
//!    registry checks the time window, verifies the signature, and only
//!    then delegates to [`ChainStore::append`].
//!
//! Anything that goes wrong in the append itself propagates unchanged —
//! the registry adds gating, not error translation.

pub mod challenge;

use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::chain::{Block, ChainError, ChainStore, StarRecord};
use crate::config::CHALLENGE_WINDOW_SECS;
use crate::crypto::signatures::verify_address;

pub use challenge::Challenge;

/// Errors from the ownership-proof workflow.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The challenge string could not be parsed for its embedded timestamp.
    #[error("challenge string is malformed")]
    MalformedChallenge,

    /// The proof arrived after the challenge window closed.
    #[error("ownership proof expired: {elapsed}s elapsed, window is {window}s")]
    Expired { elapsed: u64, window: u64 },

    /// The signature does not verify against the address and challenge.
    /// Deliberately detail-free.
    #[error("signature verification failed")]
    SignatureInvalid,

    /// Append-time failure, propagated unchanged from the chain store.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

/// The ownership-proof front door to a [`ChainStore`].
#[derive(Clone)]
pub struct StarRegistry {
    store: Arc<ChainStore>,
}

impl StarRegistry {
    /// Wrap a chain store. The registry holds a shared handle — it is a
    /// collaborator of the store, not its owner.
    pub fn new(store: Arc<ChainStore>) -> Self {
        Self { store }
    }

    /// Issue a challenge string for `address`.
    ///
    /// Stateless: the current unix-seconds timestamp is embedded in the
    /// returned string itself, so there is nothing to store and nothing to
    /// garbage-collect. Issuing twice gives two independently valid
    /// challenges.
    pub fn issue_challenge(&self, address: &str) -> String {
        let challenge = Challenge::render(address, unix_now_secs());
        tracing::debug!(address, "ownership challenge issued");
        challenge
    }

    /// Verify an ownership proof and, on success, append a star block.
    ///
    /// Checks run in order: challenge parse, time window, signature. The
    /// window check only enforces an upper bound — a challenge timestamped
    /// in the future (clock skew) is accepted. On success the appended
    /// block's body is the `{address, star}` record.
    pub fn submit(
        &self,
        address: &str,
        challenge: &str,
        signature: &str,
        star: Value,
    ) -> Result<Block, RegistryError> {
        let parsed =
            Challenge::parse(challenge).map_err(|_| RegistryError::MalformedChallenge)?;

        if let Some(elapsed) = unix_now_secs().checked_sub(parsed.issued_at) {
            if elapsed > CHALLENGE_WINDOW_SECS {
                tracing::debug!(address, elapsed, "ownership proof expired");
                return Err(RegistryError::Expired {
                    elapsed,
                    window: CHALLENGE_WINDOW_SECS,
                });
            }
        }

        verify_address(address, challenge.as_bytes(), signature)
            .map_err(|_| RegistryError::SignatureInvalid)?;

        let record = StarRecord {
            address: address.to_string(),
            star,
        };
        let block = self.store.append(&record)?;
        tracing::info!(address, height = block.height, "star registered");
        Ok(block)
    }
}

/// Current unix time in whole seconds.
fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
