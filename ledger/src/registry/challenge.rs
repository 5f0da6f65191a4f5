//! # Challenge Strings
//!
//! An ownership challenge is a plain string the caller signs with the key
//! behind their address:
//!
//! ```text
//! <address>:<unixSeconds>:starRegistry
//! ```
//!
//! The format is a wire contract — external signers reproduce it
//! byte-for-byte, so issuing must never get creative with it. It is also
//! stateless: the issuance timestamp lives *inside* the string, which is
//! why the registry keeps no server-side table of outstanding challenges.
//! Expiry is enforced at submission time from the embedded timestamp, and
//! the signature requirement keeps the timestamp honest — backdating or
//! forward-dating a challenge changes the bytes being signed.

use thiserror::Error;

use crate::config::CHALLENGE_DOMAIN_TAG;

/// Challenge string parsing failure. One bucket on purpose: the caller
/// either produced the documented format or they didn't.
#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("challenge string is malformed")]
    Malformed,
}

/// A parsed ownership challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    /// The address the challenge was issued for.
    pub address: String,
    /// Unix seconds at issuance, as embedded in the string.
    pub issued_at: u64,
}

impl Challenge {
    /// Render the exact wire form of a challenge issued now-ish.
    pub fn render(address: &str, issued_at: u64) -> String {
        format!("{}:{}:{}", address, issued_at, CHALLENGE_DOMAIN_TAG)
    }

    /// Parse a challenge string back into its parts.
    ///
    /// Parsing splits from the right, so an address that itself contains
    /// `:` cannot shift the timestamp field. The trailing domain tag and a
    /// parseable unix timestamp are both required.
    pub fn parse(challenge: &str) -> Result<Self, ChallengeError> {
        let mut parts = challenge.rsplitn(3, ':');
        let tag = parts.next().ok_or(ChallengeError::Malformed)?;
        let timestamp = parts.next().ok_or(ChallengeError::Malformed)?;
        let address = parts.next().ok_or(ChallengeError::Malformed)?;

        if tag != CHALLENGE_DOMAIN_TAG || address.is_empty() {
            return Err(ChallengeError::Malformed);
        }

        let issued_at: u64 = timestamp.parse().map_err(|_| ChallengeError::Malformed)?;

        Ok(Challenge {
            address: address.to_string(),
            issued_at,
        })
    }
}
