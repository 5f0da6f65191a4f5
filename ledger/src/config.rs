//! # Protocol Configuration & Constants
//!
//! Every magic number in ASTRA lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! The challenge window and domain tag are contract-level values: external
//! verifiers reproduce the challenge string byte-for-byte, so changing
//! either of them breaks every wallet integration in one stroke.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The full version string, assembled at compile time so we don't allocate
/// for something this trivial at runtime.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Ownership Proof
// ---------------------------------------------------------------------------

/// Domain tag appended to every ownership challenge. Keeps a signature over
/// a star-registry challenge from being replayed as a signature over
/// anything else. External signers expect exactly this spelling.
pub const CHALLENGE_DOMAIN_TAG: &str = "starRegistry";

/// How long a signed challenge stays valid. 5 minutes is generous — if the
/// wallet hasn't produced a signature by then, the user walked away.
pub const CHALLENGE_WINDOW: Duration = Duration::from_secs(300);

/// Challenge window as whole seconds — because the embedded timestamp is a
/// unix-seconds integer, not a Duration. Keep in sync with CHALLENGE_WINDOW.
pub const CHALLENGE_WINDOW_SECS: u64 = 300;

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Marker text carried in the genesis block's body. The genesis block owns
/// no star and belongs to no address; it exists so every later block has
/// something to link to.
pub const GENESIS_MARKER: &str = "Genesis Block";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 — deterministic signatures, 128-bit security, no k-value
/// footguns. Addresses are hex-encoded verifying keys of this scheme.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Public (verifying) key length in bytes. This is also the decoded length
/// of every valid address.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes. If yours isn't, something
/// has gone terribly wrong.
pub const SIGNATURE_LENGTH: usize = 64;

/// Block digests are SHA-256. 32-byte output, hex-encoded to 64 chars in
/// the stored `hash` field.
pub const HASH_OUTPUT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Network Parameters
// ---------------------------------------------------------------------------

/// Default REST API port.
pub const DEFAULT_RPC_PORT: u16 = 9851;

/// Default metrics (Prometheus) port.
pub const DEFAULT_METRICS_PORT: u16 = 9852;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn challenge_window_matches_seconds_constant() {
        // If these drift apart, expiry checks and documentation disagree.
        assert_eq!(CHALLENGE_WINDOW.as_secs(), CHALLENGE_WINDOW_SECS);
    }

    #[test]
    fn domain_tag_has_no_separator() {
        // The challenge format is colon-delimited; a colon inside the tag
        // would make the string ambiguous to parse.
        assert!(!CHALLENGE_DOMAIN_TAG.contains(':'));
        assert!(!CHALLENGE_DOMAIN_TAG.is_empty());
    }

    #[test]
    fn crypto_parameter_sizes() {
        assert_eq!(VERIFYING_KEY_LENGTH, 32);
        assert_eq!(SIGNATURE_LENGTH, 64);
        assert_eq!(HASH_OUTPUT_LENGTH, 32);
    }

    #[test]
    fn ports_are_distinct() {
        assert_ne!(DEFAULT_RPC_PORT, DEFAULT_METRICS_PORT);
    }
}
