//! # Cryptographic Primitives for ASTRA
//!
//! The ledger treats cryptography as an external collaborator: a hash
//! function and a signature scheme with documented contracts, consumed as
//! opaque black boxes. This module is where those boxes live.
//!
//! We deliberately chose boring, well-audited cryptography:
//!
//! - **SHA-256** for block digests — the ledger's tamper-evidence anchor.
//! - **Ed25519** for ownership proofs — fast, deterministic, and nobody
//!   has broken it.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Everything here is a thin, type-safe wrapper around audited
//! implementations. If you're tempted to optimize these functions, please
//! reconsider. Then reconsider again. Then go read about timing attacks
//! and come back when you've lost the urge.

pub mod hash;
pub mod keys;
pub mod signatures;

// Re-export the things people actually need so they don't have to memorize
// our module hierarchy.
pub use hash::{sha256, sha256_hex};
pub use keys::{AstraKeypair, AstraPublicKey, AstraSignature};
pub use signatures::{verify_address, SignatureError};
