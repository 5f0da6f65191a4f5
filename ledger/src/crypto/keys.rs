//! # Key Management
//!
//! Ed25519 keypair generation and serialization for ASTRA addresses.
//!
//! The ledger itself never generates keys — addresses and signatures arrive
//! pre-formed from external wallets. This module exists for the things that
//! *do* need keys in-process: demo tooling and the test suites that have to
//! produce real signatures to exercise the ownership-proof path.
//!
//! ## Addresses
//!
//! An ASTRA address is simply the hex encoding of a 32-byte Ed25519
//! verifying key. No checksums, no bech32, no ceremony. If the hex doesn't
//! decode to a valid curve point, the address cannot verify anything and
//! every proof for it fails.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (thanks, ed25519-dalek).
//! - Key generation uses the OS RNG. If your OS RNG is broken, you have
//!   bigger problems than ASTRA.
//! - Key bytes are never logged. If you add logging to this module,
//!   you will be asked to leave.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during key operations.
///
/// Intentionally vague about *why* something failed — leaking details
/// about key material through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// An Ed25519 keypair behind an ASTRA address.
///
/// ## Serialization
///
/// `AstraKeypair` intentionally does NOT implement `Serialize`/
/// `Deserialize`. Serializing private keys should be a deliberate,
/// conscious act, not something that happens because someone shoved a
/// keypair into a JSON response. Use `secret_key_bytes()` explicitly.
///
/// # Examples
///
/// ```
/// use astra_ledger::crypto::AstraKeypair;
///
/// let kp = AstraKeypair::generate();
/// let sig = kp.sign(b"register this star");
/// assert!(kp.public_key().verify(b"register this star", &sig));
/// ```
#[derive(Clone)]
pub struct AstraKeypair {
    signing_key: SigningKey,
}

/// The public half of an ASTRA identity, safe to share with the world.
///
/// Its hex encoding *is* the on-chain address.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstraPublicKey {
    bytes: [u8; 32],
}

/// An Ed25519 signature over a message.
///
/// 64 bytes, deterministic for a given (key, message) pair. Stored as
/// `Vec<u8>` for serde compatibility, but always exactly 64 bytes. A
/// signature of any other length simply fails verification — no panics,
/// no undefined behavior, just a boolean `false`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstraSignature {
    bytes: Vec<u8>,
}

impl AstraKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Constructs a keypair deterministically from a 32-byte seed.
    ///
    /// Useful for reproducible test fixtures. **Warning**: a weak seed
    /// gives a weak key; outside tests, use [`generate`](Self::generate).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidSecretKey);
        }
        let mut arr = [0u8; SECRET_KEY_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self::from_seed(&arr))
    }

    /// Returns the public key associated with this keypair.
    pub fn public_key(&self) -> AstraPublicKey {
        AstraPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Returns the hex-encoded address for this keypair.
    ///
    /// This is the string that appears in challenges, star records, and
    /// `stars_by_address` lookups.
    pub fn address(&self) -> String {
        self.public_key().to_address()
    }

    /// Sign a message and return an `AstraSignature`.
    ///
    /// Ed25519 signatures are deterministic — the same (key, message)
    /// pair always produces the same signature. No nonce management, no
    /// sleepless nights wondering whether the RNG was seeded at signing
    /// time.
    pub fn sign(&self, message: &[u8]) -> AstraSignature {
        let sig = self.signing_key.sign(message);
        AstraSignature {
            bytes: sig.to_bytes().to_vec(),
        }
    }

    /// Exports the raw 32-byte secret key material.
    ///
    /// **Handle with extreme care.** Don't log it. Don't send it over the
    /// network. Don't store it in a file called "my_keys.txt".
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl AstraPublicKey {
    /// Parse a public key from its hex-encoded address form.
    ///
    /// Fails if the hex is malformed, the wrong length, or does not decode
    /// to a valid Ed25519 point.
    pub fn from_address(address: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(address).map_err(|_| KeyError::InvalidPublicKey)?;
        if bytes.len() != 32 {
            return Err(KeyError::InvalidPublicKey);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        // Reject byte strings that aren't actual curve points up front,
        // rather than letting them fail at verification time.
        VerifyingKey::from_bytes(&arr).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes: arr })
    }

    /// Returns the hex-encoded address form of this key.
    pub fn to_address(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Verify a signature over a message against this key.
    ///
    /// Returns `true` if valid, `false` otherwise. We intentionally don't
    /// distinguish "bad signature" from "bad encoding" — both are just
    /// "nope". Giving attackers a detailed error oracle is a bad idea.
    pub fn verify(&self, message: &[u8], signature: &AstraSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature.bytes.as_slice()) else {
            return false;
        };
        let sig = DalekSignature::from_bytes(&sig_bytes);
        verifying_key.verify(message, &sig).is_ok()
    }
}

impl AstraSignature {
    /// Parse a signature from hex. Length is checked at verification time,
    /// not here — a wrong-length signature is just an invalid signature.
    pub fn from_hex(hex_str: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self {
            bytes: hex::decode(hex_str)?,
        })
    }

    /// Returns the hex encoding of this signature.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for AstraPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AstraPublicKey({})", self.to_address())
    }
}

impl fmt::Debug for AstraSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AstraSignature({})", self.to_hex())
    }
}
