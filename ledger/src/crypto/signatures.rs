//! # Signature Verification
//!
//! The verification half of the ownership-proof contract. The ledger never
//! signs anything — signing happens in external wallets — but it must check
//! that a submitted signature over a challenge string actually belongs to
//! the claimed address.
//!
//! ## Strictness
//!
//! We use `ed25519-dalek`'s strict verification. Some edge-case signatures
//! that lenient implementations accept are rejected here. This is
//! deliberate: stricter is safer, and we don't need to be compatible with
//! legacy implementations that get the cofactor wrong.

use thiserror::Error;

use super::keys::{AstraPublicKey, AstraSignature};

/// Errors during signature verification.
///
/// Intentionally vague — we don't tell attackers why verification failed.
/// A malformed address, a truncated signature, and a forged signature all
/// collapse into the same answer.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,
}

/// Verify a hex-encoded signature over a message against a hex address.
///
/// This is the "I got these strings off the wire and need to check them"
/// entry point: the address and signature arrive exactly as external
/// callers submit them. Decoding failures and verification failures are
/// indistinguishable by design.
///
/// # Arguments
///
/// * `address` — hex-encoded 32-byte Ed25519 verifying key.
/// * `message` — the bytes that were signed (for ownership proofs, the
///   challenge string).
/// * `signature_hex` — hex-encoded 64-byte signature.
pub fn verify_address(
    address: &str,
    message: &[u8],
    signature_hex: &str,
) -> Result<(), SignatureError> {
    let public_key =
        AstraPublicKey::from_address(address).map_err(|_| SignatureError::VerificationFailed)?;
    let signature =
        AstraSignature::from_hex(signature_hex).map_err(|_| SignatureError::VerificationFailed)?;

    if public_key.verify(message, &signature) {
        Ok(())
    } else {
        Err(SignatureError::VerificationFailed)
    }
}
