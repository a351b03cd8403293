//! # Identity Verification
//!
//! Ed25519 challenge/response verification for the notary's identity
//! scheme. An address is the hex encoding of an Ed25519 verifying key;
//! proving control of an address means signing the challenge message the
//! node handed out for it.
//!
//! The chain store itself never calls into this module — signature checks
//! belong to the boundary layer that decorates its inputs. It lives in the
//! core crate so that every consumer of the ledger agrees on what an
//! address *is*.
//!
//! We use strict verification. Lenient implementations accept some
//! edge-case signatures that strict ones reject; we don't need to be
//! compatible with anything that gets the cofactor wrong.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

use crate::config::{SIGNATURE_LENGTH, VERIFYING_KEY_LENGTH};

/// Errors during challenge verification.
///
/// Intentionally coarse — we don't tell callers (or attackers) exactly
/// which part of a bad signature was bad.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("address is not a hex-encoded Ed25519 verifying key")]
    InvalidAddress,

    #[error("signature is not {SIGNATURE_LENGTH} hex-encoded bytes")]
    InvalidSignature,

    #[error("signature verification failed")]
    VerificationFailed,
}

/// Verify a hex-encoded Ed25519 signature over a challenge message.
///
/// * `address` — hex encoding of the signer's 32-byte verifying key.
/// * `message` — the challenge string exactly as issued.
/// * `signature` — hex encoding of the 64-byte signature.
///
/// Returns `Ok(())` only if the signature is valid for this address and
/// message. All decode failures map to their own error variants so the
/// boundary layer can distinguish "you sent garbage" from "nope".
pub fn verify_challenge(address: &str, message: &str, signature: &str) -> Result<(), IdentityError> {
    let key_bytes: [u8; VERIFYING_KEY_LENGTH] = hex::decode(address)
        .map_err(|_| IdentityError::InvalidAddress)?
        .try_into()
        .map_err(|_| IdentityError::InvalidAddress)?;
    let verifying_key =
        VerifyingKey::from_bytes(&key_bytes).map_err(|_| IdentityError::InvalidAddress)?;

    let sig_bytes: [u8; SIGNATURE_LENGTH] = hex::decode(signature)
        .map_err(|_| IdentityError::InvalidSignature)?
        .try_into()
        .map_err(|_| IdentityError::InvalidSignature)?;
    let signature = Signature::from_bytes(&sig_bytes);

    verifying_key
        .verify(message.as_bytes(), &signature)
        .map_err(|_| IdentityError::VerificationFailed)
}
