//! # Hashing Utilities
//!
//! One hash function, used everywhere a block digest is needed: SHA-256.
//! The chain's tamper-evidence rests entirely on this digest, so we keep
//! the surface tiny — bytes in, digest out — and put all canonicalization
//! decisions (what exactly gets hashed) next to the block type instead.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data.
///
/// Returns the 32-byte digest as a fixed-size array.
///
/// # Example
///
/// ```
/// use astra_ledger::crypto::sha256;
///
/// let digest = sha256(b"astra");
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
/// This is the form block hashes take on disk and over the wire: a
/// 64-character lowercase hex string. Keeping the encoding here means no
/// call site ever hex-encodes a digest by hand.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}
