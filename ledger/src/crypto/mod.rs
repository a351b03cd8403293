//! Cryptographic primitives: block hashing and identity verification.

pub mod hash;
pub mod identity;

pub use hash::{sha256, sha256_hex};
pub use identity::{verify_challenge, IdentityError};
