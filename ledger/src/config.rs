//! # Protocol Configuration & Constants
//!
//! Every magic value in Astra lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.

// ---------------------------------------------------------------------------
// Chain Constants
// ---------------------------------------------------------------------------

/// Body of the genesis block. The chain's birth certificate — block 0
/// carries this marker instead of a caller payload, which is also why the
/// star lookups skip height 0.
pub const GENESIS_BODY: &str = "First block in the chain - Genesis block";

/// Hash output length in bytes. SHA-256 produces 32-byte digests, which we
/// store hex-encoded (64 characters).
pub const HASH_OUTPUT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Identity Challenge
// ---------------------------------------------------------------------------

/// Suffix appended to every identity challenge message. The full challenge
/// is `"{address}:{timestamp}:{CHALLENGE_SUFFIX}"`.
pub const CHALLENGE_SUFFIX: &str = "starRegistry";

/// How long a pending validation stays redeemable, in seconds. After this
/// window the entry is evicted and the caller must request a new challenge.
pub const VALIDATION_WINDOW_SECS: u64 = 300;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 — the only sane choice for signatures in 2024+.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

/// Ed25519 verifying keys are 32 bytes; addresses are their hex encoding.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes. If yours isn't, something
/// has gone terribly wrong.
pub const SIGNATURE_LENGTH: usize = 64;

/// Protocol version string, assembled at release time.
pub const PROTOCOL_VERSION: &str = "0.1.0";
