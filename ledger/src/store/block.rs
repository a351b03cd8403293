//! # Block Structure
//!
//! A block is one immutable entry in the Astra ledger: an opaque caller
//! payload plus the linkage fields that chain it to its predecessor.
//!
//! ## Record Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  Block                                               │
//! │  ├── hash: String              (hex SHA-256)         │
//! │  ├── height: u64               (position, 0-indexed) │
//! │  ├── body: serde_json::Value   (opaque payload)      │
//! │  ├── time: u64                 (unix seconds)        │
//! │  └── previousBlockHash: String ("" for genesis)      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! The digest covers the block's canonical JSON serialization with the
//! `hash` field set to the empty string. Everything else — height, body,
//! time, previous link — is covered, so flipping a single bit of any field
//! changes the digest. The store fills `hash` in as the final step before
//! persisting; a block whose stored hash no longer matches its recomputed
//! one has been tampered with.
//!
//! The body is never interpreted here beyond serialization. The one
//! exception is presentation: [`Block::decorated`] produces a copy with
//! the star's hex-encoded story decoded for display, which is a read-path
//! garnish and never written back to the store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::crypto::sha256_hex;

/// A single ledger entry. Immutable once its hash is computed and stored.
///
/// Field order matters: the canonical serialization (and therefore the
/// hash) follows the declaration order below. Reordering fields is a
/// chain-breaking change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Hex-encoded SHA-256 of this block's canonical serialization with
    /// `hash` itself cleared. Empty until the block is finalized.
    pub hash: String,
    /// Position in the chain. Assigned by the store, never by the caller.
    pub height: u64,
    /// Opaque caller payload. The store passes it through hashing and
    /// serialization without depending on its shape.
    pub body: Value,
    /// Unix timestamp in seconds, assigned at append time.
    pub time: u64,
    /// Hash of the block at `height - 1`. Empty string for genesis.
    #[serde(rename = "previousBlockHash")]
    pub previous_block_hash: String,
}

impl Block {
    /// Build an unfinalized block: all linkage fields present, hash empty.
    ///
    /// The store calls [`Block::compute_hash`] and fills `hash` in before
    /// persisting; nothing outside the store should finalize blocks.
    pub fn unhashed(height: u64, body: Value, time: u64, previous_block_hash: String) -> Self {
        Block {
            hash: String::new(),
            height,
            body,
            time,
            previous_block_hash,
        }
    }

    /// Recompute the content hash from the block's current fields.
    ///
    /// Deterministic: the same height, body, time, and previous link always
    /// produce the same digest, regardless of what `hash` currently holds.
    /// Use this both to finalize a new block and to re-check a stored one.
    pub fn compute_hash(&self) -> String {
        let probe = Block {
            hash: String::new(),
            ..self.clone()
        };
        // Serializing a Value-bodied struct to JSON cannot fail in practice;
        // an empty preimage would surface immediately as a hash mismatch.
        let canonical = serde_json::to_vec(&probe).unwrap_or_default();
        sha256_hex(&canonical)
    }

    /// Whether the stored hash matches the recomputed one.
    pub fn is_self_consistent(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// The address declared by this block's payload, if any.
    ///
    /// Only blocks carrying a star registration have one; the genesis
    /// marker and any other payload shape yield `None`.
    pub fn payload_address(&self) -> Option<&str> {
        self.body.get("address")?.as_str()
    }

    /// A copy of this block with the star's story decoded for display.
    ///
    /// If the payload carries `star.story` as a hex string that decodes to
    /// valid UTF-8, the copy gains a sibling `storyDecoded` field. The
    /// original block is untouched and the decoration is never persisted —
    /// it would change the hash.
    pub fn decorated(&self) -> Block {
        let mut copy = self.clone();

        let decoded = copy
            .body
            .get("star")
            .and_then(|star| star.get("story"))
            .and_then(|story| story.as_str())
            .and_then(|story| hex::decode(story).ok())
            .and_then(|bytes| String::from_utf8(bytes).ok());

        if let (Some(decoded), Some(star)) = (
            decoded,
            copy.body.get_mut("star").and_then(|s| s.as_object_mut()),
        ) {
            star.insert("storyDecoded".to_string(), Value::String(decoded));
        }

        copy
    }
}
