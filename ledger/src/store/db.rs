//! # LedgerDb — Persistent Key-Value Collaborator
//!
//! The persistence layer under the chain store, built on sled's embedded
//! key-value engine. This module knows nothing about blocks as such — it
//! stores opaque byte records keyed by height and offers exactly the
//! capabilities the chain store is written against: point get/put, an
//! insert-if-vacant primitive, and enough ordered iteration to find the
//! highest occupied key.
//!
//! ## Key Layout
//!
//! | Tree     | Key              | Value                       |
//! |----------|------------------|-----------------------------|
//! | `blocks` | `height` (8B BE) | serialized block record     |
//!
//! Heights are stored as big-endian u64 so that sled's lexicographic
//! ordering matches numeric ordering — `last()` is then "the highest
//! height" for free, no dedicated counter key required.
//!
//! ## Durability & Concurrency
//!
//! Every write is flushed before the call returns; a successful put means
//! the record is on disk. sled serializes writes per key and never exposes
//! a partially-written value, so concurrent readers either see the whole
//! record or nothing. `LedgerDb` is cheap to clone and safe to share.

use sled::{Db, Tree};
use std::path::Path;

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Errors that can occur at the key-value layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("malformed height key in store: {0} bytes, expected 8")]
    CorruptKey(usize),
}

pub type DbResult<T> = Result<T, DbError>;

// ---------------------------------------------------------------------------
// LedgerDb
// ---------------------------------------------------------------------------

/// sled-backed record store keyed by block height.
///
/// # Thread Safety
///
/// sled trees support lock-free concurrent reads and atomic per-key
/// writes, so `LedgerDb` can be cloned and shared across threads freely.
/// What sled does *not* provide is any ordering between a read and a
/// subsequent write — the chain store layers its own single-writer
/// discipline on top for appends.
#[derive(Debug, Clone)]
pub struct LedgerDb {
    /// The underlying sled database handle.
    db: Db,
    /// Block records indexed by height (big-endian u64 keys).
    blocks: Tree,
}

impl LedgerDb {
    /// Open or create a database at the given filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Create a temporary database that lives in memory and is cleaned up
    /// when dropped. Ideal for tests — no filesystem side effects.
    pub fn open_temporary() -> DbResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> DbResult<Self> {
        let blocks = db.open_tree("blocks")?;
        Ok(Self { db, blocks })
    }

    /// Fetch the raw record at the given height. `None` if vacant.
    pub fn get(&self, height: u64) -> DbResult<Option<Vec<u8>>> {
        Ok(self
            .blocks
            .get(height.to_be_bytes())?
            .map(|ivec| ivec.to_vec()))
    }

    /// Write a record at the given height, overwriting any existing one.
    ///
    /// The chain store never overwrites live heights through this method —
    /// appends go through [`LedgerDb::insert_if_vacant`]. This is the raw
    /// put from the collaborator contract, and what tests use to corrupt
    /// records in place.
    pub fn put(&self, height: u64, bytes: &[u8]) -> DbResult<()> {
        self.blocks.insert(height.to_be_bytes(), bytes)?;
        self.db.flush()?;
        Ok(())
    }

    /// Atomically write a record at `height` only if the slot is vacant.
    ///
    /// Returns `true` if the record landed, `false` if another writer got
    /// there first. The compare-and-swap happens inside sled, so two racing
    /// writers can never both succeed — one of them sees `false` and must
    /// treat its append as lost.
    pub fn insert_if_vacant(&self, height: u64, bytes: &[u8]) -> DbResult<bool> {
        let outcome =
            self.blocks
                .compare_and_swap(height.to_be_bytes(), None::<&[u8]>, Some(bytes))?;
        match outcome {
            Ok(()) => {
                self.db.flush()?;
                Ok(true)
            }
            Err(_occupied) => Ok(false),
        }
    }

    /// The highest occupied height, or `None` for an empty store.
    ///
    /// Reads the last key in the tree (big-endian keys make that the
    /// numeric maximum) rather than maintaining a counter, so it can never
    /// drift from what is actually stored.
    pub fn last_height(&self) -> DbResult<Option<u64>> {
        match self.blocks.last()? {
            Some((key, _value)) => Ok(Some(decode_height(key.as_ref())?)),
            None => Ok(None),
        }
    }

    /// Number of records currently stored.
    pub fn record_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Decode a big-endian u64 height key.
fn decode_height(key: &[u8]) -> DbResult<u64> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| DbError::CorruptKey(key.len()))?;
    Ok(u64::from_be_bytes(bytes))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
