//! # ChainStore — the hash-linked ledger
//!
//! Owns every chain operation: height discovery, genesis bootstrap,
//! append, point lookup, the star scans, and integrity validation. All
//! chain invariants are enforced here; [`LedgerDb`] underneath is a dumb
//! record store and the HTTP layer above is formatting.
//!
//! ## Invariants
//!
//! 1. Heights form a contiguous range `0..N` with no gaps.
//! 2. Every stored block's hash matches its recomputed content hash.
//! 3. Every block at height > 0 links to the stored hash at height - 1.
//! 4. Genesis (height 0) has an empty previous link.
//! 5. Stored records are never mutated in place; a failed integrity check
//!    is a detected fault, not something the store repairs.
//!
//! ## The append race, and how it's closed
//!
//! Deriving the next height and writing at it is a read-then-write
//! sequence. Two appends reading the same height before either writes
//! would both target the same key — one block silently lost, the chain
//! broken. Appends are therefore funneled through a single-writer lock,
//! and the write itself lands via compare-and-swap on the vacant slot.
//! The lock serializes the normal path; the CAS guarantees that even a
//! writer that slipped past it (another process, an admin tool) loses
//! loudly with [`ChainError::HeightOccupied`] instead of overwriting.
//!
//! Reads take no lock: stored blocks are immutable and sled never exposes
//! a torn record, so lookups and scans run concurrently with appends.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::block::Block;
use super::db::{DbError, LedgerDb};
use crate::config;

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Failures surfaced by chain operations.
///
/// Missing blocks are *not* errors — lookups return `None` and validation
/// returns [`BlockValidity::Absent`]. These variants cover the write path
/// and genuine store failures.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The store write failed; the block was not persisted and the
    /// in-memory value must not be treated as durable.
    #[error("block {height} was not persisted: {source}")]
    StoreWrite {
        height: u64,
        #[source]
        source: DbError,
    },

    /// The previous block could not be read (or parsed) during append.
    /// Appending without a trustworthy link would corrupt the chain.
    #[error("cannot link: no readable block at height {height}")]
    Linkage { height: u64 },

    /// Another writer landed a block at this height first. The losing
    /// append did not happen and may be retried by the caller.
    #[error("height {height} is already occupied")]
    HeightOccupied { height: u64 },

    /// Append against an empty store. The genesis block must exist first;
    /// call [`ChainStore::bootstrap_if_empty`].
    #[error("store is empty; bootstrap the genesis block first")]
    NotBootstrapped,

    #[error("serialization error: {0}")]
    Serialization(String),

    /// A read against the underlying store failed.
    #[error(transparent)]
    Store(#[from] DbError),
}

pub type ChainResult<T> = Result<T, ChainError>;

// ---------------------------------------------------------------------------
// Validation Results
// ---------------------------------------------------------------------------

/// Outcome of a single-block integrity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockValidity {
    /// Stored hash matches the recomputed content hash.
    Valid,
    /// Stored hash does not match — the record was tampered with or
    /// corrupted after it was written.
    Invalid,
    /// No readable block at that height.
    Absent,
}

/// Result of a whole-chain integrity pass.
///
/// Validation failures are data, not exceptions: the scan never stops at
/// the first fault, and the caller decides what remediation (if any)
/// looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Number of heights examined (the chain height at scan time).
    pub blocks_checked: u64,
    /// Heights that failed a self-hash check, a linkage check, or could
    /// not be read at all. Ascending, deduplicated.
    pub faulty_heights: Vec<u64>,
    /// `true` iff no faults were found.
    pub intact: bool,
}

// ---------------------------------------------------------------------------
// ChainStore
// ---------------------------------------------------------------------------

/// The single-node chain store.
///
/// Cheap to share behind an `Arc`; reads are lock-free and appends are
/// serialized internally. Nothing outside this type writes block keys.
#[derive(Debug)]
pub struct ChainStore {
    db: LedgerDb,
    /// Single-writer discipline for the append path. Held across height
    /// discovery *and* the block write so they behave as one transaction.
    append_lock: Mutex<()>,
}

impl ChainStore {
    /// Open or create a chain store at the given filesystem path.
    ///
    /// Does not bootstrap: an empty store stays empty until
    /// [`ChainStore::bootstrap_if_empty`] runs.
    pub fn open<P: AsRef<Path>>(path: P) -> ChainResult<Self> {
        Ok(Self::new(LedgerDb::open(path)?))
    }

    /// Chain store over a temporary in-memory database. For tests.
    pub fn open_temporary() -> ChainResult<Self> {
        Ok(Self::new(LedgerDb::open_temporary()?))
    }

    /// Wrap an already-open [`LedgerDb`].
    pub fn new(db: LedgerDb) -> Self {
        Self {
            db,
            append_lock: Mutex::new(()),
        }
    }

    // -- Height & bootstrap -------------------------------------------------

    /// Number of blocks currently stored — equivalently, the next insert
    /// position. 0 for an empty store.
    ///
    /// Derived from the highest stored key, the same keying appends use,
    /// so it cannot drift from the actual records. With contiguous heights
    /// (invariant 1) the highest key is the count minus one.
    pub fn height(&self) -> ChainResult<u64> {
        Ok(match self.db.last_height()? {
            Some(top) => top + 1,
            None => 0,
        })
    }

    /// Create and persist the genesis block if the store is empty.
    ///
    /// Idempotent: returns `true` if this call created genesis, `false`
    /// if the chain already had blocks. Safe to call redundantly and from
    /// concurrent bootstrappers — the slot CAS lets exactly one win.
    pub fn bootstrap_if_empty(&self) -> ChainResult<bool> {
        let _writer = self.append_lock.lock();

        if self.height()? > 0 {
            return Ok(false);
        }

        let mut genesis = Block::unhashed(
            0,
            Value::String(config::GENESIS_BODY.to_string()),
            now_secs(),
            String::new(),
        );
        genesis.hash = genesis.compute_hash();

        match self.persist_at_vacant_slot(&genesis) {
            Ok(()) => {
                info!(hash = %genesis.hash, "genesis block persisted at height 0");
                Ok(true)
            }
            // Lost the bootstrap race to another writer: genesis exists,
            // which is all this call promises.
            Err(ChainError::HeightOccupied { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    // -- Append -------------------------------------------------------------

    /// Append a new block carrying the given payload.
    ///
    /// Assigns the next height, stamps the current time, links to the
    /// last block's hash, computes the content hash, and persists the
    /// record. Returns the block exactly as persisted.
    ///
    /// # Errors
    ///
    /// * [`ChainError::NotBootstrapped`] — the store has no genesis yet.
    /// * [`ChainError::Linkage`] — the last block is missing or unreadable;
    ///   appending would break the chain, so it doesn't happen.
    /// * [`ChainError::StoreWrite`] / [`ChainError::HeightOccupied`] — the
    ///   write failed or lost a slot race; the block is not durable.
    pub fn append(&self, payload: Value) -> ChainResult<Block> {
        let _writer = self.append_lock.lock();

        let next = self.height()?;
        if next == 0 {
            return Err(ChainError::NotBootstrapped);
        }

        let link_height = next - 1;
        let last = self
            .db
            .get(link_height)?
            .and_then(|bytes| serde_json::from_slice::<Block>(&bytes).ok())
            .ok_or(ChainError::Linkage {
                height: link_height,
            })?;

        let mut block = Block::unhashed(next, payload, now_secs(), last.hash);
        block.hash = block.compute_hash();

        self.persist_at_vacant_slot(&block)?;
        debug!(height = block.height, hash = %block.hash, "block appended");
        Ok(block)
    }

    /// Serialize a finalized block and land it at its height, failing
    /// loudly if the slot is no longer vacant.
    fn persist_at_vacant_slot(&self, block: &Block) -> ChainResult<()> {
        let bytes =
            serde_json::to_vec(block).map_err(|e| ChainError::Serialization(e.to_string()))?;

        let landed = self
            .db
            .insert_if_vacant(block.height, &bytes)
            .map_err(|source| ChainError::StoreWrite {
                height: block.height,
                source,
            })?;

        if !landed {
            return Err(ChainError::HeightOccupied {
                height: block.height,
            });
        }
        Ok(())
    }

    // -- Lookups ------------------------------------------------------------

    /// Point lookup by height.
    ///
    /// Absence is a normal result, not an error — and so is a record that
    /// no longer parses as a block: that gets logged and reported as
    /// absent, because lookups are advisory and never crash a caller.
    /// (Validation is where an unparseable record becomes a fault.)
    pub fn get_block(&self, height: u64) -> ChainResult<Option<Block>> {
        let Some(bytes) = self.db.get(height)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(block) => Ok(Some(block)),
            Err(err) => {
                warn!(height, %err, "stored record is not a readable block");
                Ok(None)
            }
        }
    }

    /// All blocks whose payload declares the given address, ascending by
    /// height, each decorated with the decoded story.
    ///
    /// Genesis is always excluded — it carries the chain marker, not a
    /// caller payload. This is a full linear scan, O(height) per call;
    /// fine for a bounded single-node ledger, and a secondary index is
    /// deliberately out of scope.
    pub fn get_blocks_by_address(&self, address: &str) -> ChainResult<Vec<Block>> {
        let mut matches = Vec::new();
        for height in 1..self.height()? {
            if let Some(block) = self.get_block(height)? {
                if block.payload_address() == Some(address) {
                    matches.push(block.decorated());
                }
            }
        }
        Ok(matches)
    }

    /// The first block (lowest height, genesis excluded) whose hash equals
    /// the argument, decorated. `None` if no block matches.
    pub fn get_block_by_hash(&self, hash: &str) -> ChainResult<Option<Block>> {
        for height in 1..self.height()? {
            if let Some(block) = self.get_block(height)? {
                if block.hash == hash {
                    return Ok(Some(block.decorated()));
                }
            }
        }
        Ok(None)
    }

    // -- Validation ---------------------------------------------------------

    /// Re-derive the content hash of the stored block at `height` and
    /// compare it to the stored hash.
    ///
    /// Detects tampering with the record itself; it cannot see a broken
    /// link to a neighbor — that's [`ChainStore::validate_chain`]'s job.
    pub fn validate_block(&self, height: u64) -> ChainResult<BlockValidity> {
        Ok(match self.get_block(height)? {
            None => BlockValidity::Absent,
            Some(block) if block.is_self_consistent() => BlockValidity::Valid,
            Some(block) => {
                warn!(
                    height,
                    stored = %block.hash,
                    computed = %block.compute_hash(),
                    "block hash mismatch"
                );
                BlockValidity::Invalid
            }
        })
    }

    /// Full integrity pass over every stored height.
    ///
    /// For each block: the self-hash check, plus the linkage check against
    /// its predecessor (genesis instead gets its empty-link rule checked).
    /// Every fault is collected; the scan never stops early, and a height
    /// that cannot be read at all is itself a fault, never skipped.
    pub fn validate_chain(&self) -> ChainResult<IntegrityReport> {
        let total = self.height()?;
        let mut faults = BTreeSet::new();
        let mut previous: Option<Block> = None;

        for height in 0..total {
            let block = match self.get_block(height) {
                Ok(found) => found,
                Err(err) => {
                    warn!(height, %err, "lookup failed during chain validation");
                    None
                }
            };

            match &block {
                None => {
                    faults.insert(height);
                }
                Some(block) => {
                    if !block.is_self_consistent() {
                        faults.insert(height);
                    }
                    if height == 0 {
                        if !block.previous_block_hash.is_empty() {
                            faults.insert(height);
                        }
                    } else {
                        match &previous {
                            Some(prev) if block.previous_block_hash == prev.hash => {}
                            // Mismatched link, or the predecessor was
                            // unreadable so the link cannot be confirmed.
                            _ => {
                                faults.insert(height);
                            }
                        }
                    }
                }
            }
            previous = block;
        }

        let report = IntegrityReport {
            blocks_checked: total,
            intact: faults.is_empty(),
            faulty_heights: faults.into_iter().collect(),
        };
        if report.intact {
            debug!(blocks = report.blocks_checked, "chain validated, no faults");
        } else {
            warn!(faults = ?report.faulty_heights, "chain validation found faults");
        }
        Ok(report)
    }
}

/// Unix time in whole seconds.
fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bootstrapped() -> ChainStore {
        let store = ChainStore::open_temporary().unwrap();
        assert!(store.bootstrap_if_empty().unwrap());
        store
    }

    fn star_payload(address: &str, story: &str) -> Value {
        json!({
            "address": address,
            "star": {
                "ra": "16h 29m 1.0s",
                "dec": "-26 29' 24.9",
                "story": hex::encode(story),
            }
        })
    }

    /// Rewrite the stored record at `height` with the given mutation,
    /// keeping the originally stored hash (i.e., tampering).
    fn tamper(store: &ChainStore, height: u64, mutate: impl FnOnce(&mut Block)) {
        let mut block = store.get_block(height).unwrap().unwrap();
        mutate(&mut block);
        let bytes = serde_json::to_vec(&block).unwrap();
        store.db.put(height, &bytes).unwrap();
    }

    // -- Bootstrap ----------------------------------------------------------

    #[test]
    fn bootstrap_creates_genesis_once() {
        let store = ChainStore::open_temporary().unwrap();
        assert_eq!(store.height().unwrap(), 0);

        assert!(store.bootstrap_if_empty().unwrap());
        assert_eq!(store.height().unwrap(), 1);

        // Redundant calls are no-ops.
        assert!(!store.bootstrap_if_empty().unwrap());
        assert_eq!(store.height().unwrap(), 1);

        let genesis = store.get_block(0).unwrap().unwrap();
        assert_eq!(genesis.height, 0);
        assert_eq!(genesis.previous_block_hash, "");
        assert_eq!(genesis.body, json!(config::GENESIS_BODY));
        assert!(genesis.is_self_consistent());
        assert!(genesis.time > 0);
    }

    #[test]
    fn append_before_bootstrap_is_rejected() {
        let store = ChainStore::open_temporary().unwrap();
        let err = store.append(json!("too early")).unwrap_err();
        assert!(matches!(err, ChainError::NotBootstrapped));
        assert_eq!(store.height().unwrap(), 0);
    }

    // -- Append & height ----------------------------------------------------

    #[test]
    fn height_counts_blocks_and_lookups_track_it() {
        let store = bootstrapped();
        let appended = 4u64;
        for i in 0..appended {
            store.append(json!({ "n": i })).unwrap();
        }

        assert_eq!(store.height().unwrap(), appended + 1);
        for h in 0..=appended {
            assert!(store.get_block(h).unwrap().is_some(), "height {h} present");
        }
        assert!(store.get_block(appended + 1).unwrap().is_none());
        assert!(store.get_block(999).unwrap().is_none());
    }

    #[test]
    fn appended_blocks_link_back_to_genesis() {
        let store = bootstrapped();
        let first = store.append(json!("one")).unwrap();
        let second = store.append(json!("two")).unwrap();

        let genesis = store.get_block(0).unwrap().unwrap();
        assert_eq!(first.height, 1);
        assert_eq!(second.height, 2);
        assert_eq!(first.previous_block_hash, genesis.hash);
        assert_eq!(second.previous_block_hash, first.hash);
    }

    #[test]
    fn append_returns_the_persisted_record() {
        let store = bootstrapped();
        let returned = store.append(json!({ "k": "v" })).unwrap();
        let stored = store.get_block(1).unwrap().unwrap();
        assert_eq!(returned, stored);
        assert!(stored.is_self_consistent());
        assert!(stored.time > 0);
    }

    #[test]
    fn append_refuses_unreadable_link() {
        let store = bootstrapped();
        store.append(json!("one")).unwrap();
        // Destroy the record at the chain tip; the next append must not
        // proceed with a missing-link block.
        store.db.put(1, b"{ not a block").unwrap();

        let err = store.append(json!("two")).unwrap_err();
        assert!(matches!(err, ChainError::Linkage { height: 1 }));
    }

    #[test]
    fn direct_slot_write_conflict_is_loud() {
        let store = bootstrapped();
        let block = store.append(json!("winner")).unwrap();

        // Simulate a writer that bypassed the append lock and targets the
        // same height: the CAS must reject it, not overwrite.
        let mut intruder = block.clone();
        intruder.body = json!("intruder");
        intruder.hash = intruder.compute_hash();
        let err = store.persist_at_vacant_slot(&intruder).unwrap_err();
        assert!(matches!(err, ChainError::HeightOccupied { height: 1 }));
        assert_eq!(store.get_block(1).unwrap().unwrap().body, json!("winner"));
    }

    #[test]
    fn concurrent_appends_never_collide() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(bootstrapped());
        let writers = 8;

        let handles: Vec<_> = (0..writers)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.append(json!({ "writer": i })).unwrap().height)
            })
            .collect();

        let mut heights: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        heights.sort_unstable();

        // Every append won a distinct, contiguous height.
        assert_eq!(heights, (1..=writers as u64).collect::<Vec<_>>());
        assert_eq!(store.height().unwrap(), writers as u64 + 1);

        // And the chain they produced is fully linked.
        let report = store.validate_chain().unwrap();
        assert!(report.intact, "faults: {:?}", report.faulty_heights);
        assert_eq!(report.blocks_checked, writers as u64 + 1);
    }

    // -- Lookups & scans ----------------------------------------------------

    #[test]
    fn unparseable_record_reads_as_absent() {
        let store = bootstrapped();
        store.append(json!("fine")).unwrap();
        store.db.put(1, b"\xff\xfe garbage").unwrap();
        assert!(store.get_block(1).unwrap().is_none());
    }

    #[test]
    fn address_scan_matches_in_ascending_order() {
        let store = bootstrapped();
        let alice = "a1ce";
        store.append(star_payload(alice, "first star")).unwrap();
        store.append(star_payload("b0b", "not hers")).unwrap();
        store.append(star_payload(alice, "second star")).unwrap();

        let found = store.get_blocks_by_address(alice).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].height, 1);
        assert_eq!(found[1].height, 3);
        // Decoration is applied to the returned copies.
        assert_eq!(found[0].body["star"]["storyDecoded"], json!("first star"));
        assert_eq!(found[1].body["star"]["storyDecoded"], json!("second star"));
    }

    #[test]
    fn address_scan_excludes_genesis_and_never_returns_absent() {
        let store = bootstrapped();
        // Genesis carries no payload address; an empty chain of stars
        // yields an empty sequence, not an error.
        assert!(store.get_blocks_by_address("anyone").unwrap().is_empty());

        store.append(star_payload("someone", "story")).unwrap();
        let found = store.get_blocks_by_address("someone").unwrap();
        assert!(found.iter().all(|b| b.height > 0));
    }

    #[test]
    fn decoration_is_not_persisted_by_scans() {
        let store = bootstrapped();
        store.append(star_payload("a1ce", "ephemeral")).unwrap();
        let _ = store.get_blocks_by_address("a1ce").unwrap();

        let stored = store.get_block(1).unwrap().unwrap();
        assert!(stored.body["star"].get("storyDecoded").is_none());
        assert!(stored.is_self_consistent());
    }

    #[test]
    fn hash_lookup_finds_non_genesis_blocks_only() {
        let store = bootstrapped();
        let block = store.append(star_payload("a1ce", "story")).unwrap();
        let genesis = store.get_block(0).unwrap().unwrap();

        let found = store.get_block_by_hash(&block.hash).unwrap().unwrap();
        assert_eq!(found.height, 1);
        assert_eq!(found.body["star"]["storyDecoded"], json!("story"));

        assert!(store.get_block_by_hash(&genesis.hash).unwrap().is_none());
        assert!(store.get_block_by_hash("no such hash").unwrap().is_none());
    }

    // -- Validation ---------------------------------------------------------

    #[test]
    fn fresh_blocks_validate() {
        let store = bootstrapped();
        store.append(json!("payload")).unwrap();
        assert_eq!(store.validate_block(0).unwrap(), BlockValidity::Valid);
        assert_eq!(store.validate_block(1).unwrap(), BlockValidity::Valid);
        assert_eq!(store.validate_block(2).unwrap(), BlockValidity::Absent);
    }

    #[test]
    fn mutated_record_turns_invalid() {
        let store = bootstrapped();
        store.append(json!("original")).unwrap();
        assert_eq!(store.validate_block(1).unwrap(), BlockValidity::Valid);

        tamper(&store, 1, |b| b.body = json!("rewritten"));
        assert_eq!(store.validate_block(1).unwrap(), BlockValidity::Invalid);
    }

    #[test]
    fn untouched_chain_reports_intact() {
        let store = bootstrapped();
        for i in 0..4 {
            store.append(json!({ "n": i })).unwrap();
        }

        let report = store.validate_chain().unwrap();
        assert_eq!(report.blocks_checked, 5);
        assert!(report.faulty_heights.is_empty());
        assert!(report.intact);
    }

    #[test]
    fn broken_link_is_pinned_to_one_height() {
        let store = bootstrapped();
        for i in 0..4 {
            store.append(json!({ "n": i })).unwrap();
        }

        // Corrupt the previous-link of block 3 in the 5-block chain.
        tamper(&store, 3, |b| b.previous_block_hash = "0".repeat(64));

        let report = store.validate_chain().unwrap();
        assert_eq!(report.blocks_checked, 5);
        assert_eq!(report.faulty_heights, vec![3]);
        assert!(!report.intact);
    }

    #[test]
    fn tampered_body_faults_its_height() {
        let store = bootstrapped();
        for i in 0..3 {
            store.append(json!({ "n": i })).unwrap();
        }
        tamper(&store, 2, |b| b.body = json!({ "n": 99 }));

        let report = store.validate_chain().unwrap();
        assert_eq!(report.faulty_heights, vec![2]);
    }

    #[test]
    fn unreadable_height_is_a_fault_not_a_skip() {
        let store = bootstrapped();
        for i in 0..3 {
            store.append(json!({ "n": i })).unwrap();
        }
        store.db.put(2, b"not a block").unwrap();

        let report = store.validate_chain().unwrap();
        assert_eq!(report.blocks_checked, 4);
        // Height 2 is unreadable, and block 3's link can no longer be
        // confirmed against it.
        assert_eq!(report.faulty_heights, vec![2, 3]);
        assert!(!report.intact);
    }

    #[test]
    fn multiple_faults_are_all_collected() {
        let store = bootstrapped();
        for i in 0..5 {
            store.append(json!({ "n": i })).unwrap();
        }
        tamper(&store, 1, |b| b.body = json!("x"));
        tamper(&store, 4, |b| b.previous_block_hash = "f".repeat(64));

        let report = store.validate_chain().unwrap();
        assert_eq!(report.blocks_checked, 6);
        assert_eq!(report.faulty_heights, vec![1, 4]);
    }

    #[test]
    fn genesis_with_nonempty_link_is_a_fault() {
        let store = bootstrapped();
        tamper(&store, 0, |b| b.previous_block_hash = "a".repeat(64));

        let report = store.validate_chain().unwrap();
        assert!(report.faulty_heights.contains(&0));
    }

    // -- Persistence --------------------------------------------------------

    #[test]
    fn chain_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let first_hash;
        {
            let store = ChainStore::open(dir.path()).unwrap();
            store.bootstrap_if_empty().unwrap();
            first_hash = store.append(json!("durable")).unwrap().hash;
        }

        let store = ChainStore::open(dir.path()).unwrap();
        assert!(!store.bootstrap_if_empty().unwrap());
        assert_eq!(store.height().unwrap(), 2);
        assert_eq!(store.get_block(1).unwrap().unwrap().hash, first_hash);
        assert!(store.validate_chain().unwrap().intact);
    }
}
