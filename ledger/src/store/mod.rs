//! Persistence: the block entity, the sled-backed record store, and the
//! chain store that enforces every ledger invariant on top of it.

pub mod block;
pub mod chain;
pub mod db;

pub use block::Block;
pub use chain::{BlockValidity, ChainError, ChainResult, ChainStore, IntegrityReport};
pub use db::{DbError, LedgerDb};
