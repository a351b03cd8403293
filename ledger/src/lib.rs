// Copyright (c) 2026 Astra Labs. MIT License.
// See LICENSE for details.

//! # Astra Ledger — Core Library
//!
//! A single-node, hash-linked, append-only ledger: the chain store behind
//! the Astra star notary. Blocks carry an opaque payload, link to their
//! predecessor by SHA-256 digest, and once written are never touched
//! again — tampering is something we detect, not repair.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants. Genesis marker, challenge format,
//!   validation window.
//! - **crypto** — SHA-256 block digests and Ed25519 challenge
//!   verification for the identity scheme.
//! - **store** — The actual ledger: block entity, sled-backed record
//!   store, and the `ChainStore` that owns bootstrap, append, lookups,
//!   and integrity validation.
//!
//! The HTTP boundary (routing, request validation, the pending-validation
//! window) lives in the `astra-node` binary. It decorates this crate's
//! inputs and outputs; it holds no chain invariants of its own.
//!
//! ## Design Philosophy
//!
//! 1. All chain invariants live in `ChainStore`. Everything above it is
//!    formatting and transport.
//! 2. Appends are serialized; there is exactly one writer and it fails
//!    loudly rather than overwrite a slot.
//! 3. Missing data is a value, not an exception. Lookups return absence;
//!    validation returns a report.

pub mod config;
pub mod crypto;
pub mod store;

pub use store::{Block, BlockValidity, ChainError, ChainResult, ChainStore, IntegrityReport};
