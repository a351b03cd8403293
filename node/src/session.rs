//! # Pending-Validation Sessions
//!
//! The time-boxed identity window that gates star registration. An owner
//! requests a challenge for their address, signs it within the window,
//! and earns a one-shot right to register a star. This is boundary-layer
//! state: explicit, owned, and with an explicit expiry policy — the chain
//! store below knows nothing about it.
//!
//! Lifecycle of an entry:
//!
//! ```text
//! requestValidation ──▶ pending ──sign──▶ validated ──register──▶ gone
//!                          │                  │
//!                          └── window lapses ─┴──▶ evicted
//! ```
//!
//! Expiry is checked lazily at every touch point rather than by a reaper
//! task; an expired entry behaves exactly as if it never existed — a new
//! request replaces it with a fresh challenge on the spot, and a late
//! verify or registration gets an error telling the caller to start over.

use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;

use astra_ledger::config::{CHALLENGE_SUFFIX, VALIDATION_WINDOW_SECS};
use astra_ledger::crypto::{verify_challenge, IdentityError};

// ---------------------------------------------------------------------------
// Error Type
// ---------------------------------------------------------------------------

/// Failures in the validation-session flow.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no pending validation for this address; request a challenge first")]
    NotFound,

    #[error("validation window expired; request a new challenge")]
    Expired,

    #[error("address has not proven its identity; validate the signature first")]
    NotValidated,

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One pending validation.
#[derive(Debug, Clone)]
struct ValidationSession {
    /// The challenge message handed to the caller, signed verbatim.
    message: String,
    /// Unix seconds when the challenge was first issued. Re-requests do
    /// not refresh this — the window runs from the original request.
    requested_at: u64,
    /// Set once a valid signature over `message` has been seen.
    register_star: bool,
}

impl ValidationSession {
    /// A brand-new challenge for this address, stamped `now`.
    fn issued(address: &str, now: u64) -> Self {
        Self {
            message: format!("{address}:{now}:{CHALLENGE_SUFFIX}"),
            requested_at: now,
            register_star: false,
        }
    }
}

/// Snapshot returned to the caller after a request or a signature check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeStatus {
    pub address: String,
    pub request_timestamp: u64,
    pub message: String,
    /// Seconds left in the window at the time of the call.
    pub validation_window: u64,
}

// ---------------------------------------------------------------------------
// SessionRegistry
// ---------------------------------------------------------------------------

/// All pending validations, keyed by address.
///
/// Shared across handlers behind an `Arc`; the map shards its own locks.
#[derive(Debug)]
pub struct SessionRegistry {
    entries: DashMap<String, ValidationSession>,
    /// Window length in seconds. [`VALIDATION_WINDOW_SECS`] in production,
    /// overridable for tests.
    window_secs: u64,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_window(VALIDATION_WINDOW_SECS)
    }
}

impl SessionRegistry {
    pub fn with_window(window_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            window_secs,
        }
    }

    /// Issue (or re-surface) the challenge for an address. Never fails:
    /// the caller always walks away with a live challenge.
    ///
    /// A fresh address gets a new challenge stamped now. An address with a
    /// live entry gets the same message and timestamp back with the
    /// remaining window — re-requesting never extends the deadline. A
    /// lapsed entry is replaced by a fresh challenge in the same call.
    pub fn request(&self, address: &str) -> ChallengeStatus {
        self.request_at(address, now_secs())
    }

    fn request_at(&self, address: &str, now: u64) -> ChallengeStatus {
        let mut entry = self
            .entries
            .entry(address.to_string())
            .or_insert_with(|| ValidationSession::issued(address, now));

        if remaining(entry.value(), self.window_secs, now).is_none() {
            *entry.value_mut() = ValidationSession::issued(address, now);
        }

        let session = entry.value().clone();
        drop(entry);

        ChallengeStatus {
            address: address.to_string(),
            request_timestamp: session.requested_at,
            validation_window: remaining(&session, self.window_secs, now)
                .unwrap_or(self.window_secs),
            message: session.message,
        }
    }

    /// Check a signature over the pending challenge.
    ///
    /// On success the session becomes star-registrable and the status is
    /// returned. Any failure leaves the entry untouched (except expiry,
    /// which evicts it) so the caller can retry within the window.
    pub fn verify(&self, address: &str, signature: &str) -> Result<ChallengeStatus, SessionError> {
        self.verify_at(address, signature, now_secs())
    }

    fn verify_at(
        &self,
        address: &str,
        signature: &str,
        now: u64,
    ) -> Result<ChallengeStatus, SessionError> {
        let Some(mut entry) = self.entries.get_mut(address) else {
            return Err(SessionError::NotFound);
        };

        let Some(window) = remaining(entry.value(), self.window_secs, now) else {
            drop(entry);
            self.entries.remove(address);
            return Err(SessionError::Expired);
        };

        verify_challenge(address, &entry.message, signature)?;
        entry.register_star = true;

        Ok(ChallengeStatus {
            address: address.to_string(),
            request_timestamp: entry.requested_at,
            message: entry.message.clone(),
            validation_window: window,
        })
    }

    /// Confirm the address holds a live, signature-validated session.
    /// Does not consume it — registration calls [`SessionRegistry::consume`]
    /// only after the block has actually been persisted.
    pub fn authorized(&self, address: &str) -> Result<(), SessionError> {
        self.authorized_at(address, now_secs())
    }

    fn authorized_at(&self, address: &str, now: u64) -> Result<(), SessionError> {
        let Some(entry) = self.entries.get(address) else {
            return Err(SessionError::NotFound);
        };
        if remaining(entry.value(), self.window_secs, now).is_none() {
            drop(entry);
            self.entries.remove(address);
            return Err(SessionError::Expired);
        }
        if !entry.register_star {
            return Err(SessionError::NotValidated);
        }
        Ok(())
    }

    /// Retire a session after its one registration has been used.
    pub fn consume(&self, address: &str) {
        self.entries.remove(address);
    }
}

/// Seconds left in the window, or `None` if it has lapsed.
fn remaining(session: &ValidationSession, window_secs: u64, now: u64) -> Option<u64> {
    let elapsed = now.saturating_sub(session.requested_at);
    if elapsed > window_secs {
        None
    } else {
        Some(window_secs - elapsed)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
