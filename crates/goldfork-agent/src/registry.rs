// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-keyed registry for in-flight reservation drafts.
//!
//! Drafts live only here: they are created on first use, mutated turn by
//! turn, and discarded when the session disconnects. Nothing in the registry
//! is ever persisted.

use dashmap::DashMap;
use goldfork_core::types::ReservationDraft;
use tracing::debug;

/// Holds the per-session reservation draft between turns.
///
/// The gateway serializes turns per session, so a turn always sees the draft
/// its predecessor left behind; the map only has to be safe across sessions.
#[derive(Default)]
pub struct SessionRegistry {
    drafts: DashMap<String, ReservationDraft>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the session's draft, creating an empty one on
    /// first use.
    pub fn draft(&self, session_id: &str) -> ReservationDraft {
        self.drafts
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    /// Stores the draft back after a merge.
    pub fn store_draft(&self, session_id: &str, draft: ReservationDraft) {
        self.drafts.insert(session_id.to_string(), draft);
    }

    /// Resets the session's draft to empty, e.g. after a completed booking.
    pub fn clear_draft(&self, session_id: &str) {
        self.drafts
            .insert(session_id.to_string(), ReservationDraft::default());
    }

    /// Drops the session's entry entirely. Called on disconnect; the draft
    /// is discarded, never persisted.
    pub fn remove(&self, session_id: &str) {
        if self.drafts.remove(session_id).is_some() {
            debug!(session_id, "session draft discarded");
        }
    }

    /// Number of sessions currently tracked.
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
