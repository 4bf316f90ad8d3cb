//! Session-scoped delivery state.
//!
//! The greeting ledger records which characters have already greeted the user
//! in THIS session. It is owned by the controller (one controller per chat
//! session), never process-wide, so sessions cannot leak greetings into each
//! other and tests stay deterministic.

use std::collections::HashSet;

/// Which characters have already played their greeting this session.
#[derive(Debug, Default, Clone)]
pub struct GreetingLedger {
    played: HashSet<String>,
}

impl GreetingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_greeted(&self, character_id: &str) -> bool {
        self.played.contains(character_id)
    }

    /// Returns false if the character had already greeted.
    pub fn mark_greeted(&mut self, character_id: &str) -> bool {
        self.played.insert(character_id.to_string())
    }

    /// Forget all greetings (e.g. host starts a fresh session).
    pub fn reset(&mut self) {
        self.played.clear();
    }
}
