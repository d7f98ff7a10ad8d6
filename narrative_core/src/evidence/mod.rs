//! Evidence tracker - which evidence messages the player has found.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use story_content::{EvidenceKey, MessageId, ThreadId};

/// Set of found evidence keys. Only grows until reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceTracker {
    found: HashSet<EvidenceKey>,
}

impl EvidenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tapped message.
    ///
    /// Returns the key only when it was evidence and not found before. Taps on
    /// ordinary messages and repeated taps on found evidence change nothing.
    pub fn record_if_evidence(
        &mut self,
        thread: &ThreadId,
        message: MessageId,
        is_evidence: bool,
    ) -> Option<EvidenceKey> {
        if !is_evidence {
            return None;
        }

        let key = EvidenceKey::new(thread.clone(), message);
        if self.found.contains(&key) {
            return None;
        }
        self.found.insert(key.clone());
        Some(key)
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn is_found(&self, key: &EvidenceKey) -> bool {
        self.found.contains(key)
    }

    pub fn found_keys(&self) -> impl Iterator<Item = &EvidenceKey> {
        self.found.iter()
    }

    pub fn is_complete(&self, total_evidence: usize) -> bool {
        self.found_count() >= total_evidence
    }

    pub fn reset(&mut self) {
        self.found.clear();
    }
}
