//! Evidence keys - the derived identity of an evidence message.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{MessageId, ThreadId};
use crate::error::ContentError;

/// Separator between the thread and message parts of a rendered key.
pub const EVIDENCE_KEY_SEPARATOR: char = '_';

/// `(thread, message)` pair identifying one evidence message across the whole phone.
///
/// Serialized as its string form (`"mika_2"`), which is what renderers and
/// snapshots exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EvidenceKey {
    pub thread: ThreadId,
    pub message: MessageId,
}

impl EvidenceKey {
    pub fn new(thread: impl Into<ThreadId>, message: MessageId) -> Self {
        Self {
            thread: thread.into(),
            message,
        }
    }
}

impl std::fmt::Display for EvidenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.thread, EVIDENCE_KEY_SEPARATOR, self.message)
    }
}

impl FromStr for EvidenceKey {
    type Err = ContentError;

    /// Thread ids may contain the separator, so split on the last one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (thread, message) = s
            .rsplit_once(EVIDENCE_KEY_SEPARATOR)
            .ok_or_else(|| ContentError::InvalidEvidenceKey(s.to_string()))?;
        if thread.is_empty() {
            return Err(ContentError::InvalidEvidenceKey(s.to_string()));
        }
        let message = message
            .parse::<u32>()
            .map_err(|_| ContentError::InvalidEvidenceKey(s.to_string()))?;
        Ok(Self::new(thread, MessageId(message)))
    }
}

impl From<EvidenceKey> for String {
    fn from(key: EvidenceKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for EvidenceKey {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
