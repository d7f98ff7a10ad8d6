//! Read-only views of a session for renderers.

use serde::{Deserialize, Serialize};
use story_content::EvidenceKey;

use super::{Session, SessionId};
use crate::ending::{EndingChoice, FileRevealState, Resolution, SessionPhase};

/// Coarse progress through the story, one line of status text per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionStatus {
    /// Answering the script. `stage` is 1-based.
    Interrogating { stage: usize, stages: usize },
    /// Confession is in, evidence is still missing.
    Searching { found: usize, total: usize },
    ReadyForVerdict,
    AwaitingChoice,
    Concluded { resolution: Resolution },
}

/// Every presentation-facing read of a session at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session: SessionId,
    pub elapsed_ms: u64,
    pub status: SessionStatus,

    pub step_index: usize,
    /// The subject's current line, `None` once confessed.
    pub current_line: Option<String>,
    /// Option texts of the current step. Correctness is not exposed.
    pub options: Vec<String>,
    pub wrong_answer: bool,
    pub in_transition: bool,
    pub confession_raised: bool,

    pub found_evidence: Vec<EvidenceKey>,
    pub found_count: usize,
    pub total_evidence: usize,
    pub evidence_complete: bool,
    pub highlighted: Option<EvidenceKey>,

    pub unlocked: bool,
    pub phase: SessionPhase,
    pub ending_choice: EndingChoice,
    pub file: FileRevealState,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        let step = session.current_step();

        Self {
            session: session.id(),
            elapsed_ms: u64::try_from(session.elapsed().as_millis()).unwrap_or(u64::MAX),
            status: session.status(),
            step_index: session.step_index(),
            current_line: step.map(|s| s.line.clone()),
            options: step
                .map(|s| s.options.iter().map(|o| o.text.clone()).collect())
                .unwrap_or_default(),
            wrong_answer: session.is_wrong_answer(),
            in_transition: session.is_in_transition(),
            confession_raised: session.confession_raised(),
            found_evidence: session.found_keys(),
            found_count: session.found_count(),
            total_evidence: session.total_evidence(),
            evidence_complete: session.evidence_complete(),
            highlighted: session.highlighted().cloned(),
            unlocked: session.is_unlocked(),
            phase: session.phase(),
            ending_choice: session.ending_choice(),
            file: session.file_reveal(),
        }
    }

    /// Serialize for a renderer that consumes JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
