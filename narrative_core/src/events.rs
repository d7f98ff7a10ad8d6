//! Narrative events - what the core reports back to the presentation layer.

use serde::{Deserialize, Serialize};
use story_content::EvidenceKey;

use crate::ending::Resolution;

/// An observable transition of the session.
///
/// Events are queued inside the session and drained by the presentation layer
/// after each call. They describe what changed; the current state is always
/// available through the session's accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NarrativeEvent {
    /// An answer was taken and its delayed outcome is pending.
    AnswerAccepted { step: usize, correct: bool },

    /// A wrong answer took effect and the script went back to the start.
    InterrogationReset,

    /// A correct answer moved the script forward.
    StepAdvanced { step: usize },

    /// The last step was answered correctly.
    ConfessionRaised,

    /// A new evidence message was found.
    EvidenceFound { key: EvidenceKey },

    /// Confession and evidence are both in; the verdict can be called.
    SessionUnlocked,

    VerdictTriggered,

    EndingChosen { choice: Resolution },

    FileRevealed,

    AlarmRaised,

    SessionRestarted,
}

impl NarrativeEvent {
    /// Whether this event marks a story milestone rather than routine progress.
    pub fn is_milestone(&self) -> bool {
        matches!(
            self,
            NarrativeEvent::ConfessionRaised
                | NarrativeEvent::SessionUnlocked
                | NarrativeEvent::VerdictTriggered
                | NarrativeEvent::EndingChosen { .. }
        )
    }
}
