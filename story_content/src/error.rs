//! Content loading and validation errors.

use thiserror::Error;

use crate::chat::{MessageId, ThreadId};

/// Everything that can go wrong while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("dialogue script has no steps")]
    EmptyScript,

    #[error("dialogue step {step} has no options")]
    StepWithoutOptions { step: usize },

    #[error("dialogue step {step} has no correct option")]
    NoCorrectOption { step: usize },

    #[error("chat thread '{thread}' is defined more than once")]
    DuplicateThread { thread: ThreadId },

    #[error("message {message} appears more than once in thread '{thread}'")]
    DuplicateMessage { thread: ThreadId, message: MessageId },

    #[error("total evidence is declared as {declared} but only {flagged} messages are flagged")]
    UnreachableEvidenceTotal { declared: usize, flagged: usize },

    #[error("'{0}' is not a valid evidence key")]
    InvalidEvidenceKey(String),

    #[error("unsupported content file extension: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML content: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON content: {0}")]
    Json(#[from] serde_json::Error),
}
