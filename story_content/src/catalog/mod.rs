//! The content catalog - validated, immutable story data shared by every session.
//!
//! A [`Catalog`] can only be obtained through validation, so holding one means:
//! - the script has at least one step, and every step has a correct option
//! - thread ids are unique, and message ids are unique within each thread
//! - the evidence total is reachable with the flagged messages

mod source;

pub use source::*;

use std::collections::HashSet;
use std::path::Path;

use crate::chat::{ChatThread, EvidenceKey, Message, MessageId, ThreadId};
use crate::dialogue::DialogueStep;
use crate::error::ContentError;

const BUILTIN_CATALOG: &str = include_str!("../../content/interrogation.toml");

/// Validated story content.
#[derive(Debug, Clone)]
pub struct Catalog {
    title: String,
    subject: String,
    script: Vec<DialogueStep>,
    threads: Vec<ChatThread>,
    evidence: HashSet<EvidenceKey>,
    total_evidence: usize,
    epilogue: Epilogue,
}

impl Catalog {
    /// Parse and validate a TOML content file.
    pub fn from_toml_str(text: &str) -> Result<Self, ContentError> {
        let source: CatalogSource = toml::from_str(text)?;
        Self::try_from(source)
    }

    /// Parse and validate a JSON content file.
    pub fn from_json_str(text: &str) -> Result<Self, ContentError> {
        let source: CatalogSource = serde_json::from_str(text)?;
        Self::try_from(source)
    }

    /// Load a content file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "toml" => Self::from_toml_str(&std::fs::read_to_string(path)?),
            "json" => Self::from_json_str(&std::fs::read_to_string(path)?),
            _ => Err(ContentError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// The bundled interrogation scenario.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn script(&self) -> &[DialogueStep] {
        &self.script
    }

    pub fn step(&self, index: usize) -> Option<&DialogueStep> {
        self.script.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.script.len()
    }

    pub fn threads(&self) -> &[ChatThread] {
        &self.threads
    }

    pub fn thread(&self, id: &ThreadId) -> Option<&ChatThread> {
        self.threads.iter().find(|t| &t.id == id)
    }

    pub fn message(&self, thread: &ThreadId, message: MessageId) -> Option<&Message> {
        self.thread(thread).and_then(|t| t.message(message))
    }

    /// Whether `key` names an evidence-flagged message.
    pub fn is_evidence(&self, key: &EvidenceKey) -> bool {
        self.evidence.contains(key)
    }

    pub fn evidence_keys(&self) -> impl Iterator<Item = &EvidenceKey> {
        self.evidence.iter()
    }

    /// Number of evidence-flagged messages across all threads.
    pub fn flagged_evidence_count(&self) -> usize {
        self.evidence.len()
    }

    /// How many evidence messages must be found to complete the search.
    pub fn total_evidence(&self) -> usize {
        self.total_evidence
    }

    pub fn epilogue(&self) -> &Epilogue {
        &self.epilogue
    }
}

impl TryFrom<CatalogSource> for Catalog {
    type Error = ContentError;

    fn try_from(source: CatalogSource) -> Result<Self, Self::Error> {
        if source.dialogue.is_empty() {
            return Err(ContentError::EmptyScript);
        }

        for (step, entry) in source.dialogue.iter().enumerate() {
            if entry.options.is_empty() {
                return Err(ContentError::StepWithoutOptions { step });
            }
            match entry.correct_option_count() {
                0 => return Err(ContentError::NoCorrectOption { step }),
                1 => {}
                correct => tracing::warn!(
                    step,
                    correct,
                    "dialogue step has more than one correct option"
                ),
            }
        }

        let mut thread_ids = HashSet::new();
        let mut evidence = HashSet::new();
        for thread in &source.threads {
            if !thread_ids.insert(&thread.id) {
                return Err(ContentError::DuplicateThread {
                    thread: thread.id.clone(),
                });
            }

            let mut message_ids = HashSet::new();
            for message in &thread.messages {
                if !message_ids.insert(message.id) {
                    return Err(ContentError::DuplicateMessage {
                        thread: thread.id.clone(),
                        message: message.id,
                    });
                }
            }

            evidence.extend(thread.evidence_keys());
        }

        let flagged = evidence.len();
        let total_evidence = match source.total_evidence {
            Some(declared) if declared > flagged => {
                return Err(ContentError::UnreachableEvidenceTotal { declared, flagged });
            }
            Some(declared) => {
                if declared < flagged {
                    tracing::warn!(
                        declared,
                        flagged,
                        "evidence total is lower than the number of flagged messages"
                    );
                }
                declared
            }
            None => flagged,
        };

        tracing::debug!(
            title = %source.title,
            steps = source.dialogue.len(),
            threads = source.threads.len(),
            total_evidence,
            "catalog validated"
        );

        Ok(Self {
            title: source.title,
            subject: source.subject,
            script: source.dialogue,
            threads: source.threads,
            evidence,
            total_evidence,
            epilogue: source.epilogue,
        })
    }
}
