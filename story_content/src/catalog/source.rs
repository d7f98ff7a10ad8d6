//! Serde shape of a content file, before validation.

use serde::{Deserialize, Serialize};

use crate::chat::ChatThread;
use crate::dialogue::DialogueStep;

/// Raw catalog as authored in a TOML or JSON file.
///
/// Nothing here is checked; convert it into a [`super::Catalog`] to validate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(default)]
    pub title: String,

    /// Display name of the interrogated character.
    #[serde(default)]
    pub subject: String,

    /// How many evidence messages must be found. Derived from the flags when omitted.
    #[serde(default)]
    pub total_evidence: Option<usize>,

    #[serde(default)]
    pub dialogue: Vec<DialogueStep>,

    #[serde(default)]
    pub threads: Vec<ChatThread>,

    #[serde(default)]
    pub epilogue: Epilogue,
}

impl CatalogSource {
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_step(mut self, step: DialogueStep) -> Self {
        self.dialogue.push(step);
        self
    }

    pub fn with_thread(mut self, thread: ChatThread) -> Self {
        self.threads.push(thread);
        self
    }

    pub fn with_total_evidence(mut self, total: usize) -> Self {
        self.total_evidence = Some(total);
        self
    }

    pub fn with_epilogue(mut self, epilogue: Epilogue) -> Self {
        self.epilogue = epilogue;
        self
    }
}

/// Texts shown around the confession and in the two endings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Epilogue {
    /// Shown once the dialogue script is completed.
    pub confession: String,
    /// The subject's reply when the player forgives.
    pub forgiveness: String,
    pub secret_file: SecretFile,
}

impl Default for Epilogue {
    fn default() -> Self {
        Self {
            confession: "Fine... I slept with someone...".to_string(),
            forgiveness: "Thank you, sweetie! I will never betray you!".to_string(),
            secret_file: SecretFile::default(),
        }
    }
}

/// Contents of the file opened in the reveal ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretFile {
    pub name: String,
    /// Shown once the file is revealed.
    pub body: String,
    /// Shown once the alarm goes off.
    pub alarm_lines: Vec<String>,
}

impl Default for SecretFile {
    fn default() -> Self {
        Self {
            name: "secret_file.txt".to_string(),
            body: "Ha! Did you really think my bot was that easy to crack?!".to_string(),
            alarm_lines: vec![
                "*self-destruct sequence initiated*".to_string(),
                "Bye-bye, loser!..".to_string(),
            ],
        }
    }
}
