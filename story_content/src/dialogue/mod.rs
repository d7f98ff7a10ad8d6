//! Dialogue script definitions: the subject's lines and the player's answers.

use serde::{Deserialize, Serialize};

/// One answer the player can pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueOption {
    pub text: String,
    #[serde(default)]
    pub correct: bool,
}

impl DialogueOption {
    /// Create an option that advances the interrogation.
    pub fn correct(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: true,
        }
    }

    /// Create an option that sends the interrogation back to the start.
    pub fn wrong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correct: false,
        }
    }
}

/// A single entry of the script: what the subject says and how the player may reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueStep {
    /// The subject's line for this step.
    pub line: String,
    #[serde(default)]
    pub options: Vec<DialogueOption>,
}

impl DialogueStep {
    /// Create a step with no options yet.
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            options: Vec::new(),
        }
    }

    /// Append an option.
    pub fn with_option(mut self, option: DialogueOption) -> Self {
        self.options.push(option);
        self
    }

    /// Append several options.
    pub fn with_options(mut self, options: impl IntoIterator<Item = DialogueOption>) -> Self {
        self.options.extend(options);
        self
    }

    /// Get the option at `index`.
    pub fn option(&self, index: usize) -> Option<&DialogueOption> {
        self.options.get(index)
    }

    /// Whether the option at `index` is correct. `None` when out of range.
    pub fn is_option_correct(&self, index: usize) -> Option<bool> {
        self.option(index).map(|o| o.correct)
    }

    pub fn correct_option_count(&self) -> usize {
        self.options.iter().filter(|o| o.correct).count()
    }
}
