//! Simulated chat threads on the subject's phone.

mod evidence;

pub use evidence::*;

use serde::{Deserialize, Serialize};

/// Unique identifier for a chat thread.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ThreadId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a message, unique within its thread only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u32);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who the thread is with, as shown in the chat list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    /// Emoji glyph or image URL. Renderers fall back to a generic glyph.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// A single chat bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: String,
    pub text: String,

    /// Whether tapping this message counts as finding evidence.
    #[serde(default)]
    pub is_evidence: bool,

    /// Sent by the interrogated subject (drawn on the right-hand side).
    #[serde(default)]
    pub from_subject: bool,
}

impl Message {
    pub fn new(id: u32, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: MessageId(id),
            sender: sender.into(),
            text: text.into(),
            is_evidence: false,
            from_subject: false,
        }
    }

    /// Mark the message as evidence.
    pub fn evidence(mut self) -> Self {
        self.is_evidence = true;
        self
    }

    /// Mark the message as sent by the subject.
    pub fn from_subject(mut self) -> Self {
        self.from_subject = true;
        self
    }
}

/// A conversation on the phone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: ThreadId,
    pub contact: Contact,
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Explicit last-message preview for the chat list.
    #[serde(default)]
    pub preview: Option<String>,
}

impl ChatThread {
    pub fn new(id: impl Into<ThreadId>, contact: Contact) -> Self {
        Self {
            id: id.into(),
            contact,
            messages: Vec::new(),
            preview: None,
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    /// Get a message by ID.
    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Keys of every evidence message in this thread.
    pub fn evidence_keys(&self) -> impl Iterator<Item = EvidenceKey> + '_ {
        self.messages
            .iter()
            .filter(|m| m.is_evidence)
            .map(|m| EvidenceKey::new(self.id.clone(), m.id))
    }

    /// Text for the chat list: the explicit preview, else the last message.
    pub fn preview_text(&self) -> Option<&str> {
        self.preview
            .as_deref()
            .or_else(|| self.messages.last().map(|m| m.text.as_str()))
    }
}
