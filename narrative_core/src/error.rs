//! Session construction errors.
//!
//! Play-time operations never fail: out-of-order input is ignored. Only
//! building a session from content and config can go wrong.

use story_content::ContentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid content: {0}")]
    Content(#[from] ContentError),

    #[error("invalid session config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse session config: {0}")]
    Toml(#[from] toml::de::Error),
}
