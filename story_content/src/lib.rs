//! # Story Content
//!
//! The "case file" crate - the dialogue script, the simulated chat threads and
//! the evidence hidden inside them. Everything here is static, validated once at
//! load time and never mutated during play. Session state lives in
//! `narrative_core`.

pub mod catalog;
pub mod chat;
pub mod dialogue;
pub mod error;

pub use catalog::*;
pub use chat::*;
pub use dialogue::*;
pub use error::*;
