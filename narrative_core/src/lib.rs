//! # Narrative Core
//!
//! The progression engine of the interrogation. This crate reads the static
//! content from `story_content` and owns everything that changes during play.
//!
//! ## Core Components
//!
//! - **dialogue**: Walks the script; any wrong answer restarts it, the last correct one raises the confession
//! - **evidence**: Records which evidence messages have been found
//! - **gate**: Combines confession and evidence into the verdict unlock
//! - **ending**: The verdict and the two endings, including the timed file reveal
//! - **scheduler**: Virtual clock for every delayed transition
//! - **session**: The facade the presentation layer talks to
//!
//! ## Design Philosophy
//!
//! - **Read after mutate**: Every input is a plain method call; state is read back through accessors
//! - **Forgiving input**: Calls made in the wrong phase are ignored, never fatal
//! - **Owned time**: Timers belong to the session and die with a restart or teardown

pub mod config;
pub mod dialogue;
pub mod ending;
pub mod error;
pub mod events;
pub mod evidence;
pub mod gate;
pub mod scheduler;
pub mod session;

pub use config::*;
pub use dialogue::*;
pub use ending::*;
pub use error::*;
pub use events::*;
pub use evidence::*;
pub use gate::*;
pub use scheduler::*;
pub use session::*;
