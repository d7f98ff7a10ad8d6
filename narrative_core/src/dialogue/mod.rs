//! Dialogue progression - walks the script one answer at a time.
//!
//! The machine is timer-agnostic. Submitting an answer only opens a transition;
//! the owner settles it after the configured delay with [`DialogueMachine::settle`].
//! While a transition is open every other submission is ignored.
//!
//! A wrong answer anywhere sends the script back to step 0. Evidence and the
//! confession are never touched by a wrong answer.

use serde::{Deserialize, Serialize};
use story_content::DialogueStep;

/// Player position in the script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueMachine {
    step_index: usize,
    confession_raised: bool,
    in_transition: bool,
    wrong_answer: bool,
}

/// Result of [`DialogueMachine::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The answer was taken; settle it after the delay.
    Pending { correct: bool },
    /// A transition is already open or the script is finished.
    Ignored,
}

/// Result of [`DialogueMachine::settle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Advanced { step: usize },
    Confessed,
    Reset,
    /// No transition was open.
    Stale,
}

impl DialogueMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn confession_raised(&self) -> bool {
        self.confession_raised
    }

    pub fn in_transition(&self) -> bool {
        self.in_transition
    }

    /// True between a wrong answer and the reset it causes.
    pub fn wrong_answer(&self) -> bool {
        self.wrong_answer
    }

    /// The step awaiting an answer, or `None` once the confession is raised.
    pub fn current_step<'a>(&self, script: &'a [DialogueStep]) -> Option<&'a DialogueStep> {
        if self.confession_raised {
            return None;
        }
        script.get(self.step_index)
    }

    /// Take an answer. A wrong one is flagged immediately.
    pub fn submit(&mut self, correct: bool) -> Submission {
        if self.in_transition || self.confession_raised {
            return Submission::Ignored;
        }

        self.in_transition = true;
        if !correct {
            self.wrong_answer = true;
        }
        Submission::Pending { correct }
    }

    /// Apply the outcome of the open transition.
    pub fn settle(&mut self, correct: bool, script_len: usize) -> Settlement {
        if !self.in_transition {
            return Settlement::Stale;
        }
        self.in_transition = false;

        if !correct {
            self.step_index = 0;
            self.wrong_answer = false;
            return Settlement::Reset;
        }

        if self.step_index + 1 >= script_len {
            self.confession_raised = true;
            Settlement::Confessed
        } else {
            self.step_index += 1;
            Settlement::Advanced {
                step: self.step_index,
            }
        }
    }

    /// Drop the open transition without applying it. Position and confession stay.
    pub fn abort(&mut self) -> bool {
        let was_open = self.in_transition;
        self.in_transition = false;
        self.wrong_answer = false;
        was_open
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
