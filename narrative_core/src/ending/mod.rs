//! Ending branch - the verdict and the two mutually exclusive endings.
//!
//! ```text
//! Playing --verdict (gate open)--> Ending/Undecided --choice--> Ending/Forgive
//!                                                          \--> Ending/RevealFile
//!                                      --timer--> revealed --timer--> alarm (flashing)
//! ```
//!
//! Every terminal state is left only through a full session restart. The timers
//! themselves are owned by the session; this module only applies their effects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Playing,
    Ending,
}

/// A choice the player can make once the verdict is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Forgive and carry on. Terminal.
    Forgive,
    /// Open the secret file. Starts the reveal sequence.
    RevealFile,
}

/// The ending picked so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingChoice {
    #[default]
    Undecided,
    Forgive,
    RevealFile,
}

impl EndingChoice {
    pub fn resolution(&self) -> Option<Resolution> {
        match self {
            EndingChoice::Undecided => None,
            EndingChoice::Forgive => Some(Resolution::Forgive),
            EndingChoice::RevealFile => Some(Resolution::RevealFile),
        }
    }
}

impl From<Resolution> for EndingChoice {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Forgive => EndingChoice::Forgive,
            Resolution::RevealFile => EndingChoice::RevealFile,
        }
    }
}

/// Progress of the reveal ending. Meaningless under any other choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileRevealState {
    pub revealed: bool,
    pub alarm_active: bool,
    /// Toggles on the flash period while the alarm is active.
    pub flashing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingBranch {
    phase: SessionPhase,
    choice: EndingChoice,
    file: FileRevealState,
}

impl EndingBranch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn choice(&self) -> EndingChoice {
        self.choice
    }

    pub fn file(&self) -> FileRevealState {
        self.file
    }

    /// Move from play to the ending screen. Only while playing and unlocked.
    pub fn trigger_verdict(&mut self, unlocked: bool) -> bool {
        if self.phase != SessionPhase::Playing || !unlocked {
            return false;
        }
        self.phase = SessionPhase::Ending;
        true
    }

    /// Pick an ending. Only once, and only on the ending screen.
    pub fn choose(&mut self, resolution: Resolution) -> bool {
        if self.phase != SessionPhase::Ending || self.choice != EndingChoice::Undecided {
            return false;
        }
        self.choice = resolution.into();
        true
    }

    pub fn reveal_file(&mut self) -> bool {
        if self.choice != EndingChoice::RevealFile || self.file.revealed {
            return false;
        }
        self.file.revealed = true;
        true
    }

    /// Start the alarm. Flashing starts lit.
    pub fn raise_alarm(&mut self) -> bool {
        if !self.file.revealed || self.file.alarm_active {
            return false;
        }
        self.file.alarm_active = true;
        self.file.flashing = true;
        true
    }

    pub fn toggle_flash(&mut self) -> bool {
        if !self.file.alarm_active {
            return false;
        }
        self.file.flashing = !self.file.flashing;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
