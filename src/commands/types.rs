use crate::service::RitualKind;
use crate::studio::Mode;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DreamAction {
    Start,
    Stop,
    Pause,
    Resume,
    Status,
}

/// A studio shell command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Ritual(RitualKind),
    /// `None` reports the current mode.
    Mode(Option<Mode>),
    Commit,
    Cancel,
    Restore { index: usize },
    Dream(DreamAction),
    /// Show suggestions, or run the first one with `run`.
    Suggest { run: bool },
    Lineage,
    /// Export history and dream log, or a single entry.
    Export { index: Option<usize> },
    Help,
    Quit,
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub text: String,
    pub ephemeral: bool,
}

impl CommandResult {
    pub fn visible(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ephemeral: false,
        }
    }

    /// Status text that is not worth keeping in scrollback.
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ephemeral: true,
        }
    }
}
