use crate::lineage::{LineageEntry, LineageStore};
use crate::service::{Artifact, RitualKind};
use crate::suggest::Suggestion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a manual ritual result is applied.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    /// Results become current and are appended immediately.
    #[default]
    Live,
    /// Results are held as a ghost preview until committed.
    Test,
}

/// An uncommitted ritual result awaiting commit or cancel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostPreview {
    pub kind: RitualKind,
    pub entry: LineageEntry,
}

/// The current glyph and at most one pending ghost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactState {
    pub current: Option<Artifact>,
    pub ghost: Option<GhostPreview>,
}

/// Oracle insight surfaced for a short time after a reflect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub text: String,
    pub raised_at: DateTime<Utc>,
    #[serde(skip)]
    pub(crate) seq: u64,
}

/// Everything the studio owns. Guarded by a single lock in [`super::Studio`].
#[derive(Debug, Default)]
pub struct StudioState {
    pub artifact: ArtifactState,
    pub lineage: LineageStore,
    pub mode: Mode,
    pub suggestions: Vec<Suggestion>,
    pub last_error: Option<String>,
    pub insight: Option<Insight>,
    pub(crate) insight_seq: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn mode_defaults_to_live() {
        assert_eq!(Mode::default(), Mode::Live);
        assert_eq!(StudioState::default().mode, Mode::Live);
    }

    #[test]
    fn mode_parses_from_cli_text() {
        assert_eq!(Mode::from_str("test").unwrap(), Mode::Test);
        assert_eq!(Mode::from_str("LIVE").unwrap(), Mode::Live);
        assert!(Mode::from_str("preview").is_err());
    }
}
