use crate::service::{Artifact, RitualKind, RitualResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

/// What produced a lineage entry: a ritual, the seeding call, or a restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RitualTag {
    Init,
    Manual,
    Evolve,
    Mutate,
    Reflect,
    Compress,
}

impl RitualTag {
    pub fn ritual(self) -> Option<RitualKind> {
        match self {
            Self::Evolve => Some(RitualKind::Evolve),
            Self::Mutate => Some(RitualKind::Mutate),
            Self::Reflect => Some(RitualKind::Reflect),
            Self::Compress => Some(RitualKind::Compress),
            Self::Init | Self::Manual => None,
        }
    }
}

impl From<RitualKind> for RitualTag {
    fn from(kind: RitualKind) -> Self {
        match kind {
            RitualKind::Evolve => Self::Evolve,
            RitualKind::Mutate => Self::Mutate,
            RitualKind::Reflect => Self::Reflect,
            RitualKind::Compress => Self::Compress,
        }
    }
}

/// One recorded glyph state. Entries are never edited after being appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageEntry {
    pub svg: String,
    pub glyph: Value,
    pub ritual: RitualTag,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed: Option<Value>,
}

impl LineageEntry {
    /// Stamp a ritual result with its tag and the current time.
    pub fn from_result(result: RitualResult, ritual: RitualTag) -> Self {
        Self {
            svg: result.svg,
            glyph: result.glyph,
            ritual,
            timestamp: Utc::now(),
            insight: result.insight,
            compressed: result.compressed,
        }
    }

    /// A `manual` entry recording that `artifact` was made current again.
    pub fn restored(artifact: Artifact) -> Self {
        Self {
            svg: artifact.svg,
            glyph: artifact.glyph,
            ritual: RitualTag::Manual,
            timestamp: Utc::now(),
            insight: None,
            compressed: None,
        }
    }

    pub fn artifact(&self) -> Artifact {
        Artifact::new(self.svg.clone(), self.glyph.clone())
    }
}
